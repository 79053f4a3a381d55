//! Network configuration for contract deployments.
//!
//! A [`Config`] maps network names to the RPC endpoint and signing accounts
//! used to deploy on them. It is either built from the process environment
//! ([`Config::from_env`]) optionally with
//! a TOML file layered on top ([`Config::load`]).

mod error;
mod file;
pub mod network;
mod setting;

pub use {
    error::Error,
    network::{Accounts, HdAccounts, Network, ResolvedNetwork},
    setting::Setting,
};
use {
    alloy::primitives::{Address, address},
    std::{
        collections::BTreeMap,
        fmt::{self, Display, Formatter},
    },
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub const MUMBAI: &str = "mumbai";
pub const POLYGON_MAIN: &str = "polygon_main";
pub const LOCAL: &str = "local";

pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const ALCHEMY_API_URL: &str = "ALCHEMY_API_URL";
pub const ALCHEMY_MUMBAI_API_URL: &str = "ALCHEMY_MUMBAI_API_URL";

pub mod chain_ids {
    pub const POLYGON: u64 = 137;
    pub const MUMBAI: u64 = 80001;
    pub const LOCAL: u64 = 31337;
}

/// RPC endpoint of a locally running development node.
pub const LOCAL_URL: &str = "http://127.0.0.1:8545";
/// Mnemonic the local development nodes fund their accounts from.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";
/// First account derived from [`DEV_MNEMONIC`].
pub const DEV_ACCOUNT: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Network used when none is selected explicitly.
    pub default_network: String,

    /// Compiler version the contract artifacts are expected to be built with.
    pub solidity: String,

    pub networks: BTreeMap<String, Network>,
}

fn default_network() -> String {
    POLYGON_MAIN.to_string()
}

fn default_solidity() -> String {
    "0.8.9".to_string()
}

impl Config {
    /// Builds the configuration from `PRIVATE_KEY`, `ALCHEMY_API_URL` and
    /// `ALCHEMY_MUMBAI_API_URL`.
    ///
    /// Missing variables are recorded and only reported once a network that
    /// needs them gets resolved.
    pub fn from_env() -> Self {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Like [`Config::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let private_key = Setting::from_variable(PRIVATE_KEY, &lookup);
        let remote = |url_variable: &str, chain_id: u64| Network {
            url: Some(Setting::from_variable(url_variable, &lookup)),
            accounts: Accounts::PrivateKeys(vec![private_key.clone()]),
            chain_id: Some(chain_id),
        };

        let networks = BTreeMap::from([
            (
                MUMBAI.to_string(),
                remote(ALCHEMY_MUMBAI_API_URL, chain_ids::MUMBAI),
            ),
            (
                POLYGON_MAIN.to_string(),
                remote(ALCHEMY_API_URL, chain_ids::POLYGON),
            ),
            (LOCAL.to_string(), Network::local()),
        ]);

        Self {
            default_network: default_network(),
            solidity: default_solidity(),
            networks,
        }
    }

    /// Looks up a network by name.
    pub fn network(&self, name: &str) -> Result<&Network> {
        self.networks
            .get(name)
            .ok_or_else(|| Error::UnknownNetwork {
                name: name.to_string(),
                known: self.network_names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    /// Resolves the named network, or the default network when `name` is
    /// `None`, into connection parameters and signers.
    pub fn resolve(&self, name: Option<&str>) -> Result<ResolvedNetwork> {
        let name = name.unwrap_or(&self.default_network);
        self.network(name)?.resolve(name)
    }

    fn validate(&self) -> Result<()> {
        if !self.networks.contains_key(&self.default_network) {
            return Err(Error::MissingDefault(self.default_network.clone()));
        }
        Ok(())
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "default_network: {}", self.default_network)?;
        writeln!(f, "solidity: {}", self.solidity)?;
        for (name, network) in &self.networks {
            writeln!(f, "network {name}: {network}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashMap};

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn full_env() -> impl Fn(&str) -> Option<String> {
        lookup(&[
            (PRIVATE_KEY, KEY),
            (ALCHEMY_API_URL, "https://polygon-mainnet.g.alchemy.com/v2/key"),
            (
                ALCHEMY_MUMBAI_API_URL,
                "https://polygon-mumbai.g.alchemy.com/v2/key",
            ),
        ])
    }

    #[test]
    fn exposes_named_networks_and_local_default() {
        let config = Config::from_lookup(full_env());
        assert_eq!(
            config.network_names().collect::<Vec<_>>(),
            vec![LOCAL, MUMBAI, POLYGON_MAIN]
        );
        assert_eq!(config.default_network, POLYGON_MAIN);
        assert_eq!(config.solidity, "0.8.9");
    }

    #[test]
    fn wires_urls_and_prefixed_key() {
        let config = Config::from_lookup(full_env());

        let mumbai = config.resolve(Some(MUMBAI)).unwrap();
        assert_eq!(
            mumbai.url.as_str(),
            "https://polygon-mumbai.g.alchemy.com/v2/key"
        );
        assert_eq!(mumbai.chain_id, Some(chain_ids::MUMBAI));
        assert_eq!(mumbai.deployer(), DEV_ACCOUNT);

        let polygon = config.resolve(None).unwrap();
        assert_eq!(polygon.name, POLYGON_MAIN);
        assert_eq!(
            polygon.url.as_str(),
            "https://polygon-mainnet.g.alchemy.com/v2/key"
        );
        assert_eq!(polygon.signers.len(), 1);
        assert_eq!(polygon.deployer(), DEV_ACCOUNT);
    }

    #[test]
    fn missing_variables_fail_on_resolve_only() {
        let config = Config::from_lookup(lookup(&[(PRIVATE_KEY, KEY)]));

        let err = config.resolve(Some(POLYGON_MAIN)).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingVariable { ref network, ref variable }
                if network == POLYGON_MAIN && variable == ALCHEMY_API_URL
        ));

        // The local network does not depend on any variable.
        assert!(config.resolve(Some(LOCAL)).is_ok());
    }

    #[test]
    fn missing_private_key_is_reported() {
        let config = Config::from_lookup(lookup(&[(
            ALCHEMY_MUMBAI_API_URL,
            "https://polygon-mumbai.g.alchemy.com/v2/key",
        )]));

        let err = config.resolve(Some(MUMBAI)).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingVariable { ref variable, .. } if variable == PRIVATE_KEY
        ));
    }

    #[test]
    fn unknown_network_lists_known_names() {
        let config = Config::from_lookup(full_env());
        let err = config.network("goerli").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown network \"goerli\", expected one of: local, mumbai, polygon_main"
        );
    }

    #[test]
    fn display_does_not_leak_secrets() {
        let config = Config::from_lookup(full_env());
        let displayed = config.to_string();
        let debugged = format!("{config:?}");

        for output in [displayed, debugged] {
            assert!(!output.contains(KEY));
            assert!(!output.contains("/v2/key"));
        }
    }
}
