use {
    crate::{DEV_MNEMONIC, Error, LOCAL_URL, Result, Setting, chain_ids},
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        signers::local::{MnemonicBuilder, PrivateKeySigner, coins_bip39::English},
    },
    serde::Deserialize,
    std::fmt::{self, Debug, Display, Formatter},
    url::Url,
};

/// Connection and signing parameters of a named network.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Network {
    /// JSON-RPC endpoint of the node to deploy through.
    #[serde(default)]
    pub url: Option<Setting>,

    #[serde(default)]
    pub accounts: Accounts,

    /// Chain ID the node is expected to report. Unchecked when unset.
    #[serde(default)]
    pub chain_id: Option<u64>,
}

/// Accounts transactions on a network are signed with. The first one deploys.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Accounts {
    /// Hex encoded private keys, with or without the `0x` prefix.
    PrivateKeys(Vec<Setting>),
    Mnemonic(HdAccounts),
}

impl Default for Accounts {
    fn default() -> Self {
        Self::PrivateKeys(Vec::new())
    }
}

/// Accounts derived from a BIP-39 mnemonic along the default Ethereum path.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HdAccounts {
    pub mnemonic: Setting,
    #[serde(default)]
    pub initial_index: u32,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    10
}

impl Network {
    /// The local development network backed by a node listening on
    /// [`LOCAL_URL`] with the well known development accounts.
    pub fn local() -> Self {
        Self {
            url: Some(Setting::Value(LOCAL_URL.to_string())),
            accounts: Accounts::Mnemonic(HdAccounts {
                mnemonic: Setting::Value(DEV_MNEMONIC.to_string()),
                initial_index: 0,
                count: default_count(),
            }),
            chain_id: Some(chain_ids::LOCAL),
        }
    }

    /// Turns the configured settings into a usable endpoint and signers.
    /// `name` is only used for error reporting.
    pub fn resolve(&self, name: &str) -> Result<ResolvedNetwork> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| Error::MissingUrl(name.to_string()))?
            .require(name)?;
        let url = Url::parse(url).map_err(|source| Error::InvalidUrl {
            network: name.to_string(),
            source,
        })?;

        let signers = self.accounts.signers(name)?;
        if signers.is_empty() {
            return Err(Error::NoAccounts(name.to_string()));
        }

        Ok(ResolvedNetwork {
            name: name.to_string(),
            url,
            chain_id: self.chain_id,
            signers,
        })
    }
}

impl Accounts {
    fn signers(&self, network: &str) -> Result<Vec<PrivateKeySigner>> {
        match self {
            Self::PrivateKeys(keys) => keys
                .iter()
                .enumerate()
                .map(|(index, key)| {
                    prefixed_key(key.require(network)?)
                        .parse::<PrivateKeySigner>()
                        .map_err(|_| Error::InvalidKey {
                            network: network.to_string(),
                            index,
                        })
                })
                .collect(),
            Self::Mnemonic(hd) => {
                let phrase = hd.mnemonic.require(network)?;
                (hd.initial_index..hd.initial_index.saturating_add(hd.count))
                    .map(|index| {
                        MnemonicBuilder::<English>::default()
                            .phrase(phrase)
                            .index(index)
                            .and_then(|builder| builder.build())
                            .map_err(|_| Error::InvalidMnemonic(network.to_string()))
                    })
                    .collect()
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::PrivateKeys(keys) => keys.len(),
            Self::Mnemonic(hd) => hd.count as usize,
        }
    }
}

/// Keys are commonly stored without the `0x` prefix.
fn prefixed_key(key: &str) -> String {
    if key.starts_with("0x") || key.starts_with("0X") {
        key.to_string()
    } else {
        format!("0x{key}")
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(Setting::Value(url)) => match Url::parse(url) {
                // Only the origin, API keys tend to live in the path.
                Ok(url) => write!(f, "url={}", url.origin().ascii_serialization())?,
                Err(_) => write!(f, "url=<invalid>")?,
            },
            Some(unset) => write!(f, "url={unset}")?,
            None => write!(f, "url=None")?,
        }
        write!(f, " accounts={}", self.accounts.len())?;
        match self.chain_id {
            Some(chain_id) => write!(f, " chain_id={chain_id}"),
            None => write!(f, " chain_id=None"),
        }
    }
}

/// A network ready to connect to.
#[derive(Clone)]
pub struct ResolvedNetwork {
    pub name: String,
    pub url: Url,
    pub chain_id: Option<u64>,
    /// Never empty.
    pub signers: Vec<PrivateKeySigner>,
}

impl ResolvedNetwork {
    /// Address of the account that deploys the contracts.
    pub fn deployer(&self) -> Address {
        self.signers[0].address()
    }

    /// Wallet holding all signers, defaulting to the deployer.
    pub fn wallet(&self) -> EthereumWallet {
        let mut wallet = EthereumWallet::new(self.signers[0].clone());
        for signer in &self.signers[1..] {
            wallet.register_signer(signer.clone());
        }
        wallet
    }
}

impl Debug for ResolvedNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedNetwork")
            .field("name", &self.name)
            .field("url", &self.url.origin().ascii_serialization())
            .field("chain_id", &self.chain_id)
            .field("deployer", &self.deployer())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::DEV_ACCOUNT};

    #[test]
    fn local_network_uses_development_accounts() {
        let local = Network::local().resolve("local").unwrap();
        assert_eq!(local.url.as_str(), "http://127.0.0.1:8545/");
        assert_eq!(local.chain_id, Some(31337));
        assert_eq!(local.signers.len(), 10);
        assert_eq!(local.deployer(), DEV_ACCOUNT);
    }

    #[test]
    fn keys_with_and_without_prefix() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        for key in [key.to_string(), format!("0x{key}")] {
            let network = Network {
                url: Some(Setting::Value("http://localhost:8545".to_string())),
                accounts: Accounts::PrivateKeys(vec![Setting::Value(key)]),
                chain_id: None,
            };
            assert_eq!(network.resolve("test").unwrap().deployer(), DEV_ACCOUNT);
        }
    }

    #[test]
    fn invalid_key_does_not_leak() {
        let network = Network {
            url: Some(Setting::Value("http://localhost:8545".to_string())),
            accounts: Accounts::PrivateKeys(vec![Setting::Value("not-a-key".to_string())]),
            chain_id: None,
        };
        let err = network.resolve("test").unwrap_err();
        assert!(matches!(err, Error::InvalidKey { index: 0, .. }));
        assert!(!err.to_string().contains("not-a-key"));
    }

    #[test]
    fn requires_url_and_accounts() {
        let network = Network {
            url: None,
            accounts: Accounts::default(),
            chain_id: None,
        };
        assert!(matches!(network.resolve("test"), Err(Error::MissingUrl(_))));

        let network = Network {
            url: Some(Setting::Value("http://localhost:8545".to_string())),
            ..network
        };
        assert!(matches!(network.resolve("test"), Err(Error::NoAccounts(_))));

        let network = Network {
            url: Some(Setting::Value("not a url".to_string())),
            ..network
        };
        assert!(matches!(
            network.resolve("test"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn display_shows_origin_only() {
        let network = Network {
            url: Some(Setting::Value(
                "https://polygon-mainnet.g.alchemy.com/v2/secret".to_string(),
            )),
            accounts: Accounts::PrivateKeys(vec![Setting::Unset {
                variable: "PRIVATE_KEY".to_string(),
            }]),
            chain_id: Some(137),
        };
        assert_eq!(
            network.to_string(),
            "url=https://polygon-mainnet.g.alchemy.com accounts=1 chain_id=137"
        );
    }
}
