use {
    crate::{Config, Error, Network, Result},
    serde::Deserialize,
    std::{collections::BTreeMap, path::Path},
};

/// Contents of a configuration file. Everything is optional and overrides
/// the configuration built from the environment.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct File {
    default_network: Option<String>,
    solidity: Option<String>,
    #[serde(default)]
    networks: BTreeMap<String, Network>,
}

impl Config {
    /// Loads a TOML file on top of [`Config::from_env`].
    ///
    /// Networks defined in the file replace the environment based network
    /// of the same name, all others are kept. String values of the form
    /// `%VAR` are read from the environment variable `VAR`.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, |variable| std::env::var(variable).ok())
    }

    /// Like [`Config::load`] but builds the base configuration through
    /// `lookup`.
    pub fn load_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&data, lookup).map_err(|err| match err {
            Error::Toml(_) => Error::Toml(path.to_path_buf()),
            err => err,
        })?;
        tracing::debug!(?path, "loaded network configuration");
        Ok(config)
    }

    fn from_toml(data: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Not printing detailed error because it could leak private keys.
        let file: File = toml::from_str(data).map_err(|_| Error::Toml(Default::default()))?;

        let mut config = Self::from_lookup(lookup);
        if let Some(default_network) = file.default_network {
            config.default_network = default_network;
        }
        if let Some(solidity) = file.solidity {
            config.solidity = solidity;
        }
        config.networks.extend(file.networks);
        config.validate()?;
        Ok(config)
    }
}
