use std::path::PathBuf;

/// Configuration errors.
///
/// None of the variants carry key material or full RPC urls, which commonly
/// embed API keys.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("network {network:?} requires environment variable {variable} which is not set")]
    MissingVariable { network: String, variable: String },
    #[error("unknown network {name:?}, expected one of: {known}")]
    UnknownNetwork { name: String, known: String },
    #[error("default network {0:?} is not configured")]
    MissingDefault(String),
    #[error("network {0:?} has no RPC url configured")]
    MissingUrl(String),
    #[error("invalid RPC url for network {network:?}: {source}")]
    InvalidUrl {
        network: String,
        source: url::ParseError,
    },
    #[error("network {0:?} has no accounts configured")]
    NoAccounts(String),
    #[error("invalid private key #{index} for network {network:?}")]
    InvalidKey { network: String, index: usize },
    #[error("invalid mnemonic for network {0:?}")]
    InvalidMnemonic(String),
    #[error("I/O error while reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    // Not carrying the TOML error because it quotes the offending input.
    #[error("TOML syntax error while reading {0:?}")]
    Toml(PathBuf),
}
