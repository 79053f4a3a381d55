//! Compiled contract artifacts and the factory that deploys them.

pub mod artifact;
pub mod factory;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use {
    alloy::providers::DynProvider as Provider,
    artifact::{Artifact, ArtifactStore},
    factory::{ContractFactory, Deployment},
};
use {
    alloy::{
        network::EthereumWallet,
        providers::{Provider as _, ProviderBuilder},
    },
    url::Url,
};

/// Creates a provider for `url` that signs transactions with `wallet`.
pub fn provider(url: &Url, wallet: EthereumWallet) -> Provider {
    ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(url.clone())
        .erased()
}
