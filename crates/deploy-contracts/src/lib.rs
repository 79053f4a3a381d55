pub mod arguments;
pub mod deploy;

use {
    alloy::providers::Provider as _,
    anyhow::{Context, Result, ensure},
    arguments::Arguments,
    configs::Config,
    contracts::{ArtifactStore, Provider},
    deploy::{FactoryDeployer, deploy_all, report},
};

/// Deploys the configured contracts to the selected network and prints
/// their addresses to stdout.
pub async fn run(args: Arguments) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    };
    tracing::debug!("network configuration:\n{config}");

    let network = config.resolve(args.network.as_deref())?;
    tracing::info!(
        network = %network.name,
        deployer = %network.deployer(),
        solidity = %config.solidity,
        "connecting to network"
    );
    let provider = contracts::provider(&network.url, network.wallet());
    check_chain_id(&provider, network.chain_id).await?;

    let artifacts = ArtifactStore::new(&args.artifacts);
    let deployer = FactoryDeployer::new(artifacts, provider);
    let deployed = deploy_all(&deployer, &args.contracts).await?;

    report(&deployed, std::io::stdout().lock()).context("failed to write deployment report")
}

async fn check_chain_id(provider: &Provider, expected: Option<u64>) -> Result<()> {
    let chain_id = provider
        .get_chain_id()
        .await
        .context("could not fetch current chain id")?;
    tracing::debug!(chain_id, "connected to node");
    if let Some(expected) = expected {
        ensure!(
            chain_id == expected,
            "connected to node with incorrect chain ID {chain_id}, expected {expected}"
        );
    }
    Ok(())
}
