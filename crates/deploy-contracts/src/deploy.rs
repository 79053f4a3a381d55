use {
    alloy::primitives::Address,
    anyhow::{Context, Result},
    contracts::{ArtifactStore, ContractFactory, Provider},
    std::{
        fmt::{self, Display, Formatter},
        io::Write,
    },
};

/// Name and address of a deployed contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInfo {
    pub name: String,
    pub address: Address,
}

impl Display for ContractInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} deployed to {}", self.name, self.address)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Deploy: Send + Sync {
    /// Deploys the contract called `name` and returns its address once the
    /// deployment is confirmed.
    async fn deploy(&self, name: &str) -> Result<Address>;
}

/// Deploys contracts from compiled artifacts.
pub struct FactoryDeployer {
    artifacts: ArtifactStore,
    provider: Provider,
}

impl FactoryDeployer {
    pub fn new(artifacts: ArtifactStore, provider: Provider) -> Self {
        Self {
            artifacts,
            provider,
        }
    }
}

#[async_trait::async_trait]
impl Deploy for FactoryDeployer {
    async fn deploy(&self, name: &str) -> Result<Address> {
        let artifact = self.artifacts.get(name)?;
        let factory = ContractFactory::new(artifact, self.provider.clone());
        let deployment = factory.deploy().await?;
        tracing::info!(
            %name,
            address = %deployment.address,
            transaction = ?deployment.transaction_hash,
            "deployed contract"
        );
        Ok(deployment.address)
    }
}

/// Deploys the contracts one after another in the given order.
///
/// Every deployment is confirmed before the next one starts. The first
/// failure aborts the run.
pub async fn deploy_all(deployer: &dyn Deploy, names: &[String]) -> Result<Vec<ContractInfo>> {
    let mut deployed = Vec::with_capacity(names.len());
    for name in names {
        tracing::debug!(%name, "deploying contract");
        let address = deployer
            .deploy(name)
            .await
            .with_context(|| format!("failed to deploy {name}"))?;
        deployed.push(ContractInfo {
            name: name.clone(),
            address,
        });
    }
    Ok(deployed)
}

/// Writes one `<name> deployed to <address>` line per contract.
pub fn report(deployed: &[ContractInfo], mut out: impl Write) -> std::io::Result<()> {
    for info in deployed {
        writeln!(out, "{info}")?;
    }
    out.flush()
}
