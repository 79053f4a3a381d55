use {
    crate::{Artifact, Provider},
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, TxHash},
        providers::Provider as _,
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, ensure},
    std::time::Duration,
};

/// Deploys new instances of a compiled contract.
#[derive(Clone)]
pub struct ContractFactory {
    artifact: Artifact,
    provider: Provider,
    poll_interval: Duration,
    receipt_timeout: Duration,
}

/// A contract instance that was created and confirmed on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: TxHash,
}

impl ContractFactory {
    pub fn new(artifact: Artifact, provider: Provider) -> Self {
        Self {
            artifact,
            provider,
            poll_interval: Duration::from_secs(1),
            receipt_timeout: Duration::from_secs(300),
        }
    }

    /// Sets how often the node is asked for the deployment receipt.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn name(&self) -> &str {
        &self.artifact.contract_name
    }

    /// Sends the creation transaction and waits until it is included.
    ///
    /// Fails when the transaction reverts.
    pub async fn deploy(&self) -> Result<Deployment> {
        let name = self.name();
        let code = self.artifact.creation_code()?;
        let tx = TransactionRequest::default().with_deploy_code(code);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .with_context(|| format!("failed to send deployment transaction for {name}"))?;
        let transaction_hash = *pending.tx_hash();
        tracing::debug!(%name, ?transaction_hash, "sent deployment transaction");

        let receipt = tokio::time::timeout(self.receipt_timeout, async {
            loop {
                if let Some(receipt) = self
                    .provider
                    .get_transaction_receipt(transaction_hash)
                    .await?
                {
                    return Ok::<_, anyhow::Error>(receipt);
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        })
        .await
        .with_context(|| format!("timed out waiting for deployment of {name}"))?
        .with_context(|| format!("failed to confirm deployment of {name}"))?;

        ensure!(
            receipt.status(),
            "deployment of {name} reverted: {transaction_hash:?}"
        );
        let address = receipt
            .contract_address()
            .with_context(|| format!("receipt for {name} has no contract address"))?;
        tracing::debug!(
            %name,
            %address,
            block = ?receipt.block_number(),
            "deployment confirmed"
        );

        Ok(Deployment {
            address,
            transaction_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::test_util::{self, Receipt},
        alloy::{
            primitives::{Address, address, b256},
            providers::mock::Asserter,
        },
    };

    const HASH: TxHash = b256!("0x1111111111111111111111111111111111111111111111111111111111111111");
    const MARKET: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    fn factory(asserter: &Asserter) -> ContractFactory {
        let artifact = Artifact::from_json(&test_util::artifact_json("Market", "0x6080")).unwrap();
        ContractFactory::new(artifact, test_util::mocked_provider(asserter.clone()))
            .with_poll_interval(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn waits_for_receipt_and_returns_address() {
        let asserter = Asserter::new();
        asserter.push_success(&HASH);
        // Not mined yet on the first poll.
        asserter.push_success(&serde_json::Value::Null);
        asserter.push_success(&Receipt::success(HASH, MARKET).json());

        let deployment = factory(&asserter).deploy().await.unwrap();
        assert_eq!(
            deployment,
            Deployment {
                address: MARKET,
                transaction_hash: HASH,
            }
        );
    }

    #[tokio::test]
    async fn reverted_deployment() {
        let asserter = Asserter::new();
        asserter.push_success(&HASH);
        asserter.push_success(&Receipt::success(HASH, MARKET).reverted().json());

        let err = factory(&asserter).deploy().await.unwrap_err();
        assert!(err.to_string().starts_with("deployment of Market reverted"));
    }

    #[tokio::test]
    async fn receipt_without_contract_address() {
        let asserter = Asserter::new();
        asserter.push_success(&HASH);
        asserter.push_success(&Receipt::success(HASH, MARKET).without_contract_address().json());

        let err = factory(&asserter).deploy().await.unwrap_err();
        assert_eq!(err.to_string(), "receipt for Market has no contract address");
    }

    #[tokio::test]
    async fn rejected_transaction() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("insufficient funds for gas * price + value");

        let err = factory(&asserter).deploy().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to send deployment transaction for Market"
        );
    }

    #[tokio::test]
    async fn undeployable_artifact_sends_nothing() {
        let asserter = Asserter::new();
        let artifact = Artifact::from_json(&test_util::artifact_json("IMarket", "0x")).unwrap();
        let factory = ContractFactory::new(artifact, test_util::mocked_provider(asserter));

        assert!(factory.deploy().await.is_err());
    }
}
