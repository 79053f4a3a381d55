//! Helpers for testing code that deploys contracts without a node.

use {
    crate::Provider,
    alloy::{
        primitives::{Address, TxHash},
        providers::{Provider as _, ProviderBuilder, mock::Asserter},
    },
    serde_json::{Value, json},
};

/// Provider answering requests with the responses queued on `asserter`.
///
/// No fillers are installed, so sending a transaction issues exactly one
/// `eth_sendTransaction` request.
pub fn mocked_provider(asserter: Asserter) -> Provider {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter)
        .erased()
}

/// A Hardhat artifact for a contract without constructor arguments.
pub fn artifact_json(name: &str, bytecode: &str) -> String {
    json!({
        "_format": "hh-sol-artifact-1",
        "contractName": name,
        "sourceName": format!("contracts/{name}.sol"),
        "abi": [
            {
                "inputs": [],
                "name": "owner",
                "outputs": [{ "internalType": "address", "name": "", "type": "address" }],
                "stateMutability": "view",
                "type": "function"
            }
        ],
        "bytecode": bytecode,
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {}
    })
    .to_string()
}

/// JSON-RPC representation of a contract creation receipt.
pub struct Receipt {
    hash: TxHash,
    contract_address: Option<Address>,
    status: bool,
}

impl Receipt {
    pub fn success(hash: TxHash, contract_address: Address) -> Self {
        Self {
            hash,
            contract_address: Some(contract_address),
            status: true,
        }
    }

    pub fn reverted(self) -> Self {
        Self {
            status: false,
            ..self
        }
    }

    pub fn without_contract_address(self) -> Self {
        Self {
            contract_address: None,
            ..self
        }
    }

    pub fn json(&self) -> Value {
        let status = if self.status { "0x1" } else { "0x0" };
        json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "transactionHash": self.hash,
            "transactionIndex": "0x0",
            "blockHash": format!("0x{}", "2".repeat(64)),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "to": null,
            "contractAddress": self.contract_address,
        })
    }
}
