//! [`FactoryProvider`] backed by compiled artifacts on disk and an Ethereum
//! node.

use {
    crate::{
        Error,
        traits::{Factory, FactoryProvider, PendingDeployment},
    },
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, TxHash},
        providers::{PendingTransactionBuilder, PendingTransactionError, Provider, WatchTxError},
        rpc::types::TransactionRequest,
    },
    anyhow::anyhow,
    contracts::{Artifact, Artifacts},
    ethrpc::{AlloyProvider, Web3},
    std::time::Duration,
};

/// When a deployment transaction counts as confirmed.
#[derive(Debug, Clone, Copy)]
pub struct Confirmation {
    /// Maximum time to wait for the required confirmations.
    pub timeout: Duration,
    /// Number of blocks the transaction has to be included for.
    pub confirmations: u64,
}

pub struct ChainFactories {
    web3: Web3,
    artifacts: Artifacts,
    confirmation: Confirmation,
}

impl ChainFactories {
    pub fn new(web3: Web3, artifacts: Artifacts, confirmation: Confirmation) -> Self {
        Self {
            web3,
            artifacts,
            confirmation,
        }
    }
}

#[async_trait::async_trait]
impl FactoryProvider for ChainFactories {
    async fn get_factory(&self, name: &str) -> Result<Box<dyn Factory>, Error> {
        let artifact = self
            .artifacts
            .find(name)
            .map_err(|source| Error::ArtifactNotFound {
                name: name.into(),
                source,
            })?;
        tracing::debug!(
            contract = %artifact.fully_qualified_name(),
            bytes = artifact.bytecode.len(),
            "loaded artifact"
        );

        Ok(Box::new(ChainFactory {
            name: name.into(),
            artifact,
            web3: self.web3.clone(),
            confirmation: self.confirmation,
        }))
    }
}

struct ChainFactory {
    name: String,
    artifact: Artifact,
    web3: Web3,
    confirmation: Confirmation,
}

#[async_trait::async_trait]
impl Factory for ChainFactory {
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, Error> {
        if self.artifact.constructor_inputs > 0 {
            return Err(Error::Deployment {
                name: self.name.clone(),
                source: anyhow!(
                    "constructor expects {} arguments but none were provided",
                    self.artifact.constructor_inputs
                ),
            });
        }

        // Nonce, gas limit and fees are filled in by the provider.
        let tx = TransactionRequest::default()
            .with_from(self.web3.sender)
            .with_deploy_code(self.artifact.bytecode.clone());
        let pending = self
            .web3
            .alloy
            .send_transaction(tx)
            .await
            .map_err(|err| Error::Deployment {
                name: self.name.clone(),
                source: err.into(),
            })?;

        Ok(Box::new(ChainDeployment {
            name: self.name.clone(),
            tx_hash: *pending.tx_hash(),
            provider: self.web3.alloy.clone(),
            confirmation: self.confirmation,
        }))
    }
}

struct ChainDeployment {
    name: String,
    tx_hash: TxHash,
    provider: AlloyProvider,
    confirmation: Confirmation,
}

#[async_trait::async_trait]
impl PendingDeployment for ChainDeployment {
    fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    async fn wait_for_confirmation(&self) -> Result<Address, Error> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), self.tx_hash)
            .with_required_confirmations(self.confirmation.confirmations)
            .with_timeout(Some(self.confirmation.timeout))
            .get_receipt()
            .await
            .map_err(|err| confirmation_error(&self.name, self.tx_hash, self.confirmation, err))?;

        if !receipt.status() {
            return Err(Error::Deployment {
                name: self.name.clone(),
                source: anyhow!("transaction {} reverted", self.tx_hash),
            });
        }
        receipt.contract_address().ok_or_else(|| Error::Deployment {
            name: self.name.clone(),
            source: anyhow!("transaction {} did not create a contract", self.tx_hash),
        })
    }
}

fn confirmation_error(
    name: &str,
    tx_hash: TxHash,
    confirmation: Confirmation,
    err: PendingTransactionError,
) -> Error {
    match err {
        PendingTransactionError::TxWatcher(WatchTxError::Timeout) => Error::ConfirmationTimeout {
            name: name.into(),
            tx_hash,
            timeout: confirmation.timeout,
        },
        err => Error::Deployment {
            name: name.into(),
            source: err.into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::Bytes, url::Url};

    const CONFIRMATION: Confirmation = Confirmation {
        timeout: Duration::from_secs(300),
        confirmations: 1,
    };

    #[test]
    fn watcher_timeout_is_a_confirmation_timeout() {
        let tx_hash = TxHash::repeat_byte(1);
        let err = confirmation_error(
            "AccountManager",
            tx_hash,
            CONFIRMATION,
            PendingTransactionError::TxWatcher(WatchTxError::Timeout),
        );

        assert!(matches!(
            err,
            Error::ConfirmationTimeout { name, tx_hash: hash, timeout }
                if name == "AccountManager" && hash == tx_hash && timeout == CONFIRMATION.timeout
        ));
    }

    #[test]
    fn other_watcher_errors_fail_the_deployment() {
        let err = confirmation_error(
            "QuestionManager",
            TxHash::repeat_byte(2),
            CONFIRMATION,
            PendingTransactionError::FailedToRegister,
        );

        assert!(matches!(err, Error::Deployment { name, .. } if name == "QuestionManager"));
    }

    #[tokio::test]
    async fn constructor_arguments_fail_the_deployment() {
        let signer = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
            .parse()
            .unwrap();
        // Nothing listens here, the deployment has to fail before sending.
        let url = Url::parse("http://127.0.0.1:9").unwrap();
        let web3 = Web3::new(&url, "test", Some(signer)).await.unwrap();
        let factory = ChainFactory {
            name: "Owned".into(),
            artifact: Artifact {
                contract_name: "Owned".into(),
                source_name: "contracts/Owned.sol".into(),
                bytecode: Bytes::from_static(&[0x60, 0x00]),
                constructor_inputs: 1,
            },
            web3,
            confirmation: CONFIRMATION,
        };

        let Err(err) = factory.deploy().await else {
            panic!("deployment without constructor arguments succeeded");
        };
        let Error::Deployment { name, source } = err else {
            panic!("expected a deployment error");
        };
        assert_eq!(name, "Owned");
        assert!(source.to_string().contains("constructor expects 1 arguments"));
    }
}
