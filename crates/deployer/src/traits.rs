//! Trait definitions for the deployment machinery the driver relies on.
//!
//! These traits abstract the artifact lookup and the blockchain interaction
//! to enable unit testing with mocks.

use {
    crate::Error,
    alloy::primitives::{Address, TxHash},
};

/// Hands out factories for named contract artifacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FactoryProvider: Send + Sync {
    /// Resolves the artifact called `name`.
    ///
    /// Fails with [`Error::ArtifactNotFound`] if no deployable artifact with
    /// that name exists.
    async fn get_factory(&self, name: &str) -> Result<Box<dyn Factory>, Error>;
}

/// Submits deployment transactions for a single artifact.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Factory: Send + Sync {
    /// Sends a contract creation transaction without constructor arguments.
    /// Returns as soon as the node accepted the transaction.
    async fn deploy(&self) -> Result<Box<dyn PendingDeployment>, Error>;
}

/// A submitted but not yet confirmed deployment.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PendingDeployment: Send + Sync {
    fn tx_hash(&self) -> TxHash;

    /// Waits until the deployment transaction is mined and returns the address
    /// of the created contract.
    async fn wait_for_confirmation(&self) -> Result<Address, Error>;
}
