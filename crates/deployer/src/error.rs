use {
    alloy::primitives::TxHash,
    contracts::artifacts,
    std::time::Duration,
};

/// Reasons a deployment can fail. None of them is retried, they all end the
/// run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not find a deployable artifact for {name}")]
    ArtifactNotFound {
        name: String,
        #[source]
        source: artifacts::Error,
    },
    #[error("deployment of {name} failed")]
    Deployment {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(
        "deployment of {name} in transaction {tx_hash} was not confirmed within {timeout:?}"
    )]
    ConfirmationTimeout {
        name: String,
        tx_hash: TxHash,
        timeout: Duration,
    },
    #[error("failed to report deployment")]
    Output(#[from] std::io::Error),
}
