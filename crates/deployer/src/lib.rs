pub mod arguments;
pub mod driver;
mod error;
pub mod infra;
pub mod traits;

pub use {
    driver::{CONTRACTS, Deployment},
    error::Error,
};
use {
    alloy::providers::Provider,
    anyhow::{Context, Result, ensure},
    contracts::Artifacts,
    infra::chain::{ChainFactories, Confirmation},
    std::io::Write,
};

/// Connects to the configured node and deploys [`CONTRACTS`], writing one
/// line per confirmed deployment to `out`.
pub async fn run(args: arguments::Arguments, out: &mut impl Write) -> Result<Vec<Deployment>> {
    let web3 = ethrpc::Web3::new(&args.node_url, "deployer", args.private_key)
        .await
        .context("failed to connect to node")?;

    if let Some(expected) = args.chain_id {
        let actual = web3
            .alloy
            .get_chain_id()
            .await
            .context("could not fetch current chain id")?;
        ensure!(
            actual == expected,
            "node is connected to chain {actual} but chain {expected} was configured"
        );
    }
    tracing::info!(sender = %web3.sender, artifacts = ?args.artifacts_path, "deploying contracts");

    let factories = ChainFactories::new(
        web3,
        Artifacts::new(args.artifacts_path),
        Confirmation {
            timeout: args.confirmation_timeout,
            confirmations: args.confirmations,
        },
    );
    let deployments = driver::deploy_all(&factories, &CONTRACTS, out).await?;
    Ok(deployments)
}
