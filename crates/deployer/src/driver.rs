use {
    crate::{Error, traits::FactoryProvider},
    alloy::primitives::Address,
    std::io::Write,
};

/// Contracts deployed by a run, in deployment order.
pub const CONTRACTS: [&str; 2] = ["AccountManager", "QuestionManager"];

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub address: Address,
}

/// Deploys the contracts one after another and reports every address to
/// `out` as soon as its deployment is confirmed.
///
/// The first failure aborts the run. Lines reported for earlier deployments
/// stay written and the contracts stay deployed. Running this twice creates
/// two independent sets of contracts.
pub async fn deploy_all(
    factories: &dyn FactoryProvider,
    names: &[&str],
    out: &mut impl Write,
) -> Result<Vec<Deployment>, Error> {
    let mut deployments = Vec::with_capacity(names.len());
    for name in names {
        let deployment = deploy(factories, name).await?;
        writeln!(out, "{} deployed to: {}", deployment.name, deployment.address)?;
        out.flush()?;
        deployments.push(deployment);
    }
    Ok(deployments)
}

async fn deploy(factories: &dyn FactoryProvider, name: &str) -> Result<Deployment, Error> {
    let factory = factories.get_factory(name).await?;
    let pending = factory.deploy().await?;
    tracing::info!(contract = name, tx_hash = %pending.tx_hash(), "submitted deployment");

    let address = pending.wait_for_confirmation().await?;
    tracing::info!(contract = name, %address, "deployment confirmed");
    Ok(Deployment {
        name: name.to_owned(),
        address,
    })
}
