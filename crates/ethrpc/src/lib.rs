mod instrumentation;

use {
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::client::ClientBuilder,
        signers::local::PrivateKeySigner,
    },
    anyhow::{Context, Result},
    instrumentation::{InstrumentationLayer, LabelingLayer},
    url::Url,
};

pub type AlloyProvider = DynProvider;

/// Connection to a node together with the account that sends transactions.
#[derive(Debug, Clone)]
pub struct Web3 {
    pub alloy: AlloyProvider,
    /// Account that signs and pays for transactions sent through this
    /// connection.
    pub sender: Address,
}

impl Web3 {
    /// Connects to the node at `url`.
    ///
    /// With a `signer` transactions get signed locally. Without one the first
    /// account managed by the node is used and the node signs transactions
    /// itself, which is what development nodes like anvil or hardhat offer.
    pub async fn new(url: &Url, label: &str, signer: Option<PrivateKeySigner>) -> Result<Self> {
        let client = ClientBuilder::default()
            .layer(LabelingLayer {
                label: label.into(),
            })
            .layer(InstrumentationLayer)
            .http(url.clone());

        let web3 = match signer {
            Some(signer) => Self {
                sender: signer.address(),
                alloy: ProviderBuilder::new()
                    .wallet(EthereumWallet::new(signer))
                    .connect_client(client)
                    .erased(),
            },
            None => {
                let alloy = ProviderBuilder::new().connect_client(client).erased();
                let sender = alloy
                    .get_accounts()
                    .await
                    .context("could not fetch accounts managed by the node")?
                    .first()
                    .copied()
                    .context("node does not manage any accounts, a private key is required")?;
                Self { alloy, sender }
            }
        };
        tracing::debug!(sender = %web3.sender, "connected to node");
        Ok(web3)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address};

    #[tokio::test]
    async fn local_signer_determines_sender() {
        let signer: PrivateKeySigner =
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .parse()
                .unwrap();
        let url = Url::parse("http://localhost:8545").unwrap();

        // No request is sent because the sender is known upfront.
        let web3 = Web3::new(&url, "test", Some(signer)).await.unwrap();
        assert_eq!(
            web3.sender,
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }
}
