use {
    alloy::signers::local::PrivateKeySigner,
    std::{path::PathBuf, time::Duration},
    url::Url,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Directory containing the compiled Hardhat artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts_path: PathBuf,

    /// Private key of the account paying for the deployments. If omitted the
    /// first account managed by the node is used.
    #[clap(long, env)]
    pub private_key: Option<PrivateKeySigner>,

    /// Chain ID the node is expected to be connected to. Deployments are
    /// refused on a different chain.
    #[clap(long, env)]
    pub chain_id: Option<u64>,

    /// How long to wait for each deployment transaction to be confirmed.
    #[clap(
        long,
        env,
        default_value = "5m",
        value_parser = humantime::parse_duration,
    )]
    pub confirmation_timeout: Duration,

    /// Number of blocks a deployment transaction has to be included for
    /// before it is considered confirmed.
    #[clap(long, env, default_value = "1")]
    pub confirmations: u64,
}

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,deployer=info,contracts=info,ethrpc=info"
    )]
    pub log_filter: String,

    /// Output log events as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            logging,
            node_url,
            artifacts_path,
            private_key,
            chain_id,
            confirmation_timeout,
            confirmations,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "artifacts_path: {}", artifacts_path.display())?;
        writeln!(
            f,
            "private_key: {}",
            private_key.as_ref().map(|_| "SECRET").unwrap_or("None")
        )?;
        writeln!(f, "chain_id: {chain_id:?}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        writeln!(f, "confirmations: {confirmations}")?;
        Ok(())
    }
}

impl std::fmt::Display for LoggingArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            log_filter,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn runs_without_any_arguments() {
        let args = Arguments::try_parse_from(["deployer"]).unwrap();
        assert_eq!(args.node_url.as_str(), "http://localhost:8545/");
        assert_eq!(args.artifacts_path, PathBuf::from("artifacts"));
        assert!(args.private_key.is_none());
        assert_eq!(args.chain_id, None);
        assert_eq!(args.confirmation_timeout, Duration::from_secs(300));
        assert_eq!(args.confirmations, 1);
    }

    #[test]
    fn display_hides_private_key() {
        let args = Arguments::try_parse_from([
            "deployer",
            "--private-key",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            "--confirmation-timeout",
            "30s",
        ])
        .unwrap();
        let display = args.to_string();

        assert!(display.contains("private_key: SECRET"));
        assert!(!display.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478"));
        assert!(display.contains("confirmation_timeout: 30s"));
    }
}
