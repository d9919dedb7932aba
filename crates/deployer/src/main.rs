use {clap::Parser, std::process::ExitCode};

#[tokio::main]
async fn main() -> ExitCode {
    let args = deployer::arguments::Arguments::parse();
    observe::tracing::initialize(&observe::Config::new(
        &args.logging.log_filter,
        args.logging.use_json_logs,
    ));
    tracing::info!("running deployer with validated arguments:\n{}", args);

    match deployer::run(args, &mut std::io::stdout()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
