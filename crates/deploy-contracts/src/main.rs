use clap::Parser;

#[tokio::main]
async fn main() {
    // A missing `.env` file is fine, the variables may come from the
    // environment directly.
    dotenvy::dotenv().ok();
    let args = deploy_contracts::arguments::Arguments::parse();
    observe::tracing::initialize(&observe::Config::new(
        &args.logging.log_filter,
        args.logging.log_stderr_threshold,
        args.logging.use_json_logs,
    ));
    observe::panic_hook::install();
    tracing::info!("running deploy-contracts with validated arguments:\n{}", args);

    if let Err(err) = deploy_contracts::run(args).await {
        tracing::error!(?err, "deployment failed");
        std::process::exit(1);
    }
}
