use {
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    tracing::level_filters::LevelFilter,
};

/// Contracts deployed when none are given on the command line.
pub const DEFAULT_CONTRACTS: [&str; 3] = ["Market", "Tickets", "VerifiedMinter"];

#[derive(clap::Parser)]
#[clap(about = "Deploys compiled contracts and prints their addresses")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// Name of the network to deploy to. Defaults to the default network of
    /// the configuration.
    #[clap(long, env)]
    pub network: Option<String>,

    /// TOML file describing the networks. Without it the networks are built
    /// from `PRIVATE_KEY`, `ALCHEMY_API_URL` and `ALCHEMY_MUMBAI_API_URL`.
    #[clap(long, env = "DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the compiled contract artifacts.
    #[clap(long, env = "ARTIFACTS_DIR", default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Contracts to deploy, in order.
    #[clap(long, env, use_value_delimiter = true, default_values = DEFAULT_CONTRACTS)]
    pub contracts: Vec<String>,
}

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,deploy_contracts=debug,contracts=debug,configs=debug"
    )]
    pub log_filter: String,

    /// Log events at or above this level go to stderr, the rest to stdout.
    /// Stdout is reserved for the deployment report, so every level goes to
    /// stderr by default.
    #[clap(long, env, default_value = "trace")]
    pub log_stderr_threshold: LevelFilter,

    /// Output log events as JSON.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            network,
            config,
            artifacts,
            contracts,
        } = self;

        write!(f, "{logging}")?;
        display_option(f, "network", network)?;
        display_option(f, "config", &config.as_ref().map(|path| path.display()))?;
        writeln!(f, "artifacts: {}", artifacts.display())?;
        writeln!(f, "contracts: {}", contracts.join(", "))?;
        Ok(())
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

fn display_option(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<impl Display>,
) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}
