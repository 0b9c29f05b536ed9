use anyhow::Context;
use bistro::cli::commands::App;
use bistro::cli::init::{self, InitConfig, InitResult};
use bistro::cli::output::Output;
use bistro::cli::{Cli, Commands};
use bistro::utils::config::{BistroConfig, LogFormat, LoggingConfig};
use bistro::{ApiClient, ChangeFeed};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Some(Commands::Init {
        path,
        force,
        base_url,
    }) = &cli.command
    {
        let result = init::run(
            InitConfig {
                path: path.clone(),
                force: *force,
                base_url: base_url.clone(),
            },
            &output,
        );
        return match result {
            InitResult::Success | InitResult::AlreadyExists => Ok(()),
            InitResult::Error(e) => Err(anyhow::anyhow!(e)),
        };
    }

    let config = BistroConfig::load(&cli.config)
        .and_then(|config| config.with_api_url(cli.api_url.clone()))
        .with_context(|| format!("loading {}", cli.config.display()))?;

    init_tracing(&config.logging, cli.verbose);
    tracing::debug!(base_url = %config.api.base_url, "Using API");

    let client = ApiClient::new(config.api.base_url.clone()).with_change_feed(ChangeFeed::default());
    let app = App::new(client, output);

    if let Err(e) = app.run(cli.command).await {
        app.output.error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        logging.level.clone()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
