mod cli;
mod io;
mod settings;

use tracing_subscriber::EnvFilter;
use typist_common::TypistError;
use typist_config::schema::LogLevel;
use typist_config::TypistConfig;
use typist_typing::{ChannelSink, InputFeed, RecipientResolver, TypingDriver};

/// Capacity of the stdin -> driver event channel.
const FEED_CAPACITY: usize = 256;

/// Same exit status clap uses for bad arguments.
const USAGE_EXIT: i32 = 2;

fn env_filter(args: &cli::Args, level: &LogLevel) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = settings::filter_directive(args.log_level.as_deref(), env.as_deref(), level);
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // The log level lives in the config, so loading runs under a provisional
    // subscriber at the default level.
    let provisional = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&args, &LogLevel::default()))
        .with_writer(std::io::stderr)
        .finish();
    let loaded = tracing::subscriber::with_default(provisional, || {
        settings::load(args.config.as_deref())
    });

    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (TypistConfig::default(), Some(e)),
    };

    init_logging(&args, &config);

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
    }

    let config = match settings::with_overrides(config, &args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid command-line override");
            std::process::exit(USAGE_EXIT);
        }
    };

    if args.print_config {
        println!("{}", typist_config::config_to_json(&config));
        return;
    }

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "typist exited with an error");
        std::process::exit(1);
    }
}

fn init_logging(args: &cli::Args, config: &TypistConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(args, &config.logging.level))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(config: TypistConfig) -> typist_common::Result<()> {
    let tracker_config = settings::tracker_config(&config.typing);
    let resolver = RecipientResolver::new(settings::resolver_policy(&config));

    tracing::info!(
        idle_timeout_ms = config.typing.idle_timeout_ms,
        keepalive = tracker_config.keepalive_interval.is_some(),
        enabled = config.typing.enabled,
        "typist starting"
    );

    let (sink, notifications) = ChannelSink::pair();
    let (feed, feed_rx) = InputFeed::channel(FEED_CAPACITY);
    let driver = TypingDriver::new(tracker_config, resolver, sink);

    let writer = tokio::spawn(io::write_notifications(tokio::io::stdout(), notifications));
    let driver = tokio::spawn(driver.run(feed_rx));

    let read = io::read_events(tokio::io::stdin(), feed).await;

    // The feed is gone once reading returns, so the driver winds down and
    // drops its sink, which in turn closes the writer.
    let sink = driver
        .await
        .map_err(|e| TypistError::Other(format!("typing driver panicked: {e}")))?;
    drop(sink);
    let written = writer
        .await
        .map_err(|e| TypistError::Other(format!("notification writer panicked: {e}")))??;

    let events = read?;
    tracing::info!(events, notifications = written, "typist finished");
    Ok(())
}
