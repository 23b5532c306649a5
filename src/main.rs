use biblio::tasks::CounterQueue;
use biblio::{console, Orchestrator};
use biblio_backend::{MeiliClient, MemoryKv, NoopCounter, PreferenceStore, SessionStore};
use biblio_core::config::Config;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "biblio", about = "Book catalog search console")]
struct Cli {
    /// Write debug logs to /tmp/biblio-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// User id to run the console session as.
    #[arg(long, default_value_t = 1)]
    user: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/biblio-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("biblio debug log started — tail -f /tmp/biblio-debug.log");
    }

    let config = Config::load()?;

    let kv = Arc::new(MemoryKv::new());
    let sessions = SessionStore::new(kv.clone(), Duration::from_secs(config.session.ttl_secs));
    let prefs = PreferenceStore::new(kv, Duration::from_secs(config.preferences.ttl_secs));
    let search = Arc::new(MeiliClient::new(
        &config.search.host,
        &config.search.api_key,
        &config.search.index,
    ));
    let counters = CounterQueue::new(Arc::new(NoopCounter), 256);

    let orchestrator = Orchestrator::new(
        search,
        sessions,
        prefs,
        counters,
        config.search.page_size,
    );

    console::run(orchestrator, cli.user).await
}
