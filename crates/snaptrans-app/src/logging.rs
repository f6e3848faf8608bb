use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,snaptrans=info,snaptrans_translator=info,snaptrans_io=info,snaptrans_hotkey=info,snaptrans_config=info";

/// Logs go to stderr so stdout only carries translations.
///
/// Human-readable on a terminal, JSON lines otherwise.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = if atty::is(atty::Stream::Stderr) {
        builder.try_init()
    } else {
        builder.json().try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}
