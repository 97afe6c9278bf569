use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber and route `log::` macros (used throughout
/// the library modules) into it. Filter comes from `RUST_LOG`, defaulting
/// to info.
pub fn init_tracing_from_env() {
    let _ = tracing_log::LogTracer::init();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
