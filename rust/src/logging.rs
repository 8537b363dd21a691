/// Logging initialization.
///
/// Writes through `tracing-subscriber::fmt` to stderr. `RUST_LOG` wins over
/// the default filter. Safe to call more than once; later calls are no-ops.
///
/// With a non-empty `data_dir` logs are also appended to
/// `<data_dir>/messenger.log` so they can be pulled off a device.
pub fn init_logging(data_dir: &str) {
    use tracing_subscriber::prelude::*;

    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "messenger_core=debug,info".into())
    };

    let file_layer = if data_dir.is_empty() {
        None
    } else {
        let log_path = std::path::Path::new(data_dir).join("messenger.log");
        let _ = std::fs::create_dir_all(data_dir);
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok()
            .map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(env_filter())
            })
    };

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter()))
        .with(file_layer)
        .try_init();
}
