use log::info;

/// Initialize logging with a timestamped format.
///
/// The level comes from MP3_PLAYER_LOG_LEVEL (falling back to RUST_LOG via
/// env_logger, then "warn").
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = std::env::var("MP3_PLAYER_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

    let mut builder = env_logger::Builder::from_default_env();

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}:{}] {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    });

    match log_level.to_lowercase().as_str() {
        "trace" => builder.filter_level(log::LevelFilter::Trace),
        "debug" => builder.filter_level(log::LevelFilter::Debug),
        "info" => builder.filter_level(log::LevelFilter::Info),
        "warn" => builder.filter_level(log::LevelFilter::Warn),
        "error" => builder.filter_level(log::LevelFilter::Error),
        _ => builder.filter_level(log::LevelFilter::Warn),
    };

    builder.try_init()?;

    info!("logging initialized with level: {}", log_level);
    Ok(())
}
