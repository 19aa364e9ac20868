use log::LevelFilter;
use env_logger::{Builder, Env};
use std::io::Write;
use chrono::Local;

/// Timestamped console logging at Info, overridable through `RUST_LOG`.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(buf,
                "{} [{:<5}] {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        // html5ever is chatty at debug
        .filter_module("html5ever", LevelFilter::Warn)
        .init();

    log::info!("Logger initialized.");
}
