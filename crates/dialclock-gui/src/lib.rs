use flexi_logger::LogSpecification;

mod views;

pub mod app;

pub use app::{App, Message};

/// Log specification for `log_level`, honouring `RUST_LOG` when set.
pub fn get_log_spec(log_level: &str) -> LogSpecification {
    LogSpecification::env_or_parse(log_level).unwrap_or_else(|err| {
        eprintln!("Failed to parse log level {log_level:?}: {err}");
        LogSpecification::warn()
    })
}

