use std::{backtrace::Backtrace, panic, path::PathBuf, sync::Arc};

use clap::Parser;
use dialclock_core::config::get_config;
use dialclock_gui::{App, get_log_spec};
use dialclock_proto::ports::time_source::{SystemTime, TimeSource};
use flexi_logger::{
    Age, Cleanup, Criterion, Duplicate, FileSpec, LogSpecBuilder, Logger, LoggerHandle, Naming,
};
use iced::{Font, Size};
use log::{debug, error};
use masterror::{AppError, AppResult};

const LOG_DIRECTORY: &str = "/tmp/dialclock";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,
}

fn start_logger() -> AppResult<LoggerHandle> {
    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory(LOG_DIRECTORY))
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    );

    let logger = if cfg!(debug_assertions) {
        logger.duplicate_to_stdout(Duplicate::All)
    } else {
        logger
    };

    logger
        .start()
        .map_err(|e| AppError::internal(format!("Failed to start logger: {e}")))
}

fn main() -> iced::Result {
    let args = Args::parse();

    let logger = match start_logger() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    debug!("args: {args:?}");

    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));

    let (config, config_path) = get_config(args.config_path).unwrap_or_else(|err| {
        error!("Failed to read config: {err}");

        std::process::exit(1);
    });

    logger.set_new_spec(get_log_spec(&config.log_level));

    let font = match config.appearance.font_name {
        Some(ref font_name) => Font::with_name(Box::leak(font_name.clone().into_boxed_str())),
        None => Font::DEFAULT,
    };
    let window_size = Size::new(config.window.width, config.window.height);
    let time_source: Arc<dyn TimeSource> = Arc::new(SystemTime);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .scale_factor(App::scale_factor)
        .window_size(window_size)
        .antialiasing(true)
        .default_font(font)
        .run_with(App::new((logger, config, config_path, time_source)))
}
