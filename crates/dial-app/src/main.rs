//! `dial`: an analog clock in a desktop window.

mod app;
mod config;
mod fonts;
mod link;
mod notice;

use std::process::ExitCode;

use anyhow::Result;
use dial_engine::device::{GpuInit, GpuUnsupported};
use dial_engine::logging::{init_logging, LoggingConfig};
use dial_engine::window::Runtime;

use crate::app::ClockApp;
use crate::config::AppConfig;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run(AppConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let gpu = err.chain().find_map(|e| e.downcast_ref::<GpuUnsupported>());
            match gpu {
                Some(gpu) => {
                    log::error!("{gpu}");
                    let message = format!("Sorry, this system cannot draw the clock ({gpu}).");
                    eprintln!("{message}");
                    notice::show_error("Simple-Clock", &message);
                }
                None => {
                    log::error!("{err:#}");
                    eprintln!("dial: {err:#}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: AppConfig) -> Result<()> {
    let runtime = config.runtime();
    Runtime::run(runtime, GpuInit::default(), ClockApp::new(config))
}
