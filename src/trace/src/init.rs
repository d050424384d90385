use std::{str::FromStr, sync::Mutex};

use tracing_subscriber::{filter::LevelFilter, prelude::*, Registry};

use crate::error::Error;

#[derive(Debug)]
pub struct TraceConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

// Logs never go to stdout, it is reserved for command output.
pub fn prepare_tracing(conf: TraceConfig) -> Result<(), Error> {
    let level = LevelFilter::from_str(&conf.level)
        .map_err(|_| Error::InvalidLevel(conf.level.clone()))?;

    if conf.format == "json" {
        if let Some(path) = conf.file {
            let file = std::fs::File::create(path).map_err(Error::LogFile)?;
            Registry::default()
                .with(
                    tracing_subscriber::fmt::Layer::new()
                        .with_writer(Mutex::new(file))
                        .json(),
                )
                .with(level)
                .try_init()
                .map_err(Error::Init)
        } else {
            Registry::default()
                .with(
                    tracing_subscriber::fmt::Layer::new()
                        .with_writer(std::io::stderr)
                        .json(),
                )
                .with(level)
                .try_init()
                .map_err(Error::Init)
        }
    } else if let Some(path) = conf.file {
        let file = std::fs::File::create(path).map_err(Error::LogFile)?;
        Registry::default()
            .with(
                tracing_subscriber::fmt::Layer::new()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .with(level)
            .try_init()
            .map_err(Error::Init)
    } else {
        Registry::default()
            .with(
                tracing_subscriber::fmt::Layer::new()
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .with(level)
            .try_init()
            .map_err(Error::Init)
    }
}
