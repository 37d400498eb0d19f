use crate::errors::HofCalcError;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::Path;

/// Console level from the -v count, errors only with -q
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Terminal logger on stderr, plus a plain file logger at DEBUG or finer when
/// `log_file` is given.
pub fn setup_logging(
    verbosity: u8,
    quiet: bool,
    log_file: Option<&Path>,
) -> Result<(), HofCalcError> {
    let level = level_filter(verbosity, quiet);
    let term_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        term_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let file = File::create(path)?;
        let file_level = level.max(LevelFilter::Debug);
        loggers.push(WriteLogger::new(
            file_level,
            ConfigBuilder::new().build(),
            file,
        ));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
