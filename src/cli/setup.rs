//! Runtime setup for the CLI: logging and output formatting.

use crate::formatting::FormattingConfig;

/// Log level for a `-v` count; `RUST_LOG` still takes precedence
pub fn log_level_for(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

/// Initialize env_logger once at startup
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level_for(verbosity));
    builder.parse_default_env();
    if let Err(e) = builder.try_init() {
        eprintln!("Note: Logger already initialized: {}", e);
    }
}

pub fn formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
