//! Process-level plumbing shared by SyncUp binaries: layered configuration,
//! home directory resolution and logging setup.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{AppConfig, AppConfigProvider, CliArgs, DatabaseConfig, LoggingConfig};
pub use logging::init_logging_from_config;
