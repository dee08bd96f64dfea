pub mod commands;
pub mod render;
pub mod analyze;
pub mod decide;
pub mod threats;
pub mod cache;
pub mod serve;

pub use commands::{Cli, Commands};

use std::path::PathBuf;
use crate::config::{self, TriageConfig};
use crate::errors::TriageError;

/// Load the configuration named by `--config`, or defaults.
pub async fn load_config(path: Option<&str>) -> Result<TriageConfig, TriageError> {
    let path = path.map(PathBuf::from);
    config::load_config(path.as_deref()).await
}
