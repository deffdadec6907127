//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Local state settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart and session
    #[arg(long, env = "BOXOFFICE_DATA_DIR", default_value = ".boxoffice", global = true)]
    pub data_dir: PathBuf,
}
