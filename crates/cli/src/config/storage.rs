//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Local cart storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory the cart is persisted in
    #[arg(long, env = "RANDOSTORE_DATA_DIR", default_value = ".randostore")]
    pub data_dir: PathBuf,
}
