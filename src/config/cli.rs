use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_provider, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "seed-share")]
#[command(about = "Seed sharing application server")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Route prefix; pass an empty string to serve from the root
    #[arg(long, default_value = "/api")]
    pub base_path: String,

    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    #[arg(long, default_value = "seeds.json")]
    pub seeds_file: String,

    #[arg(long, default_value = "applicants.json")]
    pub applicants_file: String,

    #[arg(long, default_value = "5000")]
    pub lock_timeout_ms: u64,

    #[arg(long, default_value = "10")]
    pub member_cap: usize,

    #[arg(long, default_value = "5")]
    pub guest_cap: usize,

    /// Offset applied to timestamps in the CSV export
    #[arg(long, default_value = "9", allow_hyphen_values = true)]
    pub utc_offset_hours: i32,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn bind_addr(&self) -> &str {
        &self.bind
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn seeds_file(&self) -> &str {
        &self.seeds_file
    }

    fn applicants_file(&self) -> &str {
        &self.applicants_file
    }

    fn lock_timeout_ms(&self) -> u64 {
        self.lock_timeout_ms
    }

    fn member_cap(&self) -> usize {
        self.member_cap
    }

    fn guest_cap(&self) -> usize {
        self.guest_cap
    }

    fn utc_offset_hours(&self) -> i32 {
        self.utc_offset_hours
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
