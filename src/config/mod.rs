#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::store::StoreOptions;
use crate::core::ConfigProvider;
use crate::domain::services::SelectionPolicy;
use std::time::Duration;

/// 由任一設定來源組出存放區選項
pub fn store_options<C: ConfigProvider + ?Sized>(config: &C) -> StoreOptions {
    StoreOptions {
        seeds_file: config.seeds_file().to_string(),
        applicants_file: config.applicants_file().to_string(),
        lock_timeout: Duration::from_millis(config.lock_timeout_ms()),
    }
}

pub fn selection_policy<C: ConfigProvider + ?Sized>(config: &C) -> SelectionPolicy {
    SelectionPolicy {
        member_cap: config.member_cap(),
        guest_cap: config.guest_cap(),
    }
}
