pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::LocalStorage;
pub use crate::app::{build_app, build_state};
pub use crate::core::store::{SeedStore, StoreOptions};
pub use crate::domain::model::{Applicant, ApplicationRequest, SeedVariety};
pub use crate::domain::services::{ApplicationService, SelectionPolicy};
pub use crate::server::{build_router, AppState};
pub use crate::utils::error::{Result, SeedError};
