// Application assembly: wires storage, store, service and router from a config source.

use crate::adapters::LocalStorage;
use crate::config::{selection_policy, store_options};
use crate::core::store::SeedStore;
use crate::core::ConfigProvider;
use crate::server::{build_router, AppState};
use crate::utils::error::Result;
use axum::Router;
use std::sync::Arc;

/// 開啟資料目錄並建立共享狀態
pub async fn build_state<C: ConfigProvider + ?Sized>(config: &C) -> Result<AppState> {
    let storage = Arc::new(LocalStorage::new(config.data_dir()));
    let store = SeedStore::open(storage, store_options(config)).await?;

    Ok(AppState::new(
        Arc::new(store),
        selection_policy(config),
        config.utc_offset_hours(),
    ))
}

pub async fn build_app<C: ConfigProvider + ?Sized>(config: &C) -> Result<Router> {
    let state = build_state(config).await?;
    Ok(build_router(state, config.base_path()))
}
