use crate::core::store::SeedStore;
use crate::domain::services::{ApplicationService, SelectionPolicy};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SeedStore>,
    pub applications: Arc<ApplicationService>,
    /// 匯出 CSV 時使用的時區偏移（小時）
    pub export_utc_offset_hours: i32,
}

impl AppState {
    pub fn new(store: Arc<SeedStore>, policy: SelectionPolicy, export_utc_offset_hours: i32) -> Self {
        let applications = Arc::new(ApplicationService::new(store.clone(), policy));
        Self {
            store,
            applications,
            export_utc_offset_hours,
        }
    }
}
