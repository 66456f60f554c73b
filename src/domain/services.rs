use crate::core::store::SeedStore;
use crate::domain::model::{Applicant, ApplicationRequest};
use crate::utils::error::{Result, SeedError};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_MEMBER_CAP: usize = 10;
pub const DEFAULT_GUEST_CAP: usize = 5;

/// 會員與非會員各自可選的種子數量上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub member_cap: usize,
    pub guest_cap: usize,
}

impl SelectionPolicy {
    pub fn cap_for(&self, is_member: bool) -> usize {
        if is_member {
            self.member_cap
        } else {
            self.guest_cap
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            member_cap: DEFAULT_MEMBER_CAP,
            guest_cap: DEFAULT_GUEST_CAP,
        }
    }
}

/// 通過欄位檢查的申請
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedApplication {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub is_member: bool,
    pub selected_seeds: Vec<i64>,
}

impl SelectionPolicy {
    /// 只檢查欄位與數量上限，不碰庫存
    pub fn validate(&self, request: ApplicationRequest) -> Result<ValidatedApplication> {
        let ApplicationRequest {
            name,
            phone,
            address,
            is_member,
            selected_seeds,
        } = request;

        let (name, phone, address, selected_seeds) =
            match (present(name), present(phone), present(address), selected_seeds) {
                (Some(name), Some(phone), Some(address), Some(seeds)) => {
                    (name, phone, address, seeds)
                }
                _ => return Err(SeedError::validation("Missing required fields")),
            };

        if selected_seeds.is_empty() {
            return Err(SeedError::validation("Please select at least one seed."));
        }

        let cap = self.cap_for(is_member);
        if selected_seeds.len() > cap {
            return Err(SeedError::validation(format!(
                "You can only select up to {} seeds.",
                cap
            )));
        }

        Ok(ValidatedApplication {
            name,
            phone,
            address,
            is_member,
            selected_seeds,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 處理種子申請：檢查欄位後，在同一個交易內扣庫存並寫入申請紀錄
pub struct ApplicationService {
    store: Arc<SeedStore>,
    policy: SelectionPolicy,
}

impl ApplicationService {
    pub fn new(store: Arc<SeedStore>, policy: SelectionPolicy) -> Self {
        Self { store, policy }
    }

    pub async fn submit(&self, request: ApplicationRequest) -> Result<Applicant> {
        let application = self.policy.validate(request)?;

        let applicant = self
            .store
            .transact(move |ledger| {
                ledger.inventory.reserve(&application.selected_seeds)?;

                let applicant = Applicant {
                    id: Uuid::new_v4().to_string(),
                    name: application.name,
                    phone: application.phone,
                    address: application.address,
                    is_member: application.is_member,
                    selected_seeds: application.selected_seeds,
                    timestamp: Utc::now(),
                };
                ledger.log.append(applicant.clone());
                Ok(applicant)
            })
            .await?;

        tracing::info!(
            applicant_id = %applicant.id,
            seeds = ?applicant.selected_seeds,
            member = applicant.is_member,
            "✅ Application accepted"
        );

        Ok(applicant)
    }
}
