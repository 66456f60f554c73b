use crate::core::{Storage, SeedVariety};
use crate::domain::model::{Applicant, ApplicantLog, Inventory};
use crate::utils::error::{Result, SeedError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub const DEFAULT_SEEDS_FILE: &str = "seeds.json";
pub const DEFAULT_APPLICANTS_FILE: &str = "applicants.json";
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub seeds_file: String,
    pub applicants_file: String,
    /// 取得寫入鎖的最長等待時間，逾時回傳 `SeedError::Busy`
    pub lock_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seeds_file: DEFAULT_SEEDS_FILE.to_string(),
            applicants_file: DEFAULT_APPLICANTS_FILE.to_string(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}

/// 庫存與申請紀錄的完整狀態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub inventory: Inventory,
    pub log: ApplicantLog,
}

/// 庫存與申請紀錄的持久化存放區。
///
/// 所有寫入都經由同一把 `RwLock` 序列化：在鎖內複製狀態、套用變更、
/// 寫回儲存後才替換記憶體中的狀態。變更或寫檔失敗時不留下任何部分結果。
pub struct SeedStore {
    storage: Arc<dyn Storage>,
    options: StoreOptions,
    state: RwLock<Ledger>,
}

impl SeedStore {
    /// 從儲存載入現有資料；檔案不存在時視為空清單
    pub async fn open(storage: Arc<dyn Storage>, options: StoreOptions) -> Result<Self> {
        let seeds: Vec<SeedVariety> =
            load_json_list(storage.as_ref(), &options.seeds_file).await?;
        let applicants: Vec<Applicant> =
            load_json_list(storage.as_ref(), &options.applicants_file).await?;

        if !storage.exists(&options.applicants_file).await? {
            storage
                .write_file(&options.applicants_file, &to_json(&applicants)?)
                .await?;
        }

        tracing::info!(
            "📦 Loaded {} seed varieties and {} applicants",
            seeds.len(),
            applicants.len()
        );

        let ledger = Ledger {
            inventory: Inventory::new(seeds)?,
            log: ApplicantLog::new(applicants),
        };

        Ok(Self {
            storage,
            options,
            state: RwLock::new(ledger),
        })
    }

    /// 目前庫存，依 id 排序
    pub async fn list_seeds(&self) -> Vec<SeedVariety> {
        self.state.read().await.inventory.seeds().to_vec()
    }

    /// 以新清單整批取代庫存，回傳品項數
    pub async fn replace_seeds(&self, seeds: Vec<SeedVariety>) -> Result<usize> {
        let inventory = Inventory::new(seeds)?;
        let count = inventory.seeds().len();

        self.transact(move |ledger| {
            ledger.inventory = inventory;
            Ok(())
        })
        .await?;

        tracing::info!("🌱 Inventory replaced with {} seed varieties", count);
        Ok(count)
    }

    /// 申請紀錄，新的在前
    pub async fn list_applicants(&self) -> Vec<Applicant> {
        self.state.read().await.log.newest_first()
    }

    pub async fn append_applicant(&self, applicant: Applicant) -> Result<()> {
        self.transact(move |ledger| {
            ledger.log.append(applicant);
            Ok(())
        })
        .await
    }

    pub async fn clear_applicants(&self) -> Result<usize> {
        let removed = self
            .transact(|ledger| {
                let removed = ledger.log.len();
                ledger.log.clear();
                Ok(removed)
            })
            .await?;

        tracing::info!("🗑️ Cleared {} applicants", removed);
        Ok(removed)
    }

    /// 一致的快照，供匯出使用
    pub async fn snapshot(&self) -> Ledger {
        self.state.read().await.clone()
    }

    /// 在寫入鎖內執行 `f`。`f` 回傳錯誤或寫檔失敗時，狀態維持不變。
    pub async fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        let mut guard = tokio::time::timeout(self.options.lock_timeout, self.state.write())
            .await
            .map_err(|_| {
                tracing::warn!(
                    "⏳ Gave up waiting for the store lock after {:?}",
                    self.options.lock_timeout
                );
                SeedError::Busy {
                    waited_ms: self.options.lock_timeout.as_millis() as u64,
                }
            })?;

        // 變更套用在副本上，寫檔成功後才替換
        let mut draft = guard.clone();
        let value = f(&mut draft)?;

        self.persist(&guard, &draft).await?;
        *guard = draft;

        Ok(value)
    }

    async fn persist(&self, current: &Ledger, draft: &Ledger) -> Result<()> {
        let seeds_changed = current.inventory != draft.inventory;
        let log_changed = current.log != draft.log;

        if seeds_changed {
            self.storage
                .write_file(&self.options.seeds_file, &to_json(draft.inventory.seeds())?)
                .await?;
        }

        if log_changed {
            let written = match to_json(draft.log.entries()) {
                Ok(bytes) => {
                    self.storage
                        .write_file(&self.options.applicants_file, &bytes)
                        .await
                }
                Err(e) => Err(e),
            };

            if let Err(e) = written {
                if seeds_changed {
                    self.restore_seeds(current).await;
                }
                return Err(e);
            }
        }

        Ok(())
    }

    async fn restore_seeds(&self, previous: &Ledger) {
        let restored = match to_json(previous.inventory.seeds()) {
            Ok(bytes) => {
                self.storage
                    .write_file(&self.options.seeds_file, &bytes)
                    .await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = restored {
            tracing::error!(
                "❌ Failed to restore {} after a failed commit: {}",
                self.options.seeds_file,
                e
            );
        }
    }
}

async fn load_json_list<T: DeserializeOwned>(storage: &dyn Storage, path: &str) -> Result<Vec<T>> {
    if !storage.exists(path).await? {
        tracing::warn!("{} not found, starting with an empty list", path);
        return Ok(Vec::new());
    }

    let bytes = storage.read_file(path).await?;
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_slice(&bytes)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(value)?)
}
