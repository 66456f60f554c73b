use crate::utils::error::{Result, SeedError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

/// 一個種子品項及剩餘數量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedVariety {
    pub id: i64,
    #[serde(default)]
    pub family: String,
    pub name: String,
    pub quantity: u32,
}

/// 一筆已送出的申請，建立後不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    /// 新紀錄為 UUID；舊資料檔的 id 是毫秒時間戳數字
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub is_member: bool,
    pub selected_seeds: Vec<i64>,
    pub timestamp: DateTime<Utc>,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Integer(id) => id.to_string(),
    })
}

/// `POST /apply` 的請求內容，欄位缺漏交給服務層判斷
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub selected_seeds: Option<Vec<i64>>,
}

/// 種子庫存，依 id 排序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    seeds: Vec<SeedVariety>,
}

impl Inventory {
    /// 建立庫存；id 重複視為驗證錯誤
    pub fn new(mut seeds: Vec<SeedVariety>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(seeds.len());
        for seed in &seeds {
            if !seen.insert(seed.id) {
                return Err(SeedError::validation(format!(
                    "Duplicate seed ID: {}",
                    seed.id
                )));
            }
        }

        seeds.sort_by_key(|s| s.id);
        Ok(Self { seeds })
    }

    pub fn seeds(&self) -> &[SeedVariety] {
        &self.seeds
    }

    pub fn get(&self, id: i64) -> Option<&SeedVariety> {
        self.seeds
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|idx| &self.seeds[idx])
    }

    /// 依序為每個 id 扣一單位；重複的 id 各自扣一次。
    /// 任何一項失敗時庫存維持原狀。
    pub fn reserve(&mut self, ids: &[i64]) -> Result<()> {
        let mut demand: HashMap<usize, u32> = HashMap::with_capacity(ids.len());

        for &id in ids {
            let idx = self
                .seeds
                .binary_search_by_key(&id, |s| s.id)
                .map_err(|_| SeedError::UnknownSeed { id })?;

            let wanted = demand.entry(idx).or_insert(0);
            let seed = &self.seeds[idx];
            if *wanted >= seed.quantity {
                return Err(SeedError::OutOfStock {
                    id,
                    name: seed.name.clone(),
                });
            }
            *wanted += 1;
        }

        for (idx, count) in demand {
            self.seeds[idx].quantity -= count;
        }
        Ok(())
    }

    /// 把 id 對應成品名，找不到的 id 以數字呈現
    pub fn seed_names(&self, ids: &[i64]) -> Vec<String> {
        ids.iter()
            .map(|&id| match self.get(id) {
                Some(seed) => seed.name.clone(),
                None => id.to_string(),
            })
            .collect()
    }
}

/// 申請紀錄，只允許附加與整批清除
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantLog {
    entries: Vec<Applicant>,
}

impl ApplicantLog {
    /// `entries` 依附加順序排列
    pub fn new(entries: Vec<Applicant>) -> Self {
        Self { entries }
    }

    pub fn append(&mut self, applicant: Applicant) {
        self.entries.push(applicant);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依附加順序，供持久化使用
    pub fn entries(&self) -> &[Applicant] {
        &self.entries
    }

    /// 新的在前；時間相同時後附加的在前
    pub fn newest_first(&self) -> Vec<Applicant> {
        let mut ordered: Vec<Applicant> = self.entries.iter().rev().cloned().collect();
        ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        ordered
    }
}
