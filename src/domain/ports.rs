use crate::utils::error::Result;
use async_trait::async_trait;

/// 以位元組為單位的持久化後端
#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// 整檔覆寫；實作需保證讀者不會看到寫到一半的檔案
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    async fn exists(&self, path: &str) -> Result<bool>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn base_path(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn seeds_file(&self) -> &str;
    fn applicants_file(&self) -> &str;
    fn lock_timeout_ms(&self) -> u64;
    fn member_cap(&self) -> usize;
    fn guest_cap(&self) -> usize;
    fn utc_offset_hours(&self) -> i32;
    fn json_logs(&self) -> bool;
}
