use crate::domain::model::{Assets, Page};
use crate::utils::error::Result;

pub trait Storage {
    /// 寫入檔案並回傳實際位置
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

/// 一次建置的四個階段，由 `SiteEngine` 依序呼叫
pub trait SitePipeline {
    fn load_assets(&self) -> Result<Assets>;
    fn compose(&self, assets: Assets) -> Result<Page>;
    fn render(&self, page: &Page) -> Result<String>;
    fn publish(&self, document: &str) -> Result<String>;
}
