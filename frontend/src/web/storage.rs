//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，
//! 并作为全局状态的持久化后端。

use foodrescue_shared::{StorageBackend, StoreError};

/// 浏览器本地存储
///
/// 无状态，每次操作都重新获取 `window.localStorage`。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get_item(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，失败时返回 `false`
    pub fn set_item(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }
}

impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::get_item(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage =
            Self::storage().ok_or_else(|| StoreError::Storage("localStorage unavailable".into()))?;
        // 配额已满时浏览器抛出 QuotaExceededError
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
