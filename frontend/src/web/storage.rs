//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，值以 JSON 保存。

use serde::Serialize;
use serde::de::DeserializeOwned;

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 读取并反序列化；键不存在或内容损坏时返回 `None`
    pub fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
        let raw = Self::storage()?.get_item(key).ok()??;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log_error!("[Storage] discarding corrupt entry {}: {}", key, e);
                Self::delete(key);
                None
            }
        }
    }

    /// 序列化并写入，返回是否成功
    pub fn set_json<T: Serialize>(key: &str, value: &T) -> bool {
        let Ok(raw) = serde_json::to_string(value) else {
            return false;
        };
        Self::storage()
            .and_then(|s| s.set_item(key, &raw).ok())
            .is_some()
    }

    /// 删除存储的键值对
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
