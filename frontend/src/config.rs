//! 前端配置常量

use foodrescue_shared::genai::GeminiConfig;
use foodrescue_shared::{API_KEY_STORAGE_KEY, TransitionPolicy};

use crate::web::BrowserStorage;

/// 屏幕跳转策略：任何已登录角色都可以打开任意屏幕
pub const NAVIGATION_POLICY: TransitionPolicy = TransitionPolicy::Permissive;

/// 打开地址页时的被动定位超时
pub const PASSIVE_GEOLOCATION_TIMEOUT_MS: u32 = 5_000;
/// 点击 GPS 按钮时的高精度定位超时
pub const GPS_GEOLOCATION_TIMEOUT_MS: u32 = 15_000;
/// 模拟登录耗时
pub const LOGIN_DELAY_MS: u32 = 800;
/// 提示条自动消失
pub const TOAST_DISMISS_MS: u32 = 3_000;

/// 读取 AI 配置
///
/// 优先使用用户在配额页选择并保存的密钥，其次是构建时的 `GEMINI_API_KEY`。
pub fn load_gemini_config() -> GeminiConfig {
    let api_key = BrowserStorage::get_item(API_KEY_STORAGE_KEY)
        .filter(|k| !k.trim().is_empty())
        .or_else(|| option_env!("GEMINI_API_KEY").map(str::to_string))
        .unwrap_or_default();
    GeminiConfig::new(api_key)
}

/// 保存用户选择的密钥
pub fn save_api_key(key: &str) -> bool {
    BrowserStorage::set_item(API_KEY_STORAGE_KEY, key.trim())
}
