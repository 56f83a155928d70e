//! 食物救援应用的领域逻辑
//!
//! 不依赖浏览器，可在本机直接测试；前端只负责渲染和浏览器适配。

pub mod catalog;
pub mod date;
pub mod error;
pub mod form;
pub mod genai;
pub mod model;
pub mod quality;
pub mod scoring;
pub mod screen;
pub mod store;

pub use chrono;

pub use error::{AiError, AiResult, StoreError};
pub use form::FormError;
pub use model::*;
pub use screen::{Navigator, Screen, TransitionPolicy};
pub use store::{AppState, GlobalStore, StatePatch, StorageBackend};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 用户自选的 Gemini API Key 在本地存储中的 key
pub const API_KEY_STORAGE_KEY: &str = "foodRescueApiKey";
pub use store::STATE_STORAGE_KEY;
