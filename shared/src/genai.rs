//! 生成式 AI 客户端
//!
//! 封装 Gemini `generateContent` REST 接口：组装请求、解析结构化 JSON 响应、
//! 对失败进行统一分类。不做重试和退避。

pub mod gateway;
pub mod location;
pub mod prompt;
pub mod request;
pub mod schema;

pub use gateway::GeminiGateway;
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

#[cfg(test)]
mod tests;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_MAPS_MODEL: &str = "gemini-2.5-flash";

// =========================================================
// 配置
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// 质量分析、食谱、影响估算、元数据提取
    pub analysis_model: String,
    /// 地图检索（位置搜索）
    pub maps_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            maps_model: DEFAULT_MAPS_MODEL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = model.into();
        self
    }

    pub fn with_maps_model(mut self, model: impl Into<String>) -> Self {
        self.maps_model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// `{base_url}/models/{model}:generateContent`
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}
