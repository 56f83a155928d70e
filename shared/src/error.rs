use thiserror::Error;

// =========================================================
// AI 调用错误
// =========================================================

/// 生成式 AI 调用的统一错误分类
///
/// 调用方只根据变体分支，不再匹配错误消息字符串。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// 网络失败或非 2xx 响应
    #[error("transport error: {0}")]
    Transport(String),
    /// 配额耗尽 / 限流 (HTTP 429, RESOURCE_EXHAUSTED)
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// 响应不是约定的 JSON 结构
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
    /// 调用在完成前被放弃
    #[error("request cancelled")]
    Cancelled,
}

impl AiError {
    /// 机器可读的错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            AiError::Transport(_) => "TRANSPORT_ERROR",
            AiError::RateLimited(_) => "RATE_LIMITED",
            AiError::SchemaMismatch(_) => "SCHEMA_MISMATCH",
            AiError::Cancelled => "CANCELLED",
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, AiError::RateLimited(_))
    }
}

impl From<serde_json::Error> for AiError {
    fn from(e: serde_json::Error) -> Self {
        AiError::SchemaMismatch(e.to_string())
    }
}

pub type AiResult<T> = std::result::Result<T, AiError>;

// =========================================================
// 存储错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to serialize state: {0}")]
    Serialization(String),
    #[error("storage write failed: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rate_limit_counts_as_quota() {
        assert!(AiError::RateLimited("429".into()).is_quota_exceeded());
        assert!(!AiError::Transport("offline".into()).is_quota_exceeded());
        assert!(!AiError::SchemaMismatch("bad".into()).is_quota_exceeded());
        assert!(!AiError::Cancelled.is_quota_exceeded());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(AiError::Cancelled.error_code(), "CANCELLED");
        assert_eq!(
            AiError::SchemaMismatch(String::new()).error_code(),
            "SCHEMA_MISMATCH"
        );
    }
}
