//! 时间类型模块
//!
//! - `Timestamp`: 可序列化的毫秒时间戳，用作地址、扫描记录的 id
//! - `display_date`: 按印尼语习惯格式化日期（`19 Okt 2026, 10.30`）

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 当前时间
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 转换为 UTC 时间，超出范围时返回 None
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// 基于时间戳生成列表内唯一的 id
///
/// 同一毫秒内连续创建记录时，向后顺延到已有最大 id + 1。
pub fn next_id(now: Timestamp, existing: impl IntoIterator<Item = i64>) -> i64 {
    let max_existing = existing.into_iter().max();
    match max_existing {
        Some(max) if max >= now.as_millis() => max + 1,
        _ => now.as_millis(),
    }
}

// =========================================================
// 显示格式
// =========================================================

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// 印尼语短日期，如 `28 Okt 2024`
pub fn short_date(ts: Timestamp) -> String {
    match ts.to_datetime() {
        Some(dt) => format!(
            "{} {} {}",
            dt.day(),
            MONTHS_ID[dt.month0() as usize],
            dt.year()
        ),
        None => String::new(),
    }
}

/// 带时分的印尼语日期，如 `28 Okt 2024, 09.05`
pub fn display_date(ts: Timestamp) -> String {
    match ts.to_datetime() {
        Some(dt) => format!(
            "{}, {:02}.{:02}",
            short_date(ts),
            dt.hour(),
            dt.minute()
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_indonesian_month_names() {
        // 2024-10-28T09:05:00Z
        let ts = Timestamp::new(1_730_106_300_000);
        assert_eq!(short_date(ts), "28 Okt 2024");
        assert_eq!(display_date(ts), "28 Okt 2024, 09.05");
    }

    #[test]
    fn next_id_skips_past_existing_ids() {
        let now = Timestamp::new(1_000);
        assert_eq!(next_id(now, vec![1, 2, 3]), 1_000);
        assert_eq!(next_id(now, vec![1_000]), 1_001);
        assert_eq!(next_id(now, vec![5_000, 10]), 5_001);
        assert_eq!(next_id(now, Vec::new()), 1_000);
    }
}
