//! 首页商品流的启发式排序
//!
//! 分数由距离、紧急程度、剩余数量三部分加权组成，纯函数、结果可重复。

use crate::model::FeedItem;

/// "全部" 分类
pub const CATEGORY_ALL: &str = "Semua";
/// "已收藏" 伪分类
pub const CATEGORY_SAVED: &str = "Tersimpan";
/// 高于该分数的商品标记为 "Paling Cocok Untukmu"
pub const BEST_MATCH_THRESHOLD: u32 = 20;

/// 评分权重
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// 距离 < 1 km
    pub near: u32,
    /// 距离 < 3 km
    pub mid: u32,
    /// 其余距离（包括无法解析）
    pub far: u32,
    /// 包含 "s/d 12:00" 或 "Segera"
    pub urgent: u32,
    /// 仅包含 "Hari ini"
    pub today: u32,
    /// 剩余数量 < 3
    pub scarce: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            near: 50,
            mid: 30,
            far: 10,
            urgent: 40,
            today: 0,
            scarce: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFeedItem {
    pub item: FeedItem,
    pub match_score: u32,
}

impl ScoredFeedItem {
    pub fn is_best_match(&self) -> bool {
        is_best_match(self.match_score)
    }
}

/// 解析开头的数字，如 "0.5 km" / "0.5km" -> 0.5
///
/// 取最长的数字前缀，逗号按小数点处理。
fn parse_leading_number(s: &str) -> Option<f64> {
    let mut seen_point = false;
    let number: String = s
        .trim_start()
        .chars()
        .enumerate()
        .take_while(|(i, c)| match c {
            '0'..='9' => true,
            '-' => *i == 0,
            '.' | ',' if !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .map(|(_, c)| if c == ',' { '.' } else { c })
        .collect();
    number.parse().ok()
}

/// 解析开头的整数，如 "2 Paket" -> 2
fn parse_leading_integer(s: &str) -> Option<i64> {
    let head = s.split_whitespace().next()?;
    let digits: String = head
        .chars()
        .enumerate()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '-'))
        .map(|(_, c)| c)
        .collect();
    digits.parse().ok()
}

pub fn match_score(item: &FeedItem) -> u32 {
    match_score_with(item, &ScoreWeights::default())
}

pub fn match_score_with(item: &FeedItem, weights: &ScoreWeights) -> u32 {
    let mut score = 0;

    score += match parse_leading_number(&item.distance) {
        Some(km) if km < 1.0 => weights.near,
        Some(km) if km < 3.0 => weights.mid,
        _ => weights.far,
    };

    if item.time_left.contains("s/d 12:00") || item.time_left.contains("Segera") {
        score += weights.urgent;
    } else if item.time_left.contains("Hari ini") {
        score += weights.today;
    }

    if let Some(qty) = parse_leading_integer(&item.quantity) {
        if qty < 3 {
            score += weights.scarce;
        }
    }

    score
}

pub fn is_best_match(score: u32) -> bool {
    score > BEST_MATCH_THRESHOLD
}

/// 按分类过滤
///
/// `Semua` 返回全部，`Tersimpan` 返回已收藏的 id，其余按分类名精确匹配。
pub fn filter_feed<'a>(items: &'a [FeedItem], category: &str, saved: &[u32]) -> Vec<&'a FeedItem> {
    items
        .iter()
        .filter(|item| match category {
            CATEGORY_ALL => true,
            CATEGORY_SAVED => saved.contains(&item.id),
            other => item.category == other,
        })
        .collect()
}

/// 计算分数并按分数降序排列，同分保持输入顺序
pub fn rank_feed<'a>(items: impl IntoIterator<Item = &'a FeedItem>) -> Vec<ScoredFeedItem> {
    let mut scored: Vec<ScoredFeedItem> = items
        .into_iter()
        .map(|item| ScoredFeedItem {
            match_score: match_score(item),
            item: item.clone(),
        })
        .collect();
    // sort_by 是稳定排序
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeliveryType;
    use proptest::prelude::*;

    fn item(id: u32, distance: &str, time_left: &str, quantity: &str, category: &str) -> FeedItem {
        FeedItem {
            id,
            partner: format!("Mitra {}", id),
            status: "Buka".into(),
            food_name: "Roti".into(),
            distance: distance.into(),
            time_left: time_left.into(),
            quantity: quantity.into(),
            image: String::new(),
            avatar: String::new(),
            category: category.into(),
            delivery_type: DeliveryType::Pickup,
        }
    }

    #[test]
    fn urgent_near_scarce_item_scores_105() {
        let it = item(1, "0.5 km", "Hari ini, s/d 12:00", "2 Paket", "Roti & Kue");
        assert_eq!(match_score(&it), 105);
        // 重复计算结果不变
        assert_eq!(match_score(&it), match_score(&it));
    }

    #[test]
    fn distance_bands() {
        assert_eq!(match_score(&item(1, "0.9 km", "", "10", "")), 50);
        assert_eq!(match_score(&item(1, "1.0 km", "", "10", "")), 30);
        assert_eq!(match_score(&item(1, "2.99 km", "", "10", "")), 30);
        assert_eq!(match_score(&item(1, "3 km", "", "10", "")), 10);
        assert_eq!(match_score(&item(1, "jauh", "", "10", "")), 10);
    }

    #[test]
    fn distance_without_space_uses_numeric_prefix() {
        assert_eq!(match_score(&item(1, "0.5km", "", "10", "")), 50);
        assert_eq!(match_score(&item(1, "2,5km", "", "10", "")), 30);
        assert_eq!(match_score(&item(1, "1.2.3 km", "", "10", "")), 30);
        assert_eq!(match_score(&item(1, "km 0.5", "", "10", "")), 10);
    }

    #[test]
    fn segera_counts_as_urgent() {
        assert_eq!(match_score(&item(1, "5 km", "Segera habis", "9 Cup", "")), 50);
    }

    #[test]
    fn today_bonus_is_configurable() {
        let it = item(1, "5 km", "Hari ini, s/d 21:00", "9 Cup", "");
        assert_eq!(match_score(&it), 10);
        let weights = ScoreWeights {
            today: 20,
            ..ScoreWeights::default()
        };
        assert_eq!(match_score_with(&it, &weights), 30);
    }

    #[test]
    fn unparsable_quantity_gets_no_bonus() {
        assert_eq!(match_score(&item(1, "5 km", "", "banyak", "")), 10);
        assert_eq!(match_score(&item(1, "5 km", "", "2x", "")), 25);
    }

    #[test]
    fn filter_by_category_and_saved() {
        let feed = vec![
            item(1, "0.5 km", "", "5", "Roti & Kue"),
            item(2, "1.2 km", "", "2", "Makanan Berat"),
            item(3, "2.0 km", "", "8", "Roti & Kue"),
        ];
        assert_eq!(filter_feed(&feed, CATEGORY_ALL, &[]).len(), 3);
        let ids: Vec<u32> = filter_feed(&feed, "Roti & Kue", &[])
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        let ids: Vec<u32> = filter_feed(&feed, CATEGORY_SAVED, &[2])
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![2]);
        assert!(filter_feed(&feed, "Minuman", &[]).is_empty());
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let feed = vec![
            item(1, "5 km", "", "9", ""),      // 10
            item(2, "0.5 km", "", "9", ""),    // 50
            item(3, "5 km", "", "9", ""),      // 10
            item(4, "2 km", "Segera", "1", ""), // 85
        ];
        let ranked = rank_feed(&feed);
        let ids: Vec<u32> = ranked.iter().map(|s| s.item.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
        assert!(ranked[0].is_best_match());
        assert!(!ranked[3].is_best_match());
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_best_match(20));
        assert!(is_best_match(21));
    }

    proptest! {
        #[test]
        fn moving_closer_never_lowers_the_score(
            far in 0.0f64..20.0,
            delta in 0.0f64..20.0,
            time_left in prop::sample::select(vec!["", "Segera", "Hari ini, s/d 12:00", "Besok"]),
            qty in 0u32..10,
        ) {
            let near = (far - delta).max(0.0);
            let quantity = format!("{} Paket", qty);
            let a = item(1, &format!("{:.2} km", far), time_left, &quantity, "");
            let b = item(1, &format!("{:.2} km", near), time_left, &quantity, "");
            prop_assert!(match_score(&b) >= match_score(&a));
        }
    }
}
