//! 领域模型
//!
//! 所有记录都是可序列化的纯数据；字段名在 JSON 中使用 camelCase，
//! 与本地存储中的状态记录格式保持一致。

use serde::{Deserialize, Serialize};

// =========================================================
// 用户与角色
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Partner,
    Admin,
}

impl Role {
    /// 个人资料页上显示的身份标签
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Penerima",
            Role::Partner => "Mitra",
            Role::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub avatar: String,
    pub role: Role,
}

// =========================================================
// 地址
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Home,
    Office,
    Gps,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub title: String,
    pub desc: String,
    #[serde(rename = "type", default)]
    pub kind: AddressKind,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 位置照片 (data URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

// =========================================================
// 订单记录
// =========================================================

/// 订单状态
///
/// 创建时确定，之后没有任何流程推动它变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Dikemas,
    Dikirim,
    Selesai,
    Dibatalkan,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Dikemas => "Dikemas",
            OrderStatus::Dikirim => "Dikirim",
            OrderStatus::Selesai => "Selesai",
            OrderStatus::Dibatalkan => "Dibatalkan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    #[default]
    Pickup,
    Delivery,
}

impl DeliveryType {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::Pickup => "Ambil Sendiri",
            DeliveryType::Delivery => "Diantar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: i64,
    /// 商家名称
    pub name: String,
    pub item: String,
    pub date: String,
    pub price: String,
    pub status: OrderStatus,
    #[serde(rename = "type")]
    pub delivery: DeliveryType,
    #[serde(default)]
    pub img: u32,
}

// =========================================================
// 首页商品流
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: u32,
    pub partner: String,
    pub status: String,
    pub food_name: String,
    /// 形如 "0.5 km"
    pub distance: String,
    /// 形如 "Hari ini, s/d 21:00"
    pub time_left: String,
    /// 形如 "5 Paket"
    pub quantity: String,
    pub image: String,
    pub avatar: String,
    pub category: String,
    pub delivery_type: DeliveryType,
}

// =========================================================
// AI 质量分析
// =========================================================

/// 检测到的食材分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FoodCategory {
    Buah,
    Sayur,
    Protein,
    Karbohidrat,
    Olahan,
    Roti,
    Bumbu,
    Lainnya,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 8] = [
        FoodCategory::Buah,
        FoodCategory::Sayur,
        FoodCategory::Protein,
        FoodCategory::Karbohidrat,
        FoodCategory::Olahan,
        FoodCategory::Roti,
        FoodCategory::Bumbu,
        FoodCategory::Lainnya,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Buah => "Buah",
            FoodCategory::Sayur => "Sayur",
            FoodCategory::Protein => "Protein",
            FoodCategory::Karbohidrat => "Karbohidrat",
            FoodCategory::Olahan => "Olahan",
            FoodCategory::Roti => "Roti",
            FoodCategory::Bumbu => "Bumbu",
            FoodCategory::Lainnya => "Lainnya",
        }
    }
}

impl From<String> for FoodCategory {
    fn from(s: String) -> Self {
        FoodCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(FoodCategory::Lainnya)
    }
}

impl From<FoodCategory> for String {
    fn from(c: FoodCategory) -> Self {
        c.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    pub name: String,
    pub category: FoodCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentalImpact {
    pub co2_saved: String,
    pub water_saved: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QualityAnalysisResult {
    pub is_safe: bool,
    pub is_halal: bool,
    #[serde(default)]
    pub halal_reasoning: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub shelf_life_prediction: String,
    /// 0-100
    pub hygiene_score: u32,
    /// 0-100
    pub quality_percentage: u32,
    #[serde(default)]
    pub detected_items: Vec<DetectedItem>,
    #[serde(default)]
    pub storage_tips: Vec<String>,
    #[serde(default)]
    pub environmental_impact: EnvironmentalImpact,
    #[serde(default)]
    pub hygiene_breakdown: Vec<String>,
}

/// 一次质量扫描的快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityHistoryItem {
    /// 毫秒时间戳
    pub id: i64,
    pub date: String,
    pub details: QualityAnalysisResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

// =========================================================
// 食谱
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Mudah,
    Sedang,
    Sulit,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Mudah, Difficulty::Sedang, Difficulty::Sulit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Mudah => "Mudah",
            Difficulty::Sedang => "Sedang",
            Difficulty::Sulit => "Sulit",
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(Difficulty::Sedang)
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.as_str().to_string()
    }
}

/// 做法：模型有时返回整段文本，有时返回步骤列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeInstructions {
    Steps(Vec<String>),
    Text(String),
}

impl Default for RecipeInstructions {
    fn default() -> Self {
        RecipeInstructions::Text(String::new())
    }
}

impl RecipeInstructions {
    /// 统一成步骤列表，文本按行拆分并去掉空行
    pub fn steps(&self) -> Vec<String> {
        match self {
            RecipeInstructions::Steps(steps) => steps.clone(),
            RecipeInstructions::Text(text) => text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSuggestion {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ingredients_used: Vec<String>,
    #[serde(default)]
    pub instructions: RecipeInstructions,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

// =========================================================
// 位置 / 影响 / 元数据
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationInfo {
    pub place_name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub rt: String,
    pub rw: String,
    pub maps_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImpactEstimate {
    pub co2_saved: String,
    pub money_saved: String,
    pub methane_prevented: String,
    pub nutrition_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FoodMetadata {
    pub category: String,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_category_falls_back_to_lainnya() {
        let item: DetectedItem =
            serde_json::from_value(json!({ "name": "Kopi", "category": "Minuman" })).unwrap();
        assert_eq!(item.category, FoodCategory::Lainnya);

        let item: DetectedItem =
            serde_json::from_value(json!({ "name": "Apel", "category": "buah" })).unwrap();
        assert_eq!(item.category, FoodCategory::Buah);
    }

    #[test]
    fn instructions_accept_text_or_steps() {
        let text: RecipeInstructions = serde_json::from_value(json!("Cuci\n\nRebus")).unwrap();
        assert_eq!(text.steps(), vec!["Cuci", "Rebus"]);

        let steps: RecipeInstructions = serde_json::from_value(json!(["Potong", "Goreng"])).unwrap();
        assert_eq!(steps.steps(), vec!["Potong", "Goreng"]);
    }

    #[test]
    fn address_uses_type_field_name() {
        let addr: Address = serde_json::from_value(json!({
            "id": 1,
            "title": "Rumah",
            "desc": "Jl. Melati No. 12",
            "type": "home",
            "receiver": "Budi",
            "phone": "+62 812"
        }))
        .unwrap();
        assert_eq!(addr.kind, AddressKind::Home);

        let value = serde_json::to_value(&addr).unwrap();
        assert_eq!(value["type"], "home");
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_value(Role::Partner).unwrap(), json!("PARTNER"));
    }
}
