//! 结构化输出的 JSON Schema（Gemini `responseSchema` 格式）

use serde_json::{json, Value};

use crate::catalog::PRODUCT_CATEGORIES;
use crate::model::{Difficulty, FoodCategory};

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

pub fn quality_schema() -> Value {
    let categories: Vec<&str> = FoodCategory::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "isSafe": { "type": "BOOLEAN" },
            "isHalal": { "type": "BOOLEAN" },
            "halalReasoning": { "type": "STRING" },
            "reasoning": { "type": "STRING" },
            "allergens": string_list(),
            "shelfLifePrediction": { "type": "STRING" },
            "hygieneScore": { "type": "INTEGER" },
            "qualityPercentage": { "type": "INTEGER" },
            "storageTips": string_list(),
            "environmentalImpact": {
                "type": "OBJECT",
                "properties": {
                    "co2Saved": { "type": "STRING" },
                    "waterSaved": { "type": "STRING" }
                },
                "required": ["co2Saved", "waterSaved"]
            },
            "hygieneBreakdown": string_list(),
            "detectedItems": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "category": { "type": "STRING", "enum": categories }
                    },
                    "required": ["name", "category"]
                }
            }
        },
        "required": [
            "isSafe", "isHalal", "halalReasoning", "reasoning", "hygieneScore",
            "qualityPercentage", "detectedItems", "shelfLifePrediction",
            "allergens", "storageTips", "environmentalImpact", "hygieneBreakdown"
        ]
    })
}

pub fn recipes_schema() -> Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "recipes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "ingredientsUsed": string_list(),
                        "instructions": { "type": "STRING" },
                        "difficulty": { "type": "STRING", "enum": difficulties },
                        "sourceUrl": { "type": "STRING" }
                    },
                    "required": ["id", "title", "ingredientsUsed", "instructions", "difficulty", "sourceUrl"]
                }
            }
        },
        "required": ["recipes"]
    })
}

pub fn impact_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "co2Saved": { "type": "STRING" },
            "moneySaved": { "type": "STRING" },
            "methanePrevented": { "type": "STRING" },
            "nutritionSummary": { "type": "STRING" }
        },
        "required": ["co2Saved", "moneySaved", "methanePrevented", "nutritionSummary"]
    })
}

pub fn metadata_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "category": { "type": "STRING", "enum": PRODUCT_CATEGORIES },
            "tags": string_list()
        },
        "required": ["category", "tags"]
    })
}
