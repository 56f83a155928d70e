use serde_json::{json, Value};

use super::gateway::{classify_failure, extract_json, split_data_uri};
use super::request::{HttpMethod, MockHttpClient};
use super::*;
use crate::error::AiError;
use crate::model::{DetectedItem, Difficulty, FoodCategory};

const TEST_BASE: &str = "https://ai.test/v1beta";

fn config() -> GeminiConfig {
    GeminiConfig::new("test-key").with_base_url(TEST_BASE)
}

fn analysis_url() -> String {
    format!("{}/models/{}:generateContent", TEST_BASE, DEFAULT_ANALYSIS_MODEL)
}

fn maps_url() -> String {
    format!("{}/models/{}:generateContent", TEST_BASE, DEFAULT_MAPS_MODEL)
}

/// 模拟 generateContent 的成功响应
fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn quality_json() -> Value {
    json!({
        "isSafe": true,
        "isHalal": true,
        "halalReasoning": "Tidak mengandung babi",
        "reasoning": "Sayuran segar",
        "allergens": [],
        "shelfLifePrediction": "2 hari",
        "hygieneScore": 88,
        "qualityPercentage": 92,
        "detectedItems": [
            { "name": "Bayam", "category": "Sayur" },
            { "name": "Tempe", "category": "Protein" }
        ],
        "storageTips": ["Simpan di kulkas"],
        "environmentalImpact": { "co2Saved": "0.3 kg", "waterSaved": "15 L" },
        "hygieneBreakdown": ["Kebersihan: 90"]
    })
}

fn items() -> Vec<DetectedItem> {
    vec![
        DetectedItem { name: "Bayam".into(), category: FoodCategory::Sayur },
        DetectedItem { name: "Tempe".into(), category: FoodCategory::Protein },
    ]
}

// =========================================================
// 配置与请求格式
// =========================================================

#[test]
fn endpoint_joins_base_and_model() {
    let cfg = GeminiConfig::new("k").with_base_url("https://x.test/v1/");
    assert_eq!(
        cfg.endpoint("gemini-2.5-flash"),
        "https://x.test/v1/models/gemini-2.5-flash:generateContent"
    );
    assert!(!GeminiConfig::default().has_api_key());
    assert_eq!(GeminiConfig::default().base_url, DEFAULT_BASE_URL);
}

#[test]
fn data_uri_is_split_into_mime_and_payload() {
    assert_eq!(
        split_data_uri("data:image/png;base64,iVBORw0"),
        ("image/png".to_string(), "iVBORw0".to_string())
    );
    assert_eq!(
        split_data_uri("/9j/4AAQ"),
        ("image/jpeg".to_string(), "/9j/4AAQ".to_string())
    );
}

#[test]
fn json_is_extracted_from_fenced_reply() {
    assert_eq!(extract_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(extract_json(" [1,2] "), "[1,2]");
    assert_eq!(extract_json("tidak ada"), "tidak ada");
}

#[test]
fn bracketed_prose_before_json_is_skipped() {
    assert_eq!(
        extract_json("Berikut [5 resep]:\n{\"recipes\": []}"),
        "{\"recipes\": []}"
    );
    assert_eq!(
        extract_json("Hasil {lihat bawah}:\n```json\n{\"a\": [1]}\n```\nSemoga membantu [1]."),
        "{\"a\": [1]}"
    );
    assert_eq!(extract_json("{\"a\": 1} catatan: {b}"), "{\"a\": 1}");
}

// =========================================================
// 失败分类
// =========================================================

#[test]
fn quota_markers_are_rate_limits() {
    assert!(matches!(classify_failure(429, "{}"), AiError::RateLimited(_)));

    let exhausted = json!({
        "error": { "code": 400, "status": "RESOURCE_EXHAUSTED", "message": "Try later" }
    })
    .to_string();
    assert!(matches!(classify_failure(400, &exhausted), AiError::RateLimited(_)));

    let quota_msg = json!({
        "error": { "code": 403, "status": "PERMISSION_DENIED", "message": "You exceeded your current quota" }
    })
    .to_string();
    assert!(matches!(classify_failure(403, &quota_msg), AiError::RateLimited(_)));
}

#[test]
fn other_failures_are_transport_errors() {
    let body = json!({ "error": { "code": 500, "status": "INTERNAL", "message": "boom" } }).to_string();
    assert_eq!(
        classify_failure(500, &body),
        AiError::Transport("HTTP 500: boom".into())
    );
    assert_eq!(
        classify_failure(502, "Bad Gateway"),
        AiError::Transport("HTTP 502: Bad Gateway".into())
    );
}

#[tokio::test]
async fn missing_api_key_fails_without_request() {
    let client = MockHttpClient::new();
    let cfg = GeminiConfig::default();
    let gateway = GeminiGateway::new(&client, &cfg);

    let err = gateway.analyze_impact("Roti", "2 Paket").await.unwrap_err();
    assert_eq!(err.error_code(), "TRANSPORT_ERROR");
    assert!(client.requests.borrow().is_empty());
}

#[tokio::test]
async fn transport_quota_message_is_reclassified() {
    let client = MockHttpClient::new();
    client.mock_failure(
        &analysis_url(),
        AiError::Transport("Rate limit reached for requests".into()),
    );
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let err = gateway
        .analyze_food_quality(&["roti".to_string()], None)
        .await
        .unwrap_err();
    assert!(err.is_quota_exceeded());
}

#[tokio::test]
async fn http_429_is_rate_limited() {
    let client = MockHttpClient::new();
    client.mock_response(
        &analysis_url(),
        429,
        json!({ "error": { "code": 429, "status": "RESOURCE_EXHAUSTED", "message": "Quota exceeded" } }),
    );
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let err = gateway
        .analyze_food_quality(&["roti".to_string()], None)
        .await
        .unwrap_err();
    assert_eq!(err, AiError::RateLimited("Quota exceeded".into()));
}

// =========================================================
// 质量分析
// =========================================================

#[tokio::test]
async fn quality_request_carries_prompt_image_and_schema() {
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, candidate(&quality_json().to_string()));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let result = gateway
        .analyze_food_quality(&["bayam, tempe".to_string()], Some("data:image/png;base64,AAAA"))
        .await
        .unwrap();
    assert!(result.is_safe);
    assert_eq!(result.hygiene_score, 88);
    assert_eq!(result.detected_items[1].category, FoodCategory::Protein);

    let requests = client.requests.borrow();
    let (url, method, headers, _) = &requests[0];
    assert_eq!(url, &analysis_url());
    assert_eq!(*method, HttpMethod::Post);
    assert_eq!(headers.get("x-goog-api-key").map(String::as_str), Some("test-key"));
    drop(requests);

    let body = client.last_body();
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert!(parts[0]["text"].as_str().unwrap().contains("Bahan: bayam, tempe."));
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
    assert_eq!(parts[1]["inlineData"]["data"], "AAAA");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["properties"]["detectedItems"]["items"]["properties"]["category"]["enum"][7],
        "Lainnya"
    );
}

#[tokio::test]
async fn text_only_quality_request_has_single_part() {
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, candidate(&quality_json().to_string()));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    gateway.analyze_food_quality(&[], None).await.unwrap();
    let body = client.last_body();
    assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_quality_json_is_schema_mismatch() {
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, candidate("{\"isSafe\": \"mungkin\"}"));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let err = gateway.analyze_food_quality(&[], None).await.unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_MISMATCH");
}

#[tokio::test]
async fn out_of_range_scores_are_rejected() {
    let mut payload = quality_json();
    payload["hygieneScore"] = json!(250);
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, candidate(&payload.to_string()));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let err = gateway.analyze_food_quality(&[], None).await.unwrap_err();
    assert!(matches!(err, AiError::SchemaMismatch(_)));
}

#[tokio::test]
async fn empty_candidates_are_schema_mismatch() {
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, json!({ "candidates": [] }));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let err = gateway.analyze_food_quality(&[], None).await.unwrap_err();
    assert!(matches!(err, AiError::SchemaMismatch(_)));
}

// =========================================================
// 食谱
// =========================================================

#[tokio::test]
async fn recipes_are_parsed_and_request_is_grounded() {
    let reply = json!({
        "recipes": [
            {
                "id": "r1",
                "title": "Tumis Bayam Tempe",
                "ingredientsUsed": ["Bayam", "Tempe"],
                "instructions": "Tumis bawang\nMasukkan bayam",
                "difficulty": "Mudah",
                "sourceUrl": "https://cookpad.com/id/resep/1"
            },
            {
                "id": "",
                "title": "Sayur Bening",
                "ingredientsUsed": ["Bayam"],
                "instructions": ["Rebus air", "Masukkan bayam"],
                "difficulty": "sulit",
                "sourceUrl": ""
            }
        ]
    });
    let client = MockHttpClient::new();
    client.mock_response(
        &analysis_url(),
        200,
        candidate(&format!("```json\n{}\n```", reply)),
    );
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let recipes = gateway
        .generate_recipes(&items(), &["sup bayam".to_string()], 2)
        .await
        .unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].id, "r1");
    assert_eq!(recipes[0].instructions.steps().len(), 2);
    assert!(!recipes[1].id.is_empty());
    assert_eq!(recipes[1].difficulty, Difficulty::Sulit);
    assert_eq!(recipes[1].source_url, None);

    let body = client.last_body();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.starts_with("Cari 5 resep Cookpad Indonesia dari bahan: Bayam, Tempe. Iterasi: 2."));
    assert!(prompt.contains("sup bayam"));
    assert_eq!(body["tools"][0], json!({ "googleSearch": {} }));
}

#[tokio::test]
async fn bare_recipe_array_is_accepted() {
    let reply = json!([{ "title": "Oseng Tempe", "difficulty": "Sedang" }]);
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, candidate(&reply.to_string()));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let recipes = gateway.generate_recipes(&items(), &[], 1).await.unwrap();
    assert_eq!(recipes[0].title, "Oseng Tempe");
}

#[tokio::test]
async fn recipes_after_grounded_prose_are_accepted() {
    let reply = json!({ "recipes": [{ "title": "Nasi Goreng Sisa", "difficulty": "Mudah" }] });
    let text = format!("Saya menemukan [2] resep di Cookpad (lihat sumber):\n{}", reply);
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, candidate(&text));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let recipes = gateway.generate_recipes(&items(), &[], 1).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "Nasi Goreng Sisa");
}

#[tokio::test]
async fn recipe_failures_are_returned_not_swallowed() {
    let client = MockHttpClient::new();
    client.mock_response(&analysis_url(), 200, candidate("{\"hasil\": []}"));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let err = gateway.generate_recipes(&items(), &[], 1).await.unwrap_err();
    assert!(matches!(err, AiError::SchemaMismatch(_)));
}

// =========================================================
// 位置
// =========================================================

#[tokio::test]
async fn coords_lookup_parses_fields_and_sends_lat_lng() {
    let mut reply = candidate(
        "NAMA_TEMPAT: Gedung Sate\nALAMAT: Jl. Diponegoro No.22\nKOTA: Bandung\nPROVINSI: Jawa Barat\nKODE_POS: 40115\nRT: 01\nRW: 02",
    );
    reply["candidates"][0]["groundingMetadata"] = json!({
        "groundingChunks": [{ "maps": { "uri": "https://maps.google.com/?cid=42", "title": "Gedung Sate" } }]
    });
    let client = MockHttpClient::new();
    client.mock_response(&maps_url(), 200, reply);
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let info = gateway.search_location_by_coords(-6.9025, 107.6188).await.unwrap();
    assert_eq!(info.place_name, "Gedung Sate");
    assert_eq!(info.city, "Bandung");
    assert_eq!(info.postal_code, "40115");
    assert_eq!(info.maps_uri.as_deref(), Some("https://maps.google.com/?cid=42"));

    let body = client.last_body();
    assert_eq!(body["tools"][0], json!({ "googleMaps": {} }));
    assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], -6.9025);
    assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["longitude"], 107.6188);
}

#[tokio::test]
async fn unparsable_coords_reply_falls_back_to_coordinates() {
    let client = MockHttpClient::new();
    client.mock_response(&maps_url(), 200, candidate("Maaf, lokasi tidak ditemukan."));
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let info = gateway.search_location_by_coords(-6.2, 106.8).await.unwrap();
    assert_eq!(info.address, "Koordinat: -6.2, 106.8");
    assert!(info.place_name.is_empty());
}

#[tokio::test]
async fn blank_address_line_still_falls_back_to_coordinates() {
    let client = MockHttpClient::new();
    client.mock_response(
        &maps_url(),
        200,
        candidate("NAMA_TEMPAT: Rumah Budi\nALAMAT:\nKOTA: Bandung"),
    );
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let info = gateway.search_location_by_coords(-6.9, 107.6).await.unwrap();
    assert_eq!(info.place_name, "Rumah Budi");
    assert_eq!(info.city, "Bandung");
    assert_eq!(info.address, "Koordinat: -6.9, 107.6");
}

#[tokio::test]
async fn query_search_returns_all_records() {
    let mut reply = candidate(
        "NAMA_TEMPAT: Monas\nALAMAT: Gambir\nKOTA: Jakarta Pusat\n---\nNAMA_TEMPAT: Kota Tua\nALAMAT: Pinangsia\nKOTA: Jakarta Barat",
    );
    reply["candidates"][0]["groundingMetadata"] = json!({
        "groundingChunks": [
            { "maps": { "uri": "https://maps.google.com/?cid=1" } },
            { "web": { "uri": "https://example.com" } },
            { "maps": { "uri": "https://maps.google.com/?cid=2" } }
        ]
    });
    let client = MockHttpClient::new();
    client.mock_response(&maps_url(), 200, reply);
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let results = gateway
        .search_location_by_query("wisata jakarta", None, None)
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].place_name, "Kota Tua");
    assert_eq!(results[1].maps_uri.as_deref(), Some("https://maps.google.com/?cid=2"));

    // 没有坐标时不附带 toolConfig
    assert!(client.last_body().get("toolConfig").is_none());
}

#[tokio::test]
async fn blank_query_sends_nothing() {
    let client = MockHttpClient::new();
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    assert!(gateway.search_location_by_query("  ", None, None).await.unwrap().is_empty());
    assert!(client.requests.borrow().is_empty());
}

// =========================================================
// 影响估算 / 元数据
// =========================================================

#[tokio::test]
async fn impact_and_metadata_are_structured() {
    let client = MockHttpClient::new();
    client.mock_response(
        &analysis_url(),
        200,
        candidate(
            &json!({
                "co2Saved": "0.5 kg",
                "moneySaved": "Rp 15.000",
                "methanePrevented": "0.1 kg",
                "nutritionSummary": "Kaya serat."
            })
            .to_string(),
        ),
    );
    let cfg = config();
    let gateway = GeminiGateway::new(&client, &cfg);

    let impact = gateway.analyze_impact("Roti Manis", "5 Paket").await.unwrap();
    assert_eq!(impact.money_saved, "Rp 15.000");
    let body = client.last_body();
    assert!(body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("5 Paket Roti Manis"));

    client.mock_response(
        &analysis_url(),
        200,
        candidate(&json!({ "category": "Makanan Berat", "tags": ["Nasi", "Lauk"] }).to_string()),
    );
    let meta = gateway
        .extract_food_metadata("Identifikasi makanan ini", Some("data:image/jpeg;base64,/9j/"))
        .await
        .unwrap();
    assert_eq!(meta.category, "Makanan Berat");
    assert_eq!(meta.tags, vec!["Nasi", "Lauk"]);
    let body = client.last_body();
    assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["properties"]["category"]["enum"][0],
        "Makanan Berat"
    );
}
