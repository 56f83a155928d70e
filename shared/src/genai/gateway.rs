use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::{json, Value};

use super::location::{attach_maps_uris, coordinate_fallback, parse_locations};
use super::prompt;
use super::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use super::schema;
use super::GeminiConfig;
use crate::error::{AiError, AiResult};
use crate::model::{
    DetectedItem, FoodMetadata, ImpactEstimate, LocationInfo, QualityAnalysisResult,
    RecipeSuggestion,
};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

// =========================================================
// 请求构造
// =========================================================

/// 拆分 data URI，返回 (mimeType, base64 数据)
///
/// 没有 `data:` 头时整段视为 JPEG 数据。
pub fn split_data_uri(data_uri: &str) -> (String, String) {
    match data_uri.split_once(',') {
        Some((header, data)) => {
            let mime = header
                .strip_prefix("data:")
                .and_then(|h| h.split(';').next())
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MIME);
            (mime.to_string(), data.to_string())
        }
        None => (DEFAULT_IMAGE_MIME.to_string(), data_uri.to_string()),
    }
}

fn inline_image_part(data_uri: &str) -> Value {
    let (mime_type, data) = split_data_uri(data_uri);
    json!({ "inlineData": { "mimeType": mime_type, "data": data } })
}

fn text_part(text: &str) -> Value {
    json!({ "text": text })
}

fn json_generation_config(schema: Value) -> Value {
    json!({
        "responseMimeType": "application/json",
        "responseSchema": schema
    })
}

fn lat_lng_tool_config(coords: Option<(f64, f64)>) -> Option<Value> {
    coords.map(|(lat, lng)| {
        json!({
            "retrievalConfig": { "latLng": { "latitude": lat, "longitude": lng } }
        })
    })
}

// =========================================================
// 响应解析
// =========================================================

/// 失败分类：配额 / 限流优先识别
pub fn classify_failure(status: u16, body: &str) -> AiError {
    let root: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let error = root.get("error");
    let api_status = error
        .and_then(|e| e.get("status"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(body)
        .to_string();

    if status == 429 || api_status == "RESOURCE_EXHAUSTED" || mentions_quota(&message) {
        AiError::RateLimited(message)
    } else {
        AiError::Transport(format!("HTTP {}: {}", status, message))
    }
}

fn mentions_quota(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("quota") || lower.contains("rate limit") || lower.contains("resource_exhausted")
}

/// 网络层错误的消息里也可能带有配额标记
fn reclassify(error: AiError) -> AiError {
    match error {
        AiError::Transport(msg) if mentions_quota(&msg) => AiError::RateLimited(msg),
        other => other,
    }
}

/// 拼接第一个候选的全部文本片段
pub fn candidate_text(root: &Value) -> AiResult<String> {
    let parts = root
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::SchemaMismatch("response has no candidate content".into()))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(AiError::SchemaMismatch("candidate text is empty".into()));
    }
    Ok(text)
}

/// 地图检索返回的来源链接
pub fn grounding_maps_uris(root: &Value) -> Vec<String> {
    root.pointer("/candidates/0/groundingMetadata/groundingChunks")
        .and_then(Value::as_array)
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|c| c.pointer("/maps/uri").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// 取出 Markdown 代码块中的内容，没有代码块时原样返回
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };
    // 跳过 ```json 这类语言标记
    let body = trimmed[open + 3..].trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// 去掉 Markdown 代码块，截取第一个能完整解析的 JSON 值
///
/// 模型常在 JSON 前写一段带括号的说明文字，所以逐个尝试 `{` / `[` 起点。
pub fn extract_json(text: &str) -> &str {
    let body = strip_fences(text);
    for (start, _) in body.match_indices(['{', '[']) {
        let rest = &body[start..];
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<IgnoredAny>();
        if let Some(Ok(_)) = stream.next() {
            return &rest[..stream.byte_offset()];
        }
    }
    body
}

fn parse_json_text<T: DeserializeOwned>(text: &str) -> AiResult<T> {
    serde_json::from_str(extract_json(text)).map_err(AiError::from)
}

// =========================================================
// Gateway
// =========================================================

pub struct GeminiGateway<'a, C: HttpClient> {
    client: &'a C,
    config: &'a GeminiConfig,
}

impl<'a, C: HttpClient> GeminiGateway<'a, C> {
    pub fn new(client: &'a C, config: &'a GeminiConfig) -> Self {
        Self { client, config }
    }

    async fn generate(&self, operation: &str, model: &str, body: Value) -> AiResult<Value> {
        if !self.config.has_api_key() {
            return Err(AiError::Transport("API key is not configured".into()));
        }
        log::info!("[Gemini] {} via {}", operation, model);

        let req = HttpRequest::new(&self.config.endpoint(model), HttpMethod::Post)
            .with_header("Content-Type", "application/json")
            .with_header("x-goog-api-key", &self.config.api_key)
            .with_body(body);

        let resp: HttpResponse = self.client.send(req).await.map_err(reclassify)?;
        if !resp.is_success() {
            let err = classify_failure(resp.status, &resp.body);
            log::warn!("[Gemini] {} failed ({}): {}", operation, err.error_code(), err);
            return Err(err);
        }

        resp.json::<Value>().inspect_err(|e| {
            log::warn!("[Gemini] {} returned a non-JSON body: {}", operation, e);
        })
    }

    /// 质量分析：文本 + 可选图片，返回固定结构
    pub async fn analyze_food_quality(
        &self,
        ingredients: &[String],
        image: Option<&str>,
    ) -> AiResult<QualityAnalysisResult> {
        let mut parts = vec![text_part(&prompt::quality_prompt(ingredients))];
        if let Some(image) = image {
            parts.push(inline_image_part(image));
        }

        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": json_generation_config(schema::quality_schema()),
        });

        let root = self
            .generate("analyze_food_quality", &self.config.analysis_model, body)
            .await?;
        let result: QualityAnalysisResult = parse_json_text(&candidate_text(&root)?)?;
        if result.hygiene_score > 100 || result.quality_percentage > 100 {
            return Err(AiError::SchemaMismatch(format!(
                "score out of range: hygiene {}, quality {}",
                result.hygiene_score, result.quality_percentage
            )));
        }
        Ok(result)
    }

    /// 食谱搜索（Google 搜索增强）
    pub async fn generate_recipes(
        &self,
        items: &[DetectedItem],
        exclude_titles: &[String],
        iteration: u32,
    ) -> AiResult<Vec<RecipeSuggestion>> {
        let body = json!({
            "contents": [{ "parts": [text_part(&prompt::recipes_prompt(items, exclude_titles, iteration))] }],
            "tools": [{ "googleSearch": {} }],
            "generationConfig": json_generation_config(schema::recipes_schema()),
        });

        let root = self
            .generate("generate_recipes", &self.config.analysis_model, body)
            .await?;
        let value: Value = parse_json_text(&candidate_text(&root)?)?;

        // 兼容 {"recipes": [...]} 和直接返回数组两种形式
        let list = match value {
            Value::Object(mut obj) => obj
                .remove("recipes")
                .ok_or_else(|| AiError::SchemaMismatch("missing 'recipes' field".into()))?,
            array @ Value::Array(_) => array,
            other => {
                return Err(AiError::SchemaMismatch(format!(
                    "unexpected recipes payload: {}",
                    other
                )))
            }
        };

        let mut recipes: Vec<RecipeSuggestion> = serde_json::from_value(list)?;
        for recipe in &mut recipes {
            if recipe.id.is_empty() {
                recipe.id = uuid::Uuid::new_v4().to_string();
            }
            if recipe.source_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
                recipe.source_url = None;
            }
        }
        Ok(recipes)
    }

    async fn maps_lookup(
        &self,
        operation: &str,
        prompt: String,
        coords: Option<(f64, f64)>,
    ) -> AiResult<(Vec<LocationInfo>, Vec<String>)> {
        let mut body = json!({
            "contents": [{ "parts": [text_part(&prompt)] }],
            "tools": [{ "googleMaps": {} }],
        });
        if let Some(tool_config) = lat_lng_tool_config(coords) {
            body["toolConfig"] = tool_config;
        }

        let root = self.generate(operation, &self.config.maps_model, body).await?;
        let uris = grounding_maps_uris(&root);
        let text = candidate_text(&root)?;
        Ok((parse_locations(&text), uris))
    }

    /// 坐标反查地址；无法解析时地址退化为坐标字符串
    pub async fn search_location_by_coords(&self, lat: f64, lng: f64) -> AiResult<LocationInfo> {
        let (locations, uris) = self
            .maps_lookup(
                "search_location_by_coords",
                prompt::coords_prompt(lat, lng),
                Some((lat, lng)),
            )
            .await?;

        let mut info = locations.into_iter().next().unwrap_or_default();
        if info.address.is_empty() {
            log::warn!("[Location] Could not parse an address for {}, {}", lat, lng);
            info.address = coordinate_fallback(lat, lng);
        }
        if info.maps_uri.is_none() {
            info.maps_uri = uris.into_iter().next();
        }
        Ok(info)
    }

    /// 文本搜索地点，可选用户坐标作为检索中心
    pub async fn search_location_by_query(
        &self,
        query: &str,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> AiResult<Vec<LocationInfo>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let coords = lat.zip(lng);
        let (mut locations, uris) = self
            .maps_lookup(
                "search_location_by_query",
                prompt::place_query_prompt(query),
                coords,
            )
            .await?;
        attach_maps_uris(&mut locations, &uris);
        Ok(locations)
    }

    pub async fn analyze_impact(&self, food_name: &str, quantity: &str) -> AiResult<ImpactEstimate> {
        let body = json!({
            "contents": [{ "parts": [text_part(&prompt::impact_prompt(food_name, quantity))] }],
            "generationConfig": json_generation_config(schema::impact_schema()),
        });
        let root = self
            .generate("analyze_impact", &self.config.analysis_model, body)
            .await?;
        parse_json_text(&candidate_text(&root)?)
    }

    /// 商品上传时从描述和图片提取分类与标签
    pub async fn extract_food_metadata(
        &self,
        description: &str,
        image: Option<&str>,
    ) -> AiResult<FoodMetadata> {
        let mut parts = vec![text_part(&prompt::metadata_prompt(description))];
        if let Some(image) = image {
            parts.push(inline_image_part(image));
        }
        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": json_generation_config(schema::metadata_schema()),
        });
        let root = self
            .generate("extract_food_metadata", &self.config.analysis_model, body)
            .await?;
        parse_json_text(&candidate_text(&root)?)
    }
}
