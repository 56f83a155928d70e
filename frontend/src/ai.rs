use foodrescue_shared::genai::{GeminiConfig, GeminiGateway};
use foodrescue_shared::{
    AiResult, DetectedItem, FoodMetadata, ImpactEstimate, LocationInfo, QualityAnalysisResult,
    RecipeSuggestion,
};

use crate::config::load_gemini_config;
use crate::web::FetchClient;

static CLIENT: FetchClient = FetchClient;

/// AI 服务入口
///
/// 每次调用前重新读取配置，这样在配额页更换的密钥立即生效。
#[derive(Clone, Debug, PartialEq)]
pub struct AiService {
    config: GeminiConfig,
}

impl AiService {
    pub fn load() -> Self {
        Self {
            config: load_gemini_config(),
        }
    }

    fn gateway(&self) -> GeminiGateway<'_, FetchClient> {
        GeminiGateway::new(&CLIENT, &self.config)
    }

    pub async fn analyze_food_quality(
        &self,
        ingredients: &[String],
        image: Option<&str>,
    ) -> AiResult<QualityAnalysisResult> {
        self.gateway().analyze_food_quality(ingredients, image).await
    }

    pub async fn generate_recipes(
        &self,
        items: &[DetectedItem],
        exclude_titles: &[String],
        iteration: u32,
    ) -> AiResult<Vec<RecipeSuggestion>> {
        self.gateway()
            .generate_recipes(items, exclude_titles, iteration)
            .await
    }

    pub async fn search_location_by_coords(&self, lat: f64, lng: f64) -> AiResult<LocationInfo> {
        self.gateway().search_location_by_coords(lat, lng).await
    }

    pub async fn search_location_by_query(
        &self,
        query: &str,
        coords: Option<(f64, f64)>,
    ) -> AiResult<Vec<LocationInfo>> {
        let (lat, lng) = coords.unzip();
        self.gateway().search_location_by_query(query, lat, lng).await
    }

    pub async fn analyze_impact(&self, food_name: &str, quantity: &str) -> AiResult<ImpactEstimate> {
        self.gateway().analyze_impact(food_name, quantity).await
    }

    pub async fn extract_food_metadata(
        &self,
        description: &str,
        image: Option<&str>,
    ) -> AiResult<FoodMetadata> {
        self.gateway().extract_food_metadata(description, image).await
    }
}
