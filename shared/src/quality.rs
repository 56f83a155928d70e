//! 质量检测流程
//!
//! 三个标签页（扫描 / 食谱 / 历史）的客户端状态机。
//! AI 调用本身由调用方完成，这里只负责：
//! - 生成请求参数
//! - 接收结果并推进状态
//! - 过滤、分组、去重等派生视图

use crate::error::{AiError, AiResult};
use crate::model::{
    DetectedItem, Difficulty, FoodCategory, QualityAnalysisResult, QualityHistoryItem,
    RecipeSuggestion,
};

/// 非配额错误时给用户的提示
pub const SCAN_FAILED_MESSAGE: &str = "Gagal melakukan analisis.";
pub const RECIPE_FAILED_MESSAGE: &str = "Gagal memuat resep.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityTab {
    #[default]
    Scan,
    Recipe,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowView {
    #[default]
    Input,
    Result,
    /// 配额耗尽，提示重试或更换 API Key
    QuotaExceeded,
}

/// 一次扫描请求的参数
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRequest {
    /// 扫描序号，结果返回时用于识别过期请求
    pub ticket: u64,
    pub ingredients: Vec<String>,
    pub image: Option<String>,
}

/// 一次食谱请求的参数
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRequest {
    pub items: Vec<DetectedItem>,
    /// 已展示的标题（小写）
    pub exclude_titles: Vec<String>,
    pub iteration: u32,
}

/// 扫描结束后调用方需要做的事
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// 成功，调用方把结果写入历史
    Completed(QualityAnalysisResult),
    QuotaExceeded,
    /// 其他失败，弹出提示
    Failed(&'static str),
    /// 请求已被新的扫描或重置取代，结果被丢弃
    Cancelled,
}

// =========================================================
// QualityCheckFlow
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct QualityCheckFlow {
    pub tab: QualityTab,
    pub view: FlowView,
    /// data URI
    pub image: Option<String>,
    pub ingredients: String,
    pub result: Option<QualityAnalysisResult>,
    pub recipes: Vec<RecipeSuggestion>,
    pub iteration: u32,
    pub can_load_more: bool,
    pub scanning: bool,
    pub recipes_loading: bool,
    pub more_loading: bool,
    pub recipe_query: String,
    pub difficulty_filter: Option<Difficulty>,
    pub show_tips: bool,
    scan_ticket: u64,
}

impl Default for QualityCheckFlow {
    fn default() -> Self {
        Self {
            tab: QualityTab::Scan,
            view: FlowView::Input,
            image: None,
            ingredients: String::new(),
            result: None,
            recipes: Vec::new(),
            iteration: 1,
            can_load_more: true,
            scanning: false,
            recipes_loading: false,
            more_loading: false,
            recipe_query: String::new(),
            difficulty_filter: None,
            show_tips: false,
            scan_ticket: 0,
        }
    }
}

impl QualityCheckFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tab(&mut self, tab: QualityTab) {
        self.tab = tab;
    }

    pub fn set_image(&mut self, data_uri: impl Into<String>) {
        self.image = Some(data_uri.into());
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn set_ingredients(&mut self, text: impl Into<String>) {
        self.ingredients = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.scanning && (self.image.is_some() || !self.ingredients.trim().is_empty())
    }

    // --- 扫描 ---

    /// 开始扫描：清空上一次的结果和食谱
    pub fn begin_scan(&mut self) -> Option<ScanRequest> {
        if !self.can_submit() {
            return None;
        }
        self.scanning = true;
        self.scan_ticket += 1;
        self.result = None;
        self.recipes.clear();
        self.iteration = 1;
        self.can_load_more = true;

        let text = self.ingredients.trim();
        let ingredients = if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
        Some(ScanRequest {
            ticket: self.scan_ticket,
            ingredients,
            image: self.image.clone(),
        })
    }

    pub fn finish_scan(
        &mut self,
        ticket: u64,
        outcome: AiResult<QualityAnalysisResult>,
    ) -> ScanOutcome {
        if ticket != self.scan_ticket {
            log::debug!("[QualityCheck] Dropping stale scan #{}", ticket);
            return ScanOutcome::Cancelled;
        }
        self.scanning = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                self.view = FlowView::Result;
                ScanOutcome::Completed(result)
            }
            Err(AiError::Cancelled) => {
                self.view = FlowView::Input;
                ScanOutcome::Cancelled
            }
            Err(e) if e.is_quota_exceeded() => {
                log::warn!("[QualityCheck] Quota exhausted: {}", e);
                self.view = FlowView::QuotaExceeded;
                ScanOutcome::QuotaExceeded
            }
            Err(e) => {
                log::error!("[QualityCheck] Analysis failed ({}): {}", e.error_code(), e);
                self.view = FlowView::Input;
                ScanOutcome::Failed(SCAN_FAILED_MESSAGE)
            }
        }
    }

    /// 从配额页返回输入页，保留已填写的内容
    pub fn retry(&mut self) {
        self.view = FlowView::Input;
    }

    /// 结果页上的 "扫描新食材"
    pub fn start_over(&mut self) {
        self.cancel_scan();
        self.view = FlowView::Input;
        self.image = None;
        self.ingredients.clear();
        self.result = None;
        self.recipes.clear();
        self.iteration = 1;
        self.can_load_more = true;
    }

    /// 放弃进行中的扫描，之后返回的结果会被丢弃
    pub fn cancel_scan(&mut self) {
        if self.scanning {
            self.scanning = false;
            self.scan_ticket += 1;
        }
    }

    /// 打开一条历史记录的结果
    pub fn show_history_entry(&mut self, entry: &QualityHistoryItem) {
        self.cancel_scan();
        self.result = Some(entry.details.clone());
        self.image = entry.thumbnail.clone();
        self.recipes.clear();
        self.iteration = 1;
        self.can_load_more = true;
        self.view = FlowView::Result;
        self.tab = QualityTab::Scan;
    }

    /// 按分类分组的检测结果，分类按首次出现的顺序
    pub fn grouped_items(&self) -> Vec<(FoodCategory, Vec<String>)> {
        match &self.result {
            Some(result) => group_detected_items(&result.detected_items),
            None => Vec::new(),
        }
    }

    // --- 食谱 ---

    pub fn has_ingredients(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|r| !r.detected_items.is_empty())
    }

    /// 首次加载食谱：切换到食谱页
    pub fn initial_recipes_request(&mut self) -> Option<RecipeRequest> {
        let items = self.result.as_ref()?.detected_items.clone();
        if items.is_empty() {
            return None;
        }
        self.tab = QualityTab::Recipe;
        self.recipes_loading = true;
        Some(RecipeRequest {
            items,
            exclude_titles: Vec::new(),
            iteration: 1,
        })
    }

    pub fn accept_initial(&mut self, outcome: AiResult<Vec<RecipeSuggestion>>) -> AiResult<()> {
        self.recipes_loading = false;
        let recipes = self.check_recipe_outcome(outcome)?;
        self.can_load_more = !recipes.is_empty();
        self.recipes = recipes;
        self.iteration = 2;
        Ok(())
    }

    /// 正在加载或已无更多时返回 None
    pub fn load_more_request(&mut self) -> Option<RecipeRequest> {
        if self.more_loading || !self.can_load_more {
            return None;
        }
        let items = self.result.as_ref()?.detected_items.clone();
        self.more_loading = true;
        Some(RecipeRequest {
            items,
            exclude_titles: self.shown_titles(),
            iteration: self.iteration,
        })
    }

    /// 追加新食谱，返回实际新增的条数
    pub fn accept_more(&mut self, outcome: AiResult<Vec<RecipeSuggestion>>) -> AiResult<usize> {
        self.more_loading = false;
        let more = self.check_recipe_outcome(outcome)?;
        let fresh = dedupe_recipes(&self.recipes, more);
        if fresh.is_empty() {
            self.can_load_more = false;
            return Ok(0);
        }
        let added = fresh.len();
        self.recipes.extend(fresh);
        self.iteration += 1;
        Ok(added)
    }

    fn check_recipe_outcome(
        &mut self,
        outcome: AiResult<Vec<RecipeSuggestion>>,
    ) -> AiResult<Vec<RecipeSuggestion>> {
        outcome.inspect_err(|e| {
            log::error!("[QualityCheck] Recipe request failed ({}): {}", e.error_code(), e);
            if e.is_quota_exceeded() {
                self.view = FlowView::QuotaExceeded;
            }
        })
    }

    pub fn shown_titles(&self) -> Vec<String> {
        self.recipes.iter().map(|r| r.title.to_lowercase()).collect()
    }

    pub fn set_recipe_query(&mut self, query: impl Into<String>) {
        self.recipe_query = query.into();
    }

    /// 再次选择同一难度时取消过滤
    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty_filter = if self.difficulty_filter == Some(difficulty) {
            None
        } else {
            Some(difficulty)
        };
    }

    pub fn filtered_recipes(&self) -> Vec<&RecipeSuggestion> {
        filter_recipes(&self.recipes, &self.recipe_query, self.difficulty_filter)
    }
}

pub fn group_detected_items(items: &[DetectedItem]) -> Vec<(FoodCategory, Vec<String>)> {
    let mut groups: Vec<(FoodCategory, Vec<String>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(cat, _)| *cat == item.category) {
            Some((_, names)) => names.push(item.name.clone()),
            None => groups.push((item.category, vec![item.name.clone()])),
        }
    }
    groups
}

/// 去掉标题（不区分大小写）已存在的食谱，包括新结果内部的重复
pub fn dedupe_recipes(
    existing: &[RecipeSuggestion],
    incoming: Vec<RecipeSuggestion>,
) -> Vec<RecipeSuggestion> {
    let mut seen: Vec<String> = existing.iter().map(|r| r.title.to_lowercase()).collect();
    incoming
        .into_iter()
        .filter(|r| {
            let title = r.title.to_lowercase();
            if seen.contains(&title) {
                false
            } else {
                seen.push(title);
                true
            }
        })
        .collect()
}

pub fn filter_recipes<'a>(
    recipes: &'a [RecipeSuggestion],
    query: &str,
    difficulty: Option<Difficulty>,
) -> Vec<&'a RecipeSuggestion> {
    let query = query.trim().to_lowercase();
    recipes
        .iter()
        .filter(|r| {
            query.is_empty()
                || r.title.to_lowercase().contains(&query)
                || r
                    .ingredients_used
                    .iter()
                    .any(|i| i.to_lowercase().contains(&query))
        })
        .filter(|r| difficulty.is_none_or(|d| r.difficulty == d))
        .collect()
}

// =========================================================
// 历史记录选择
// =========================================================

/// 历史页的搜索、多选和删除确认
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorySelection {
    pub query: String,
    pub selecting: bool,
    selected: Vec<i64>,
    pending_delete: bool,
}

impl HistorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// 按检测到的食材名、分析说明、日期搜索
    pub fn filter<'a>(&self, history: &'a [QualityHistoryItem]) -> Vec<&'a QualityHistoryItem> {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return history.iter().collect();
        }
        history
            .iter()
            .filter(|h| {
                h.date.to_lowercase().contains(&query)
                    || h.details.reasoning.to_lowercase().contains(&query)
                    || h.details
                        .detected_items
                        .iter()
                        .any(|i| i.name.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// 退出多选时清空已选
    pub fn toggle_select_mode(&mut self) {
        self.selecting = !self.selecting;
        if !self.selecting {
            self.selected.clear();
            self.pending_delete = false;
        }
    }

    pub fn toggle(&mut self, id: i64) {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// 全部已选时取消全选，否则选中所有可见项
    pub fn select_all(&mut self, visible: &[i64]) {
        let all_selected = !visible.is_empty() && visible.iter().all(|id| self.is_selected(*id));
        if all_selected {
            self.selected.retain(|id| !visible.contains(id));
        } else {
            for id in visible {
                if !self.is_selected(*id) {
                    self.selected.push(*id);
                }
            }
        }
    }

    /// 有选中项时进入待确认状态
    pub fn request_delete(&mut self) -> bool {
        self.pending_delete = !self.selected.is_empty();
        self.pending_delete
    }

    pub fn is_pending_delete(&self) -> bool {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = false;
    }

    /// 确认删除，返回要删除的 id；未请求过删除时返回空
    pub fn confirm_delete(&mut self) -> Vec<i64> {
        if !self.pending_delete {
            return Vec::new();
        }
        self.pending_delete = false;
        self.selecting = false;
        std::mem::take(&mut self.selected)
    }
}

#[cfg(test)]
mod tests;
