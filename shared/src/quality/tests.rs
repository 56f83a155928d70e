use super::*;
use crate::error::AiError;
use crate::model::RecipeInstructions;

fn detected(name: &str, category: FoodCategory) -> DetectedItem {
    DetectedItem {
        name: name.into(),
        category,
    }
}

fn analysis() -> QualityAnalysisResult {
    QualityAnalysisResult {
        is_safe: true,
        is_halal: true,
        reasoning: "Sayuran masih segar".into(),
        hygiene_score: 85,
        quality_percentage: 90,
        detected_items: vec![
            detected("Bayam", FoodCategory::Sayur),
            detected("Ayam", FoodCategory::Protein),
            detected("Wortel", FoodCategory::Sayur),
        ],
        ..Default::default()
    }
}

fn recipe(title: &str, difficulty: Difficulty, ingredients: &[&str]) -> RecipeSuggestion {
    RecipeSuggestion {
        id: String::new(),
        title: title.into(),
        ingredients_used: ingredients.iter().map(|s| s.to_string()).collect(),
        instructions: RecipeInstructions::Text("Masak".into()),
        difficulty,
        source_url: None,
    }
}

fn scanned_flow() -> QualityCheckFlow {
    let mut flow = QualityCheckFlow::new();
    flow.set_ingredients("bayam, ayam");
    let req = flow.begin_scan().unwrap();
    flow.finish_scan(req.ticket, Ok(analysis()));
    flow
}

// =========================================================
// 扫描
// =========================================================

#[test]
fn cannot_submit_without_input() {
    let mut flow = QualityCheckFlow::new();
    assert!(!flow.can_submit());
    flow.set_ingredients("   ");
    assert!(flow.begin_scan().is_none());

    flow.set_image("data:image/png;base64,AAAA");
    assert!(flow.can_submit());
    let req = flow.begin_scan().unwrap();
    assert!(req.ingredients.is_empty());
    assert_eq!(req.image.as_deref(), Some("data:image/png;base64,AAAA"));
    // 扫描进行中不能重复提交
    assert!(!flow.can_submit());
}

#[test]
fn begin_scan_resets_previous_results() {
    let mut flow = scanned_flow();
    flow.initial_recipes_request().unwrap();
    flow.accept_initial(Ok(vec![recipe("Sup Bayam", Difficulty::Mudah, &["Bayam"])]))
        .unwrap();
    assert_eq!(flow.iteration, 2);

    let req = flow.begin_scan().unwrap();
    assert_eq!(req.ingredients, vec!["bayam, ayam".to_string()]);
    assert!(flow.result.is_none());
    assert!(flow.recipes.is_empty());
    assert_eq!(flow.iteration, 1);
    assert!(flow.can_load_more);
}

#[test]
fn successful_scan_shows_result() {
    let mut flow = QualityCheckFlow::new();
    flow.set_ingredients("roti");
    let req = flow.begin_scan().unwrap();
    let outcome = flow.finish_scan(req.ticket, Ok(analysis()));
    assert_eq!(outcome, ScanOutcome::Completed(analysis()));
    assert_eq!(flow.view, FlowView::Result);
    assert!(!flow.scanning);
}

#[test]
fn quota_error_switches_to_quota_view_and_retry_keeps_inputs() {
    let mut flow = QualityCheckFlow::new();
    flow.set_ingredients("roti");
    let req = flow.begin_scan().unwrap();
    let outcome = flow.finish_scan(req.ticket, Err(AiError::RateLimited("429".into())));
    assert_eq!(outcome, ScanOutcome::QuotaExceeded);
    assert_eq!(flow.view, FlowView::QuotaExceeded);

    flow.retry();
    assert_eq!(flow.view, FlowView::Input);
    assert_eq!(flow.ingredients, "roti");
    assert!(flow.can_submit());
}

#[test]
fn other_errors_give_generic_message() {
    let mut flow = QualityCheckFlow::new();
    flow.set_ingredients("roti");
    let req = flow.begin_scan().unwrap();
    let outcome = flow.finish_scan(req.ticket, Err(AiError::Transport("offline".into())));
    assert_eq!(outcome, ScanOutcome::Failed("Gagal melakukan analisis."));
    assert_eq!(flow.view, FlowView::Input);
}

#[test]
fn stale_scan_results_are_dropped() {
    let mut flow = QualityCheckFlow::new();
    flow.set_ingredients("roti");
    let first = flow.begin_scan().unwrap();
    flow.start_over();
    flow.set_ingredients("nasi");
    let second = flow.begin_scan().unwrap();
    assert_ne!(first.ticket, second.ticket);

    assert_eq!(flow.finish_scan(first.ticket, Ok(analysis())), ScanOutcome::Cancelled);
    assert!(flow.result.is_none());
    assert!(flow.scanning);

    let outcome = flow.finish_scan(second.ticket, Ok(analysis()));
    assert_eq!(outcome, ScanOutcome::Completed(analysis()));
}

#[test]
fn cancelled_error_returns_to_input_silently() {
    let mut flow = QualityCheckFlow::new();
    flow.set_ingredients("roti");
    let req = flow.begin_scan().unwrap();
    assert_eq!(flow.finish_scan(req.ticket, Err(AiError::Cancelled)), ScanOutcome::Cancelled);
    assert_eq!(flow.view, FlowView::Input);
    assert!(!flow.scanning);
}

#[test]
fn grouped_items_keep_first_appearance_order() {
    let flow = scanned_flow();
    let groups = flow.grouped_items();
    assert_eq!(
        groups,
        vec![
            (FoodCategory::Sayur, vec!["Bayam".to_string(), "Wortel".to_string()]),
            (FoodCategory::Protein, vec!["Ayam".to_string()]),
        ]
    );
    assert!(QualityCheckFlow::new().grouped_items().is_empty());
}

#[test]
fn start_over_clears_everything() {
    let mut flow = scanned_flow();
    flow.start_over();
    assert_eq!(flow.view, FlowView::Input);
    assert!(flow.result.is_none());
    assert!(flow.ingredients.is_empty());
}

// =========================================================
// 食谱
// =========================================================

#[test]
fn recipes_require_detected_items() {
    let mut flow = QualityCheckFlow::new();
    assert!(flow.initial_recipes_request().is_none());

    flow.result = Some(QualityAnalysisResult::default());
    assert!(!flow.has_ingredients());
    assert!(flow.initial_recipes_request().is_none());
}

#[test]
fn initial_request_moves_to_recipe_tab() {
    let mut flow = scanned_flow();
    let req = flow.initial_recipes_request().unwrap();
    assert_eq!(flow.tab, QualityTab::Recipe);
    assert_eq!(req.iteration, 1);
    assert!(req.exclude_titles.is_empty());
    assert_eq!(req.items.len(), 3);
}

#[test]
fn empty_initial_result_disables_load_more() {
    let mut flow = scanned_flow();
    flow.initial_recipes_request().unwrap();
    flow.accept_initial(Ok(Vec::new())).unwrap();
    assert!(!flow.can_load_more);
    assert_eq!(flow.iteration, 2);
    assert!(flow.load_more_request().is_none());
}

#[test]
fn load_more_dedupes_titles_case_insensitively() {
    let mut flow = scanned_flow();
    flow.initial_recipes_request().unwrap();
    flow.accept_initial(Ok(vec![
        recipe("Sup Bayam", Difficulty::Mudah, &["Bayam"]),
        recipe("Ayam Goreng", Difficulty::Sedang, &["Ayam"]),
    ]))
    .unwrap();

    let req = flow.load_more_request().unwrap();
    assert_eq!(req.iteration, 2);
    assert_eq!(req.exclude_titles, vec!["sup bayam", "ayam goreng"]);
    // 加载中不会发出第二个请求
    assert!(flow.load_more_request().is_none());

    let added = flow
        .accept_more(Ok(vec![
            recipe("SUP BAYAM", Difficulty::Mudah, &[]),
            recipe("Tumis Wortel", Difficulty::Mudah, &["Wortel"]),
            recipe("tumis wortel", Difficulty::Mudah, &["Wortel"]),
        ]))
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(flow.recipes.len(), 3);
    assert_eq!(flow.iteration, 3);
    assert!(flow.can_load_more);
}

#[test]
fn load_more_with_only_duplicates_stops_paging() {
    let mut flow = scanned_flow();
    flow.initial_recipes_request().unwrap();
    flow.accept_initial(Ok(vec![recipe("Sup Bayam", Difficulty::Mudah, &[])]))
        .unwrap();
    flow.load_more_request().unwrap();
    let added = flow
        .accept_more(Ok(vec![recipe("sup bayam", Difficulty::Sulit, &[])]))
        .unwrap();
    assert_eq!(added, 0);
    assert!(!flow.can_load_more);
    assert_eq!(flow.iteration, 2);
    assert_eq!(flow.recipes.len(), 1);
}

#[test]
fn recipe_errors_are_returned_and_quota_switches_view() {
    let mut flow = scanned_flow();
    flow.initial_recipes_request().unwrap();
    let err = flow
        .accept_initial(Err(AiError::SchemaMismatch("bad".into())))
        .unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_MISMATCH");
    assert!(!flow.recipes_loading);
    assert_eq!(flow.view, FlowView::Result);

    flow.initial_recipes_request().unwrap();
    assert!(flow.accept_initial(Err(AiError::RateLimited("quota".into()))).is_err());
    assert_eq!(flow.view, FlowView::QuotaExceeded);
}

#[test]
fn recipe_filters_combine_search_and_difficulty() {
    let mut flow = QualityCheckFlow::new();
    flow.recipes = vec![
        recipe("Sup Bayam", Difficulty::Mudah, &["Bayam"]),
        recipe("Rendang", Difficulty::Sulit, &["Daging", "Santan"]),
        recipe("Opor", Difficulty::Sedang, &["Ayam", "Santan"]),
    ];

    flow.set_recipe_query("santan");
    let titles: Vec<&str> = flow.filtered_recipes().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Rendang", "Opor"]);

    flow.toggle_difficulty(Difficulty::Sedang);
    let titles: Vec<&str> = flow.filtered_recipes().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Opor"]);

    flow.toggle_difficulty(Difficulty::Sedang);
    assert_eq!(flow.difficulty_filter, None);
    flow.set_recipe_query("");
    assert_eq!(flow.filtered_recipes().len(), 3);
}

// =========================================================
// 历史
// =========================================================

fn history() -> Vec<QualityHistoryItem> {
    let entry = |id, date: &str, item: &str| QualityHistoryItem {
        id,
        date: date.into(),
        details: QualityAnalysisResult {
            detected_items: vec![detected(item, FoodCategory::Lainnya)],
            ..Default::default()
        },
        thumbnail: None,
    };
    vec![
        entry(3, "28 Okt 2024, 09.05", "Tempe"),
        entry(2, "27 Okt 2024, 18.00", "Apel"),
        entry(1, "1 Sep 2024, 07.30", "Tahu"),
    ]
}

#[test]
fn history_search_matches_items_and_dates() {
    let items = history();
    let mut sel = HistorySelection::new();
    assert_eq!(sel.filter(&items).len(), 3);

    sel.set_query("apel");
    let ids: Vec<i64> = sel.filter(&items).iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![2]);

    sel.set_query("okt");
    assert_eq!(sel.filter(&items).len(), 2);
}

#[test]
fn delete_requires_confirmation() {
    let mut sel = HistorySelection::new();
    sel.toggle_select_mode();
    assert!(!sel.request_delete());

    sel.toggle(3);
    sel.toggle(1);
    assert_eq!(sel.confirm_delete(), Vec::<i64>::new());

    assert!(sel.request_delete());
    sel.cancel_delete();
    assert!(!sel.is_pending_delete());
    assert_eq!(sel.selected_count(), 2);

    assert!(sel.request_delete());
    let ids = sel.confirm_delete();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(sel.selected_count(), 0);
    assert!(!sel.selecting);
}

#[test]
fn select_all_toggles_visible_items() {
    let mut sel = HistorySelection::new();
    sel.toggle_select_mode();
    sel.toggle(2);
    sel.select_all(&[1, 2, 3]);
    assert_eq!(sel.selected_count(), 3);
    sel.select_all(&[1, 2, 3]);
    assert_eq!(sel.selected_count(), 0);
}

#[test]
fn leaving_select_mode_clears_selection() {
    let mut sel = HistorySelection::new();
    sel.toggle_select_mode();
    sel.toggle(1);
    sel.toggle(1);
    assert!(!sel.is_selected(1));
    sel.toggle(2);
    sel.toggle_select_mode();
    assert_eq!(sel.selected_count(), 0);
}

#[test]
fn opening_history_entry_shows_its_result() {
    let items = history();
    let mut flow = QualityCheckFlow::new();
    flow.set_tab(QualityTab::History);
    flow.show_history_entry(&items[1]);
    assert_eq!(flow.tab, QualityTab::Scan);
    assert_eq!(flow.view, FlowView::Result);
    assert_eq!(flow.result.as_ref().unwrap().detected_items[0].name, "Apel");
}
