use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::model::{EnvironmentalImpact, QualityAnalysisResult};

fn fresh_store() -> GlobalStore<InMemoryStorage> {
    GlobalStore::load(InMemoryStorage::new())
}

fn gps_address(id: i64, title: &str) -> Address {
    Address {
        id,
        title: title.into(),
        desc: format!("{}, Jakarta", title),
        kind: AddressKind::Gps,
        receiver: "Budi Santoso".into(),
        phone: "+62 812-3456-7890".into(),
        notes: None,
        photo: None,
    }
}

fn analysis(safe: bool) -> QualityAnalysisResult {
    QualityAnalysisResult {
        is_safe: safe,
        is_halal: true,
        hygiene_score: 80,
        quality_percentage: 90,
        environmental_impact: EnvironmentalImpact {
            co2_saved: "0.4 kg".into(),
            water_saved: "20 L".into(),
        },
        ..Default::default()
    }
}

// =========================================================
// 加载
// =========================================================

#[test]
fn absent_record_loads_seed() {
    let store = fresh_store();
    assert_eq!(store.get(), &AppState::seed());
    assert_eq!(store.get().user.name, "Budi Santoso");
    assert_eq!(store.get().addresses.len(), 2);
    assert_eq!(store.get().history_items.len(), 4);
    assert_eq!(store.get().location_name(), DEFAULT_LOCATION_NAME);
}

#[test]
fn corrupt_record_falls_back_to_seed() {
    let storage = InMemoryStorage::with_entry(STATE_STORAGE_KEY, "{not json");
    let store = GlobalStore::load(storage);
    assert_eq!(store.get(), &AppState::seed());
}

#[test]
fn partial_record_fills_missing_keys_with_defaults() {
    let storage = InMemoryStorage::with_entry(
        STATE_STORAGE_KEY,
        r#"{"savedItems":[3,1],"isDarkMode":true}"#,
    );
    let store = GlobalStore::load(storage);
    assert_eq!(store.get().saved_items, vec![3, 1]);
    assert!(store.get().is_dark_mode);
    assert!(store.get().addresses.is_empty());
    assert_eq!(store.get().location_name(), DEFAULT_LOCATION_NAME);
}

#[test]
fn persisted_state_round_trips_through_a_reload() {
    let mut store = fresh_store();
    store.toggle_saved(2);
    store.select_location("Kantor");
    store.toggle_theme();
    let expected = store.get().clone();

    let raw = store.backend().get(STATE_STORAGE_KEY).unwrap();
    let reloaded = GlobalStore::load(InMemoryStorage::with_entry(STATE_STORAGE_KEY, &raw));
    assert_eq!(reloaded.get(), &expected);
}

#[test]
fn record_uses_camel_case_keys() {
    let value = serde_json::to_value(AppState::seed()).unwrap();
    for key in [
        "user",
        "savedItems",
        "favorites",
        "qualityHistory",
        "currentLocationName",
        "addresses",
        "historyItems",
        "reservationItem",
        "isDarkMode",
    ] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
}

// =========================================================
// set / update
// =========================================================

#[test]
fn set_replaces_only_the_named_key() {
    let mut store = fresh_store();
    let before = store.get().clone();

    store.set(StatePatch::SavedItems(vec![4, 2]));
    let after = store.get().clone();

    assert_eq!(after.saved_items, vec![4, 2]);
    assert_eq!(after.user, before.user);
    assert_eq!(after.addresses, before.addresses);
    assert_eq!(after.history_items, before.history_items);
    assert_eq!(after.current_location_name, before.current_location_name);
}

#[test]
fn repeated_set_is_idempotent() {
    let mut store = fresh_store();
    store.set(StatePatch::CurrentLocationName("Rumah".into()));
    let once = store.get().clone();
    store.set(StatePatch::CurrentLocationName("Rumah".into()));
    assert_eq!(store.get(), &once);
}

#[test]
fn last_writer_wins() {
    let mut store = fresh_store();
    store.update([
        StatePatch::CurrentLocationName("Rumah".into()),
        StatePatch::CurrentLocationName("Kantor".into()),
    ]);
    assert_eq!(store.get().current_location_name, "Kantor");
}

#[test]
fn patch_keys_match_record_fields() {
    let value = serde_json::to_value(AppState::seed()).unwrap();
    let patches = [
        StatePatch::User(User::default()),
        StatePatch::SavedItems(Vec::new()),
        StatePatch::Favorites(Vec::new()),
        StatePatch::QualityHistory(Vec::new()),
        StatePatch::CurrentLocationName(String::new()),
        StatePatch::Addresses(Vec::new()),
        StatePatch::HistoryItems(Vec::new()),
        StatePatch::ReservationItem(None),
        StatePatch::DarkMode(false),
    ];
    for patch in patches {
        assert!(value.get(patch.key()).is_some(), "{}", patch.key());
    }
}

#[test]
fn write_failure_keeps_memory_state() {
    let mut store = fresh_store();
    store.backend().set_fail_writes(true);
    store.toggle_saved(1);
    assert_eq!(store.get().saved_items, vec![1]);
    assert!(store.flush().is_err());
    assert!(store.backend().get(STATE_STORAGE_KEY).is_none());

    store.backend().set_fail_writes(false);
    assert!(store.flush().is_ok());
    assert!(store.backend().get(STATE_STORAGE_KEY).is_some());
}

#[test]
fn subscribers_see_every_commit() {
    let mut store = fresh_store();
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    store.subscribe(move |_| seen.set(seen.get() + 1));

    store.toggle_theme();
    store.update([
        StatePatch::Favorites(vec![1]),
        StatePatch::SavedItems(vec![1]),
    ]);
    assert_eq!(calls.get(), 2);
}

// =========================================================
// 便捷操作
// =========================================================

#[test]
fn toggle_saved_adds_then_removes() {
    let mut store = fresh_store();
    assert!(store.toggle_saved(3));
    assert!(store.is_saved(3));
    assert!(!store.toggle_saved(3));
    assert!(!store.is_saved(3));
}

#[test]
fn favorites_are_independent_of_saved_items() {
    let mut store = fresh_store();
    assert!(store.toggle_favorite(2));
    assert!(store.is_favorite(2));
    assert!(!store.is_saved(2));
    assert!(!store.toggle_favorite(2));
    assert!(store.get().favorites.is_empty());
}

#[test]
fn new_address_is_prepended_and_selected() {
    let mut store = fresh_store();
    store.add_and_select_address(gps_address(99, "Kos"));
    let state = store.get();
    assert_eq!(state.addresses[0].id, 99);
    assert_eq!(state.addresses.len(), 3);
    assert_eq!(state.current_location_name, "Kos");
}

#[test]
fn deleting_an_address_preserves_order_of_the_rest() {
    let mut store = fresh_store();
    store.add_address(gps_address(10, "A"));
    store.add_address(gps_address(11, "B"));
    // [11, 10, 1, 2]
    assert!(store.delete_address(10));
    let ids: Vec<i64> = store.get().addresses.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![11, 1, 2]);

    assert!(!store.delete_address(10));
    assert_eq!(store.get().addresses.len(), 3);
}

#[test]
fn deleting_removes_only_the_first_duplicate_id() {
    let mut store = fresh_store();
    store.add_address(gps_address(1, "Duplikat"));
    assert!(store.delete_address(1));
    let titles: Vec<&str> = store.get().addresses.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Rumah", "Kantor"]);
}

#[test]
fn quality_scan_is_prepended_with_unique_ids() {
    let mut store = fresh_store();
    let now = crate::date::Timestamp::new(1_730_106_300_000);

    let first = store.record_quality_scan(analysis(true), None, now);
    let second = store.record_quality_scan(analysis(false), Some("data:image/png;base64,AA".into()), now);

    assert_ne!(first.id, second.id);
    assert_eq!(first.date, "28 Okt 2024, 09.05");
    let history = &store.get().quality_history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert!(!history[0].details.is_safe);
    assert_eq!(history[1], first);
}

#[test]
fn batch_delete_of_quality_history() {
    let mut store = fresh_store();
    let t = |ms| crate::date::Timestamp::new(ms);
    let a = store.record_quality_scan(analysis(true), None, t(1_000));
    let b = store.record_quality_scan(analysis(true), None, t(2_000));
    let c = store.record_quality_scan(analysis(true), None, t(3_000));

    assert_eq!(store.delete_quality_history(&[a.id, c.id, 42]), 2);
    let ids: Vec<i64> = store.get().quality_history.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![b.id]);
    assert_eq!(store.delete_quality_history(&[]), 0);
}

#[test]
fn reservation_order_goes_first() {
    let mut store = fresh_store();
    let order = HistoryItem {
        id: store.next_order_id(crate::date::Timestamp::new(5_000)),
        name: "Kopi Senja".into(),
        item: "1x Es Kopi Susu Gula Aren".into(),
        date: "Hari ini".into(),
        price: "Rp 10.000".into(),
        status: OrderStatus::Dikemas,
        delivery: DeliveryType::Delivery,
        img: 4,
    };
    store.record_reservation(order.clone());
    assert_eq!(store.get().history_items[0], order);
    assert_eq!(store.get().history_items.len(), 5);
}

#[test]
fn set_role_keeps_profile_fields() {
    let mut store = fresh_store();
    store.set_role(Role::Partner);
    assert_eq!(store.get().user.role, Role::Partner);
    assert_eq!(store.get().user.email, "budi.santoso@gmail.com");
}

#[test]
fn theme_toggle_flips() {
    let mut store = fresh_store();
    assert!(store.toggle_theme());
    assert!(!store.toggle_theme());
}
