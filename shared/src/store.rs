//! 全局状态存储
//!
//! 单条可序列化记录，保存所有跨屏幕共享的数据。
//! 每次修改按 key 整体替换（浅合并），随后整条记录写入本地存储。

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::date::{self, Timestamp};
use crate::error::StoreError;
use crate::model::{
    Address, AddressKind, DeliveryType, FeedItem, HistoryItem, OrderStatus,
    QualityAnalysisResult, QualityHistoryItem, Role, User,
};

/// 本地存储中保存整条状态记录的 key
pub const STATE_STORAGE_KEY: &str = "foodRescueState";
/// 未选择位置时显示的默认位置
pub const DEFAULT_LOCATION_NAME: &str = "Jakarta Pusat";

// =========================================================
// 状态记录
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub user: User,
    pub saved_items: Vec<u32>,
    pub favorites: Vec<u32>,
    /// 最新的扫描在最前
    pub quality_history: Vec<QualityHistoryItem>,
    pub current_location_name: String,
    pub addresses: Vec<Address>,
    pub history_items: Vec<HistoryItem>,
    pub reservation_item: Option<FeedItem>,
    pub is_dark_mode: bool,
}

impl AppState {
    /// 首次启动或存储损坏时使用的默认数据
    pub fn seed() -> Self {
        let user = User {
            name: "Budi Santoso".into(),
            email: "budi.santoso@gmail.com".into(),
            phone: "+62 812-3456-7890".into(),
            bio: "Food lover & saver!".into(),
            avatar: "https://picsum.photos/200/200?random=user".into(),
            role: Role::User,
        };

        let address = |id, title: &str, desc: &str, kind| Address {
            id,
            title: title.into(),
            desc: desc.into(),
            kind,
            receiver: user.name.clone(),
            phone: user.phone.clone(),
            notes: None,
            photo: None,
        };
        let addresses = vec![
            address(1, "Rumah", "Jl. Melati No. 12, Jakarta Selatan", AddressKind::Home),
            address(
                2,
                "Kantor",
                "Gedung Pencakar Langit Lt. 5, Jakarta Pusat",
                AddressKind::Office,
            ),
        ];

        let order = |id, name: &str, item: &str, date: &str, price: &str, status, delivery, img| {
            HistoryItem {
                id,
                name: name.into(),
                item: item.into(),
                date: date.into(),
                price: price.into(),
                status,
                delivery,
                img,
            }
        };
        let history_items = vec![
            order(101, "Bakery Pagi Sore", "5x Roti Manis", "28 Okt 2024", "Rp 25.000", OrderStatus::Selesai, DeliveryType::Pickup, 1),
            order(102, "Restoran Padang", "1x Paket Nasi", "25 Okt 2024", "Rp 15.000", OrderStatus::Dibatalkan, DeliveryType::Delivery, 2),
            order(103, "Kopi Kenangan", "2x Kopi Susu", "20 Okt 2024", "Rp 18.000", OrderStatus::Selesai, DeliveryType::Pickup, 3),
            order(104, "Sate Khas Senayan", "10 Tusuk Sate", "Hari ini", "Rp 50.000", OrderStatus::Dikemas, DeliveryType::Delivery, 4),
        ];

        Self {
            user,
            saved_items: Vec::new(),
            favorites: Vec::new(),
            quality_history: Vec::new(),
            current_location_name: DEFAULT_LOCATION_NAME.into(),
            addresses,
            history_items,
            reservation_item: None,
            is_dark_mode: false,
        }
    }

    /// 按 key 替换一个字段，其余字段不变
    pub fn apply(&mut self, patch: StatePatch) {
        match patch {
            StatePatch::User(v) => self.user = v,
            StatePatch::SavedItems(v) => self.saved_items = v,
            StatePatch::Favorites(v) => self.favorites = v,
            StatePatch::QualityHistory(v) => self.quality_history = v,
            StatePatch::CurrentLocationName(v) => self.current_location_name = v,
            StatePatch::Addresses(v) => self.addresses = v,
            StatePatch::HistoryItems(v) => self.history_items = v,
            StatePatch::ReservationItem(v) => self.reservation_item = v,
            StatePatch::DarkMode(v) => self.is_dark_mode = v,
        }
    }

    /// 解析存储中的记录，缺失的字段使用空值
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        serde_json::from_str(raw).map_err(StoreError::from)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(StoreError::from)
    }

    pub fn location_name(&self) -> &str {
        if self.current_location_name.is_empty() {
            DEFAULT_LOCATION_NAME
        } else {
            &self.current_location_name
        }
    }
}

/// 对单个字段的整体替换
#[derive(Debug, Clone, PartialEq)]
pub enum StatePatch {
    User(User),
    SavedItems(Vec<u32>),
    Favorites(Vec<u32>),
    QualityHistory(Vec<QualityHistoryItem>),
    CurrentLocationName(String),
    Addresses(Vec<Address>),
    HistoryItems(Vec<HistoryItem>),
    ReservationItem(Option<FeedItem>),
    DarkMode(bool),
}

impl StatePatch {
    /// 对应的记录字段名
    pub fn key(&self) -> &'static str {
        match self {
            StatePatch::User(_) => "user",
            StatePatch::SavedItems(_) => "savedItems",
            StatePatch::Favorites(_) => "favorites",
            StatePatch::QualityHistory(_) => "qualityHistory",
            StatePatch::CurrentLocationName(_) => "currentLocationName",
            StatePatch::Addresses(_) => "addresses",
            StatePatch::HistoryItems(_) => "historyItems",
            StatePatch::ReservationItem(_) => "reservationItem",
            StatePatch::DarkMode(_) => "isDarkMode",
        }
    }
}

// =========================================================
// 存储后端抽象
// =========================================================

/// 键值字符串存储（浏览器 LocalStorage 或内存实现）
pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> bool;
}

/// 内存存储，用于测试和非浏览器环境
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    data: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一条原始记录
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// 模拟存储写入失败（如配额已满）
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl StorageBackend for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Storage("quota exceeded".into()));
        }
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> bool {
        self.data.borrow_mut().remove(key).is_some()
    }
}

// =========================================================
// 全局存储
// =========================================================

type Subscriber = Box<dyn Fn(&AppState)>;

/// 全局状态存储
///
/// - `get()` 读取当前记录
/// - `set(patch)` 替换一个字段，随后持久化并通知订阅者
/// - `flush()` 显式写入存储并返回结果
pub struct GlobalStore<B: StorageBackend> {
    backend: B,
    state: AppState,
    subscribers: Vec<Subscriber>,
}

impl<B: StorageBackend> GlobalStore<B> {
    /// 从存储加载；记录缺失或损坏时回退到默认数据
    pub fn load(backend: B) -> Self {
        let state = match backend.get(STATE_STORAGE_KEY) {
            Some(raw) => match AppState::from_json(&raw) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("[Store] Stored state is corrupt, using seed data: {}", e);
                    AppState::seed()
                }
            },
            None => {
                log::info!("[Store] No stored state, using seed data.");
                AppState::seed()
            }
        };

        Self {
            backend,
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &AppState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 替换一个字段（后写者胜）
    pub fn set(&mut self, patch: StatePatch) {
        log::debug!("[Store] set {}", patch.key());
        self.state.apply(patch);
        self.commit();
    }

    /// 一次性替换多个字段，只持久化一次
    pub fn update(&mut self, patches: impl IntoIterator<Item = StatePatch>) {
        for patch in patches {
            log::debug!("[Store] set {}", patch.key());
            self.state.apply(patch);
        }
        self.commit();
    }

    /// 写入整条记录
    pub fn flush(&self) -> Result<(), StoreError> {
        let raw = self.state.to_json()?;
        self.backend.set(STATE_STORAGE_KEY, &raw)
    }

    pub fn subscribe(&mut self, callback: impl Fn(&AppState) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    fn commit(&self) {
        // 持久化失败只记录日志，不影响内存状态
        if let Err(e) = self.flush() {
            log::error!("[Store] Failed to persist state: {}", e);
        }
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }

    // --- 便捷操作 ---

    /// 切换收藏状态，返回切换后是否已收藏
    pub fn toggle_saved(&mut self, id: u32) -> bool {
        let (saved, now_saved) = toggled(&self.state.saved_items, id);
        self.set(StatePatch::SavedItems(saved));
        now_saved
    }

    pub fn is_saved(&self, id: u32) -> bool {
        self.state.saved_items.contains(&id)
    }

    /// 切换关注的商户
    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        let (favorites, now_favorite) = toggled(&self.state.favorites, id);
        self.set(StatePatch::Favorites(favorites));
        now_favorite
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.state.favorites.contains(&id)
    }

    pub fn next_address_id(&self, now: Timestamp) -> i64 {
        date::next_id(now, self.state.addresses.iter().map(|a| a.id))
    }

    /// 新地址放在列表最前
    pub fn add_address(&mut self, address: Address) {
        let mut addresses = Vec::with_capacity(self.state.addresses.len() + 1);
        addresses.push(address);
        addresses.extend(self.state.addresses.iter().cloned());
        self.set(StatePatch::Addresses(addresses));
    }

    /// 删除一个 id 匹配的地址，其余地址顺序不变
    pub fn delete_address(&mut self, id: i64) -> bool {
        let Some(pos) = self.state.addresses.iter().position(|a| a.id == id) else {
            return false;
        };
        let mut addresses = self.state.addresses.clone();
        addresses.remove(pos);
        self.set(StatePatch::Addresses(addresses));
        true
    }

    pub fn select_location(&mut self, name: impl Into<String>) {
        self.set(StatePatch::CurrentLocationName(name.into()));
    }

    /// 保存新地址并设为当前位置
    pub fn add_and_select_address(&mut self, address: Address) {
        let title = address.title.clone();
        let mut addresses = vec![address];
        addresses.extend(self.state.addresses.iter().cloned());
        self.update([
            StatePatch::Addresses(addresses),
            StatePatch::CurrentLocationName(title),
        ]);
    }

    /// 记录一次成功的扫描，新记录放在最前
    pub fn record_quality_scan(
        &mut self,
        details: QualityAnalysisResult,
        thumbnail: Option<String>,
        now: Timestamp,
    ) -> QualityHistoryItem {
        let entry = QualityHistoryItem {
            id: date::next_id(now, self.state.quality_history.iter().map(|h| h.id)),
            date: date::display_date(now),
            details,
            thumbnail,
        };
        let mut history = Vec::with_capacity(self.state.quality_history.len() + 1);
        history.push(entry.clone());
        history.extend(self.state.quality_history.iter().cloned());
        self.set(StatePatch::QualityHistory(history));
        entry
    }

    /// 批量删除扫描记录，返回删除条数
    pub fn delete_quality_history(&mut self, ids: &[i64]) -> usize {
        let before = self.state.quality_history.len();
        let remaining: Vec<QualityHistoryItem> = self
            .state
            .quality_history
            .iter()
            .filter(|h| !ids.contains(&h.id))
            .cloned()
            .collect();
        let removed = before - remaining.len();
        if removed > 0 {
            self.set(StatePatch::QualityHistory(remaining));
        }
        removed
    }

    pub fn record_reservation(&mut self, order: HistoryItem) {
        let mut orders = vec![order];
        orders.extend(self.state.history_items.iter().cloned());
        self.set(StatePatch::HistoryItems(orders));
    }

    pub fn next_order_id(&self, now: Timestamp) -> i64 {
        date::next_id(now, self.state.history_items.iter().map(|h| h.id))
    }

    pub fn set_reservation_item(&mut self, item: Option<FeedItem>) {
        self.set(StatePatch::ReservationItem(item));
    }

    pub fn update_profile(&mut self, user: User) {
        self.set(StatePatch::User(user));
    }

    /// 登录后把角色写入用户记录
    pub fn set_role(&mut self, role: Role) {
        let user = User {
            role,
            ..self.state.user.clone()
        };
        self.set(StatePatch::User(user));
    }

    pub fn toggle_theme(&mut self) -> bool {
        let dark = !self.state.is_dark_mode;
        self.set(StatePatch::DarkMode(dark));
        dark
    }
}

fn toggled(ids: &[u32], id: u32) -> (Vec<u32>, bool) {
    let mut ids = ids.to_vec();
    if let Some(pos) = ids.iter().position(|s| *s == id) {
        ids.remove(pos);
        (ids, false)
    } else {
        ids.push(id);
        (ids, true)
    }
}

#[cfg(test)]
mod tests;
