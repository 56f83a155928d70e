//! 全局状态上下文
//!
//! `GlobalStore` 负责读写 LocalStorage，`state` 信号负责驱动界面。
//! 每次写入后 store 通过订阅回调把最新记录推送到信号。

use foodrescue_shared::{AppState, GlobalStore};
use leptos::prelude::*;

use crate::web::BrowserStorage;

type Store = GlobalStore<BrowserStorage>;

#[derive(Clone, Copy)]
pub struct StoreContext {
    /// 当前记录（只读）
    pub state: ReadSignal<AppState>,
    store: StoredValue<Store, LocalStorage>,
}

impl StoreContext {
    /// 从 LocalStorage 加载并建立订阅
    pub fn new() -> Self {
        let mut store = GlobalStore::load(BrowserStorage);
        let (state, set_state) = signal(store.get().clone());
        store.subscribe(move |next| set_state.set(next.clone()));

        Self {
            state,
            store: StoredValue::new_local(store),
        }
    }

    /// 对 store 执行一次写操作，返回操作结果
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Store) -> R) -> Option<R> {
        self.store.try_update_value(f)
    }
}

/// 从 Context 获取全局状态
pub fn use_store() -> StoreContext {
    use_context::<StoreContext>().expect("StoreContext should be provided")
}
