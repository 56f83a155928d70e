//! 屏幕间共用的小组件

use leptos::prelude::*;

use crate::components::icons::{ChevronLeft, Loader};
use crate::config::TOAST_DISMISS_MS;
use crate::web::router::use_router;

/// 提示消息：(内容, 是否出错)
pub type Notice = RwSignal<Option<(String, bool)>>;

/// 顶部标题栏
#[component]
pub fn ScreenHeader(
    #[prop(into)] title: String,
    /// 是否显示返回按钮
    #[prop(default = true)]
    back: bool,
    /// 右侧操作区
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let router = use_router();

    view! {
        <header class="sticky top-0 z-20 flex items-center gap-3 bg-white/95 dark:bg-gray-900/95 backdrop-blur px-4 py-3 border-b border-gray-100 dark:border-gray-800">
            <Show when=move || back>
                <button
                    on:click=move |_| router.go_back()
                    class="p-2 -ml-2 rounded-full hover:bg-gray-100 dark:hover:bg-gray-800 text-gray-700 dark:text-gray-200"
                >
                    <ChevronLeft attr:class="h-5 w-5" />
                </button>
            </Show>
            <h1 class="flex-1 text-lg font-bold text-gray-900 dark:text-white truncate">{title}</h1>
            {children.map(|c| c())}
        </header>
    }
}

/// 同一时刻只保留一个自动关闭定时器
#[derive(Debug)]
struct DismissTimer<H> {
    pending: Option<H>,
}

impl<H> DismissTimer<H> {
    fn new() -> Self {
        Self { pending: None }
    }

    /// 记录新的定时器，返回需要取消的旧定时器
    fn arm(&mut self, handle: H) -> Option<H> {
        self.pending.replace(handle)
    }

    /// 取出当前定时器
    fn disarm(&mut self) -> Option<H> {
        self.pending.take()
    }
}

/// 浮动提示条，3 秒后自动消失
///
/// 新提示到来时取消上一条的定时器，否则旧定时器会提前关掉新提示。
#[component]
pub fn Toast(notice: Notice) -> impl IntoView {
    let timer = StoredValue::new(DismissTimer::<TimeoutHandle>::new());
    let cancel = move || {
        if let Some(handle) = timer.try_update_value(DismissTimer::disarm).flatten() {
            handle.clear();
        }
    };

    Effect::new(move |_| {
        if notice.with(Option::is_none) {
            cancel();
            return;
        }
        let delay = std::time::Duration::from_millis(u64::from(TOAST_DISMISS_MS));
        match set_timeout_with_handle(move || notice.set(None), delay) {
            Ok(handle) => {
                if let Some(stale) = timer.try_update_value(|t| t.arm(handle)).flatten() {
                    stale.clear();
                }
            }
            Err(e) => log::warn!("[Toast] Failed to schedule dismiss: {:?}", e),
        }
    });
    on_cleanup(cancel);

    view! {
        {move || {
            notice
                .get()
                .map(|(message, is_err)| {
                    let class = if is_err {
                        "absolute top-4 left-4 right-4 z-50 rounded-xl bg-red-600 px-4 py-3 text-sm text-white shadow-lg"
                    } else {
                        "absolute top-4 left-4 right-4 z-50 rounded-xl bg-green-600 px-4 py-3 text-sm text-white shadow-lg"
                    };
                    view! { <div class=class>{message}</div> }
                })
        }}
    }
}

#[component]
pub fn Spinner(#[prop(into, optional)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-3 py-10 text-gray-500">
            <Loader attr:class="h-8 w-8 animate-spin text-green-600" />
            {label.map(|l| view! { <p class="text-sm">{l}</p> })}
        </div>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="py-16 text-center text-sm text-gray-400 dark:text-gray-500">{message}</div>
    }
}

/// 带标题的内容块
#[component]
pub fn Section(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <section class="px-4 py-3">
            <h2 class="mb-2 text-xs font-semibold uppercase tracking-wide text-gray-400">{title}</h2>
            <div class="overflow-hidden rounded-2xl bg-white dark:bg-gray-800 shadow-sm divide-y divide-gray-100 dark:divide-gray-700">
                {children()}
            </div>
        </section>
    }
}

/// 设置类列表中的一行
#[component]
pub fn MenuRow(
    #[prop(into)] label: Signal<String>,
    #[prop(into)] on_select: Callback<()>,
    #[prop(into, optional)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| on_select.run(())
            class="flex w-full items-center justify-between px-4 py-3 text-left text-sm text-gray-800 dark:text-gray-100 hover:bg-gray-50 dark:hover:bg-gray-700"
        >
            <span>{label}</span>
            <span class="text-xs text-gray-400">{hint}</span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::DismissTimer;

    #[test]
    fn arming_again_hands_back_the_stale_timer() {
        let mut timer = DismissTimer::new();
        assert_eq!(timer.arm(1), None);
        assert_eq!(timer.arm(2), Some(1));
        assert_eq!(timer.disarm(), Some(2));
        assert_eq!(timer.disarm(), None);
    }
}
