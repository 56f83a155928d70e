//! AI 食品质量检测
//!
//! 一个页面、三个标签页：
//! - 扫描：上传照片或描述食材，得到安全性 / 清真 / 过敏原分析
//! - 食谱：根据检测到的食材生成零浪费食谱
//! - 历史：浏览、搜索和批量删除以往的扫描记录
//!
//! 页面状态全部放在 [`QualityCheckFlow`] 中，子组件共享同一个信号。

mod history;
mod recipes;
mod scan;

use foodrescue_shared::quality::{FlowView, QualityCheckFlow, QualityTab};
use leptos::prelude::*;

use crate::components::icons::{HelpCircle, Sparkles, X};
use crate::state::use_store;

use history::HistoryPanel;
use recipes::RecipePanel;
use scan::{QuotaPanel, ScanPanel};

const TABS: [(QualityTab, &str); 3] = [
    (QualityTab::Scan, "Verifikasi"),
    (QualityTab::Recipe, "Resep AI"),
    (QualityTab::History, "Riwayat"),
];

#[component]
pub fn QualityCheckScreen(#[prop(optional)] initial_tab: Option<QualityTab>) -> impl IntoView {
    let store = use_store();
    let flow = RwSignal::new(QualityCheckFlow::new());
    if let Some(tab) = initial_tab {
        flow.update(|f| f.set_tab(tab));
    }

    // 离开页面后返回的扫描结果一律丢弃
    on_cleanup(move || {
        flow.try_update(|f| f.cancel_scan());
    });

    let tab = Memo::new(move |_| flow.with(|f| f.tab));
    let quota = Memo::new(move |_| flow.with(|f| f.view == FlowView::QuotaExceeded));

    view! {
        <div class="relative flex min-h-full flex-col bg-slate-50 dark:bg-gray-950">
            <header class="flex items-center justify-between border-b border-gray-100 dark:border-gray-800 bg-white dark:bg-gray-900 p-4 shadow-sm">
                <h1 class="flex items-center gap-2 text-xl font-black tracking-tight text-slate-900 dark:text-white">
                    <span class="rounded-lg bg-green-600 p-1.5 text-white">
                        <Sparkles attr:class="h-4 w-4" />
                    </span>
                    "AI Food Quality"
                </h1>
                <button
                    class="rounded-full bg-slate-100 dark:bg-gray-800 p-2 text-slate-500"
                    on:click=move |_| flow.update(|f| f.show_tips = true)
                >
                    <HelpCircle attr:class="h-5 w-5" />
                </button>
            </header>

            <div class="px-4 pb-2 pt-4">
                <div class="flex rounded-2xl bg-slate-200/50 dark:bg-gray-800 p-1">
                    {TABS
                        .map(|(t, label)| {
                            view! {
                                <button
                                    class=move || {
                                        if tab.get() == t {
                                            "flex-1 rounded-xl bg-white dark:bg-gray-700 py-3 text-[10px] font-black uppercase tracking-widest text-green-600 shadow-md"
                                        } else {
                                            "flex-1 rounded-xl py-3 text-[10px] font-black uppercase tracking-widest text-slate-400"
                                        }
                                    }
                                    on:click=move |_| flow.update(|f| f.set_tab(t))
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="flex-1 space-y-6 p-6 pb-28">
                {move || match (tab.get(), quota.get()) {
                    (QualityTab::History, _) => view! { <HistoryPanel flow=flow store=store /> }.into_any(),
                    (_, true) => view! { <QuotaPanel flow=flow store=store /> }.into_any(),
                    (QualityTab::Scan, false) => view! { <ScanPanel flow=flow store=store /> }.into_any(),
                    (QualityTab::Recipe, false) => view! { <RecipePanel flow=flow /> }.into_any(),
                }}
            </div>

            <Show when=move || flow.with(|f| f.show_tips)>
                <TipsModal on_close=Callback::new(move |_: ()| flow.update(|f| f.show_tips = false)) />
            </Show>
        </div>
    }
}

/// 直接打开历史标签页
#[component]
pub fn QualityHistoryScreen() -> impl IntoView {
    view! { <QualityCheckScreen initial_tab=QualityTab::History /> }
}

#[component]
fn TipsModal(on_close: Callback<()>) -> impl IntoView {
    const FEATURES: [(&str, &str); 3] = [
        ("Verifikasi Pangan", "Mendeteksi kesegaran, kehalalan, dan kategori bahan secara akurat."),
        ("Deteksi Alergen", "Peringatan otomatis untuk bahan yang berisiko bagi kesehatan Anda."),
        ("Dampak Lingkungan", "Menghitung kontribusi Anda dalam mengurangi limbah karbon."),
    ];

    view! {
        <div class="absolute inset-0 z-50 flex items-center justify-center bg-slate-900/80 p-6 backdrop-blur-md">
            <div class="w-full max-w-sm rounded-[3rem] bg-white dark:bg-gray-900 p-8 shadow-2xl">
                <div class="mb-6 flex items-start justify-between">
                    <div class="rounded-2xl bg-green-600/10 p-3 text-green-600">
                        <Sparkles attr:class="h-6 w-6" />
                    </div>
                    <button class="rounded-full p-2 text-slate-400" on:click=move |_| on_close.run(())>
                        <X attr:class="h-5 w-5" />
                    </button>
                </div>
                <h3 class="mb-4 text-2xl font-black tracking-tight dark:text-white">"Teknologi Gemini"</h3>
                <div class="space-y-6">
                    {FEATURES
                        .iter()
                        .enumerate()
                        .map(|(i, (title, desc))| {
                            view! {
                                <div class="flex gap-4">
                                    <div class="flex h-8 w-8 shrink-0 items-center justify-center rounded-lg bg-slate-100 dark:bg-gray-800 text-sm font-black dark:text-white">
                                        {i + 1}
                                    </div>
                                    <div>
                                        <p class="mb-1 text-xs font-black uppercase tracking-widest dark:text-white">{*title}</p>
                                        <p class="text-xs font-medium leading-relaxed text-slate-500">{*desc}</p>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
                <button
                    class="mt-10 h-14 w-full rounded-xl bg-green-600 font-black uppercase tracking-widest text-white"
                    on:click=move |_| on_close.run(())
                >
                    "Mulai Penyelamatan"
                </button>
            </div>
        </div>
    }
}
