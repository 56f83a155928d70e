//! 扫描标签页
//!
//! 输入 -> 结果 两个视图，以及配额耗尽时的提示页。

use foodrescue_shared::date::Timestamp;
use foodrescue_shared::quality::{FlowView, QualityCheckFlow, QualityTab, ScanOutcome};
use foodrescue_shared::{FoodCategory, QualityAnalysisResult};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::recipes::load_initial_recipes;
use crate::ai::AiService;
use crate::components::icons::{
    AlertTriangle, Camera, CheckCircle, ChefHat, Droplets, Key, Leaf, Loader, ShieldCheck, X, Zap,
};
use crate::config::save_api_key;
use crate::state::StoreContext;
use crate::web::{alert, read_event_image};

/// 发起扫描；结果成功时写入历史
fn run_scan(flow: RwSignal<QualityCheckFlow>, store: StoreContext) {
    let Some(request) = flow.try_update(|f| f.begin_scan()).flatten() else {
        return;
    };
    log::info!("[QualityCheck] Scan #{} started", request.ticket);

    spawn_local(async move {
        let outcome = AiService::load()
            .analyze_food_quality(&request.ingredients, request.image.as_deref())
            .await;
        match flow.try_update(|f| f.finish_scan(request.ticket, outcome)) {
            Some(ScanOutcome::Completed(result)) => {
                store.mutate(|s| s.record_quality_scan(result, request.image, Timestamp::now()));
            }
            Some(ScanOutcome::Failed(message)) => alert(message),
            _ => {}
        }
    });
}

#[component]
pub fn ScanPanel(flow: RwSignal<QualityCheckFlow>, store: StoreContext) -> impl IntoView {
    let showing_result = Memo::new(move |_| {
        flow.with(|f| f.view == FlowView::Result && f.result.is_some())
    });

    move || {
        if showing_result.get() {
            view! { <ResultView flow=flow /> }.into_any()
        } else {
            view! { <ScanInput flow=flow store=store /> }.into_any()
        }
    }
}

#[component]
fn ScanInput(flow: RwSignal<QualityCheckFlow>, store: StoreContext) -> impl IntoView {
    let image = move || flow.with(|f| f.image.clone());
    let scanning = move || flow.with(|f| f.scanning);

    let on_file = move |ev: leptos::ev::Event| {
        spawn_local(async move {
            if let Some(uri) = read_event_image(ev).await {
                flow.update(|f| f.set_image(uri));
            }
        });
    };

    view! {
        <div class="space-y-4">
            <label class="relative flex h-60 w-full cursor-pointer flex-col items-center justify-center overflow-hidden rounded-3xl border-2 border-dashed border-slate-200 dark:border-gray-800 bg-white dark:bg-gray-900">
                {move || match image() {
                    Some(src) => {
                        view! {
                            <img src=src class="h-full w-full object-cover" />
                            <button
                                class="absolute right-4 top-4 rounded-full bg-white/90 dark:bg-gray-800/90 p-2 shadow-lg"
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    ev.stop_propagation();
                                    flow.update(|f| f.clear_image());
                                }
                            >
                                <X attr:class="h-4 w-4" />
                            </button>
                        }
                            .into_any()
                    }
                    None => {
                        view! {
                            <div class="px-8 text-center text-slate-400">
                                <div class="mx-auto mb-4 flex h-16 w-16 items-center justify-center rounded-full border border-slate-100 dark:border-gray-700 bg-slate-50 dark:bg-gray-800">
                                    <Camera attr:class="h-7 w-7 opacity-50" />
                                </div>
                                <p class="mb-1 text-sm font-bold text-slate-900 dark:text-white">"Ambil Foto Bahan"</p>
                                <p class="text-xs opacity-70">"AI akan menganalisis visual makanan Anda secara mendalam."</p>
                            </div>
                        }
                            .into_any()
                    }
                }}
                <input type="file" accept="image/*" class="hidden" on:change=on_file />
            </label>

            <textarea
                class="w-full rounded-3xl border border-slate-100 dark:border-gray-800 bg-white dark:bg-gray-900 px-5 py-4 text-sm outline-none focus:border-green-500 dark:text-white"
                rows="3"
                placeholder="Sebutkan bahan atau berikan detail tambahan..."
                prop:value=move || flow.with(|f| f.ingredients.clone())
                on:input=move |ev| flow.update(|f| f.set_ingredients(event_target_value(&ev)))
            ></textarea>

            <button
                class="flex h-14 w-full items-center justify-center gap-2 rounded-xl bg-green-600 text-sm font-black uppercase tracking-widest text-white shadow-xl disabled:opacity-50"
                disabled=move || !flow.with(QualityCheckFlow::can_submit)
                on:click=move |_| run_scan(flow, store)
            >
                <Show when=scanning>
                    <Loader attr:class="h-5 w-5 animate-spin" />
                </Show>
                "Mulai Verifikasi Pangan"
            </button>
            <Show when=scanning>
                <button
                    class="w-full text-xs font-semibold text-slate-400 underline"
                    on:click=move |_| flow.update(|f| f.cancel_scan())
                >
                    "Batalkan"
                </button>
            </Show>
        </div>
    }
}

fn section_title(title: &'static str) -> impl IntoView {
    view! { <h3 class="mb-3 text-xs font-black uppercase tracking-widest text-slate-500">{title}</h3> }
}

#[component]
fn ResultView(flow: RwSignal<QualityCheckFlow>) -> impl IntoView {
    let Some(result) = flow.with_untracked(|f| f.result.clone()) else {
        return ().into_any();
    };
    let groups = flow.with_untracked(|f| f.grouped_items());

    let QualityAnalysisResult {
        is_safe,
        is_halal,
        halal_reasoning,
        reasoning,
        allergens,
        shelf_life_prediction,
        hygiene_score,
        quality_percentage,
        storage_tips,
        environmental_impact,
        hygiene_breakdown,
        ..
    } = result;
    let verdict_class = if is_safe { "rounded-2xl bg-emerald-500 p-4" } else { "rounded-2xl bg-rose-500 p-4" };
    let halal_class = if is_halal { "h-4 w-4 text-emerald-400" } else { "h-4 w-4 text-rose-400" };

    view! {
        <div class="space-y-6">
            <div class="relative overflow-hidden rounded-[2.5rem] bg-gradient-to-br from-slate-900 to-slate-800 p-8 text-white shadow-2xl">
                <div class="mb-6 flex items-start justify-between">
                    <div>
                        <p class="mb-1 text-[10px] font-black uppercase tracking-[0.2em] opacity-60">"Skor Kualitas AI"</p>
                        <h2 class="text-5xl font-black">{format!("{}%", quality_percentage)}</h2>
                    </div>
                    <div class=verdict_class>
                        {if is_safe {
                            view! { <CheckCircle attr:class="h-8 w-8" /> }.into_any()
                        } else {
                            view! { <AlertTriangle attr:class="h-8 w-8" /> }.into_any()
                        }}
                    </div>
                </div>
                <div class="grid grid-cols-2 gap-4">
                    <div class="rounded-2xl border border-white/5 bg-white/10 p-4">
                        <p class="mb-1 text-[10px] font-bold uppercase opacity-60">"Higienitas"</p>
                        <p class="flex items-center gap-2 text-lg font-bold">
                            <Zap attr:class="h-4 w-4 text-yellow-400" />
                            {format!("{}/100", hygiene_score)}
                        </p>
                    </div>
                    <div class="rounded-2xl border border-white/5 bg-white/10 p-4">
                        <p class="mb-1 text-[10px] font-bold uppercase opacity-60">"Kehalalan"</p>
                        <p class="flex items-center gap-2 text-lg font-bold">
                            <ShieldCheck attr:class=halal_class />
                            {if is_halal { "Halal" } else { "Non-Halal" }}
                        </p>
                    </div>
                </div>
                <p class="mt-4 text-xs opacity-70">{reasoning}</p>
                <p class="mt-2 text-xs opacity-70">{halal_reasoning}</p>
                <p class="mt-2 text-xs font-bold">"Perkiraan umur simpan: " {shelf_life_prediction}</p>
            </div>

            <section>
                {section_title("Alergen yang Terdeteksi")}
                {if allergens.is_empty() {
                    view! {
                        <div class="rounded-2xl bg-emerald-50 dark:bg-emerald-950/20 p-5 text-xs font-bold text-emerald-600">
                            "Tidak ada alergen umum yang terdeteksi secara visual dalam bahan ini."
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="space-y-3 rounded-2xl bg-rose-50 dark:bg-rose-950/20 p-5">
                            <div class="flex flex-wrap gap-2">
                                {allergens
                                    .into_iter()
                                    .map(|a| {
                                        view! {
                                            <span class="rounded-lg bg-rose-100 px-4 py-1.5 text-[9px] font-black uppercase tracking-widest text-rose-600">
                                                {a}
                                            </span>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <p class="border-t border-rose-200 pt-2 text-[10px] font-bold italic text-rose-600">
                                "* Peringatan: Bahan ini mengandung alergen potensial. Hindari jika Anda memiliki sensitivitas diet."
                            </p>
                        </div>
                    }
                        .into_any()
                }}
            </section>

            <section>
                {section_title("Kategori Surplus Terdeteksi")}
                <div class="space-y-4">
                    {if groups.is_empty() {
                        view! {
                            <div class="rounded-3xl border border-dashed border-slate-200 bg-white dark:bg-gray-900 p-8 text-center text-xs text-slate-400">
                                "Gagal mengelompokkan bahan secara otomatis."
                            </div>
                        }
                            .into_any()
                    } else {
                        groups
                            .into_iter()
                            .map(|(category, names)| view! { <CategoryCard category=category names=names /> })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </section>

            <section>
                {section_title("Dampak Penyelamatan")}
                <div class="grid grid-cols-2 gap-4">
                    <div class="flex flex-col items-center rounded-2xl bg-emerald-50 dark:bg-emerald-950/20 p-4 text-center">
                        <Leaf attr:class="mb-2 h-6 w-6 text-emerald-600" />
                        <p class="mb-1 text-[10px] font-black uppercase tracking-widest text-emerald-600">"CO2 Disimpan"</p>
                        <p class="text-lg font-black text-slate-900 dark:text-white">{environmental_impact.co2_saved}</p>
                    </div>
                    <div class="flex flex-col items-center rounded-2xl bg-blue-50 dark:bg-blue-950/20 p-4 text-center">
                        <Droplets attr:class="mb-2 h-6 w-6 text-blue-600" />
                        <p class="mb-1 text-[10px] font-black uppercase tracking-widest text-blue-600">"Air Dihemat"</p>
                        <p class="text-lg font-black text-slate-900 dark:text-white">{environmental_impact.water_saved}</p>
                    </div>
                </div>
            </section>

            <section>
                {section_title("Tips Penyimpanan Cerdas")}
                <div class="space-y-3">
                    {storage_tips
                        .into_iter()
                        .enumerate()
                        .map(|(i, tip)| {
                            view! {
                                <div class="flex gap-4 rounded-[1.5rem] border border-slate-100 dark:border-gray-800 bg-white dark:bg-gray-900 p-4 shadow-sm">
                                    <div class="flex h-8 w-8 shrink-0 items-center justify-center rounded-full bg-green-600/10 text-xs font-black text-green-600">
                                        {i + 1}
                                    </div>
                                    <p class="text-xs font-medium leading-relaxed text-slate-600 dark:text-slate-300">{tip}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section>
                {section_title("Analisis Higienitas")}
                <div class="space-y-4 rounded-[2rem] bg-slate-100/50 dark:bg-gray-900/50 p-5">
                    {hygiene_breakdown
                        .into_iter()
                        .map(|line| {
                            view! {
                                <div class="flex items-start gap-4">
                                    <CheckCircle attr:class="h-4 w-4 shrink-0 text-emerald-500" />
                                    <span class="text-xs font-medium text-slate-600 dark:text-slate-400">{line}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <div class="flex gap-4 pb-12 pt-4">
                <button
                    class="h-14 flex-1 rounded-2xl border-2 border-slate-300 text-xs font-black uppercase text-slate-600 dark:text-slate-300"
                    on:click=move |_| flow.update(QualityCheckFlow::start_over)
                >
                    "Scan Baru"
                </button>
                <button
                    class="flex h-14 flex-1 items-center justify-center gap-2 rounded-2xl bg-green-600 text-xs font-black uppercase text-white shadow-xl disabled:opacity-50"
                    disabled=move || !flow.with(QualityCheckFlow::has_ingredients)
                    on:click=move |_| load_initial_recipes(flow)
                >
                    <ChefHat attr:class="h-5 w-5" />
                    "Masak Yuk!"
                </button>
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn CategoryCard(category: FoodCategory, names: Vec<String>) -> impl IntoView {
    let count = names.len();

    view! {
        <div class="rounded-2xl border-l-4 border-l-green-600 bg-white dark:bg-gray-900 p-5 shadow-sm">
            <div class="mb-3 flex items-center justify-between">
                <h4 class="text-xs font-black uppercase tracking-widest text-slate-900 dark:text-white">
                    {category.as_str()}
                </h4>
                <span class="rounded-full bg-orange-100 px-2 py-0.5 text-[9px] font-bold text-orange-600">
                    {format!("{} Item", count)}
                </span>
            </div>
            <div class="flex flex-wrap gap-2">
                {names
                    .into_iter()
                    .map(|name| {
                        view! {
                            <span class="rounded-xl border border-slate-100 dark:border-gray-700 bg-slate-50 dark:bg-gray-800 px-3 py-1.5 text-xs font-bold text-slate-600 dark:text-gray-300">
                                {name}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// 配额耗尽：可以直接重试，或换一个 API Key 后重试
#[component]
pub fn QuotaPanel(flow: RwSignal<QualityCheckFlow>, store: StoreContext) -> impl IntoView {
    let key = RwSignal::new(String::new());

    let retry_with_key = move |_| {
        let value = key.get_untracked();
        if value.trim().is_empty() {
            alert("Masukkan API Key terlebih dahulu.");
            return;
        }
        if !save_api_key(&value) {
            alert("Gagal menyimpan API Key.");
            return;
        }
        log::info!("[QualityCheck] API key replaced, retrying");
        let from_recipes = flow.with_untracked(|f| f.tab == QualityTab::Recipe);
        flow.update(QualityCheckFlow::retry);
        if from_recipes {
            load_initial_recipes(flow);
        } else {
            run_scan(flow, store);
        }
    };

    view! {
        <div class="space-y-6 rounded-[2.5rem] bg-white dark:bg-gray-900 p-8 text-center shadow-sm">
            <div class="mx-auto flex h-16 w-16 items-center justify-center rounded-full bg-orange-100 text-orange-500">
                <AlertTriangle attr:class="h-8 w-8" />
            </div>
            <div>
                <h2 class="mb-2 text-lg font-black text-slate-900 dark:text-white">"Kuota AI Habis"</h2>
                <p class="text-xs leading-relaxed text-slate-500">
                    "Batas penggunaan Gemini telah tercapai. Coba lagi nanti atau gunakan API Key Anda sendiri."
                </p>
            </div>
            <button
                class="h-12 w-full rounded-xl border-2 border-slate-300 text-xs font-black uppercase text-slate-600 dark:text-slate-300"
                on:click=move |_| flow.update(QualityCheckFlow::retry)
            >
                "Coba Lagi"
            </button>
            <div class="space-y-3 border-t border-slate-100 dark:border-gray-800 pt-6 text-left">
                <label class="flex items-center gap-2 text-xs font-bold text-slate-700 dark:text-slate-200">
                    <Key attr:class="h-4 w-4" />
                    "API Key Gemini"
                </label>
                <input
                    type="password"
                    class="w-full rounded-xl border border-slate-200 dark:border-gray-700 bg-slate-50 dark:bg-gray-800 px-4 py-3 text-sm outline-none focus:border-green-500"
                    placeholder="AIza..."
                    prop:value=move || key.get()
                    on:input=move |ev| key.set(event_target_value(&ev))
                />
                <button
                    class="h-12 w-full rounded-xl bg-green-600 text-xs font-black uppercase text-white"
                    on:click=retry_with_key
                >
                    "Simpan & Coba Lagi"
                </button>
            </div>
        </div>
    }
}
