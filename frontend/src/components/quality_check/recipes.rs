//! 食谱标签页

use foodrescue_shared::quality::{QualityCheckFlow, RECIPE_FAILED_MESSAGE};
use foodrescue_shared::{AiError, Difficulty, RecipeSuggestion};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::ai::AiService;
use crate::components::icons::{ChefHat, ExternalLink, Loader, Search};
use crate::web::alert;

fn report_failure(e: &AiError) {
    // 配额错误已切到配额提示页
    if !e.is_quota_exceeded() {
        alert(RECIPE_FAILED_MESSAGE);
    }
}

/// 根据检测结果生成第一批食谱，并切换到食谱页
pub fn load_initial_recipes(flow: RwSignal<QualityCheckFlow>) {
    let Some(request) = flow.try_update(|f| f.initial_recipes_request()).flatten() else {
        return;
    };

    spawn_local(async move {
        let outcome = AiService::load()
            .generate_recipes(&request.items, &request.exclude_titles, request.iteration)
            .await;
        if let Some(Err(e)) = flow.try_update(|f| f.accept_initial(outcome)) {
            report_failure(&e);
        }
    });
}

fn load_more_recipes(flow: RwSignal<QualityCheckFlow>) {
    let Some(request) = flow.try_update(|f| f.load_more_request()).flatten() else {
        return;
    };

    spawn_local(async move {
        let outcome = AiService::load()
            .generate_recipes(&request.items, &request.exclude_titles, request.iteration)
            .await;
        match flow.try_update(|f| f.accept_more(outcome)) {
            Some(Ok(0)) => log::info!("[QualityCheck] No new recipes, stop loading"),
            Some(Ok(added)) => log::debug!("[QualityCheck] {} more recipes", added),
            Some(Err(e)) => report_failure(&e),
            None => {}
        }
    });
}

fn difficulty_badge(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Mudah => "bg-green-100 text-green-700",
        Difficulty::Sedang => "bg-blue-100 text-blue-700",
        Difficulty::Sulit => "bg-red-100 text-red-600",
    }
}

#[component]
pub fn RecipePanel(flow: RwSignal<QualityCheckFlow>) -> impl IntoView {
    let loading = move || flow.with(|f| f.recipes_loading);
    let recipes = Memo::new(move |_| {
        flow.with(|f| f.filtered_recipes().into_iter().cloned().collect::<Vec<_>>())
    });

    view! {
        <div class="space-y-6 pb-10">
            <div class="flex flex-col gap-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-black tracking-tight text-slate-900 dark:text-white">"Katalog Resep Anti-Waste"</h2>
                    <span class="rounded-full bg-orange-100 px-2 py-0.5 text-[10px] font-bold text-orange-600">"Grounded AI"</span>
                </div>
                <div class="relative">
                    <Search attr:class="absolute left-5 top-1/2 h-4 w-4 -translate-y-1/2 text-slate-400" />
                    <input
                        class="w-full rounded-[1.5rem] bg-white dark:bg-gray-800 py-4 pl-14 pr-6 text-sm shadow-sm outline-none dark:text-white"
                        placeholder="Cari resep spesifik..."
                        prop:value=move || flow.with(|f| f.recipe_query.clone())
                        on:input=move |ev| flow.update(|f| f.set_recipe_query(event_target_value(&ev)))
                    />
                </div>
                <div class="flex gap-2">
                    {Difficulty::ALL
                        .map(|d| {
                            view! {
                                <button
                                    class=move || {
                                        if flow.with(|f| f.difficulty_filter == Some(d)) {
                                            "rounded-full bg-green-600 px-4 py-1.5 text-xs font-bold text-white"
                                        } else {
                                            "rounded-full bg-white dark:bg-gray-800 px-4 py-1.5 text-xs font-bold text-slate-500"
                                        }
                                    }
                                    on:click=move |_| flow.update(|f| f.toggle_difficulty(d))
                                >
                                    {d.as_str()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            {move || {
                if loading() {
                    view! {
                        <div class="flex flex-col items-center justify-center py-24 text-slate-400">
                            <Loader attr:class="mb-4 h-9 w-9 animate-spin text-green-600" />
                            <p class="animate-pulse text-sm font-black text-slate-900 dark:text-white">"Gemini sedang meracik menu..."</p>
                        </div>
                    }
                        .into_any()
                } else if recipes.with(Vec::is_empty) {
                    view! {
                        <div class="rounded-[2.5rem] bg-white dark:bg-gray-900 py-24 text-center">
                            <ChefHat attr:class="mx-auto mb-4 h-12 w-12 text-slate-200" />
                            <p class="text-sm font-bold uppercase tracking-widest text-slate-400">"Resep tidak ditemukan"</p>
                            <p class="mt-2 px-12 text-xs leading-relaxed text-slate-300">
                                "Pastikan Anda sudah melakukan verifikasi bahan terlebih dahulu."
                            </p>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="space-y-6">
                            <For each=move || recipes.get() key=|r| r.title.to_lowercase() let:recipe>
                                <RecipeCard recipe=recipe />
                            </For>
                            <Show when=move || flow.with(|f| f.can_load_more)>
                                <button
                                    class="flex h-16 w-full items-center justify-center gap-2 rounded-[2rem] border-2 border-dashed border-slate-300 bg-white dark:bg-gray-900 text-sm font-bold text-slate-600 disabled:opacity-50"
                                    disabled=move || flow.with(|f| f.more_loading)
                                    on:click=move |_| load_more_recipes(flow)
                                >
                                    <Show when=move || flow.with(|f| f.more_loading)>
                                        <Loader attr:class="h-4 w-4 animate-spin" />
                                    </Show>
                                    "Muat Lebih Banyak"
                                </button>
                            </Show>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn RecipeCard(recipe: RecipeSuggestion) -> impl IntoView {
    let steps = recipe.instructions.steps();

    view! {
        <div class="overflow-hidden rounded-[2.5rem] bg-white dark:bg-gray-900 shadow-lg">
            <div class="flex items-center justify-between border-b border-slate-100 dark:border-gray-800 bg-slate-50/50 dark:bg-gray-800/50 p-6">
                <h3 class="text-sm font-bold tracking-tight text-slate-900 dark:text-white">{recipe.title}</h3>
                <span class=format!("rounded-full px-2 py-0.5 text-[10px] font-bold {}", difficulty_badge(recipe.difficulty))>
                    {recipe.difficulty.as_str()}
                </span>
            </div>
            <div class="space-y-4 p-6">
                <div class="flex flex-wrap gap-2">
                    {recipe
                        .ingredients_used
                        .into_iter()
                        .map(|i| {
                            view! {
                                <span class="rounded-lg bg-green-50 dark:bg-green-950/30 px-2 py-1 text-[10px] font-bold text-green-700">{i}</span>
                            }
                        })
                        .collect_view()}
                </div>
                <ol class="list-decimal space-y-1 rounded-2xl border border-slate-100 dark:border-gray-700 bg-slate-50 dark:bg-gray-800 p-4 pl-8 text-xs text-slate-500">
                    {steps.into_iter().map(|s| view! { <li>{s}</li> }).collect_view()}
                </ol>
                {recipe
                    .source_url
                    .map(|url| {
                        view! {
                            <a
                                href=url
                                target="_blank"
                                rel="noreferrer"
                                class="flex items-center justify-between rounded-3xl bg-green-600/10 p-5 text-xs font-black uppercase text-green-700 hover:bg-green-600 hover:text-white"
                            >
                                "Lihat Resep Cookpad"
                                <ExternalLink attr:class="h-4 w-4" />
                            </a>
                        }
                    })}
            </div>
        </div>
    }
}
