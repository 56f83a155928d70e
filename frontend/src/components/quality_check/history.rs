//! 历史标签页：搜索、多选删除、重新打开结果

use foodrescue_shared::QualityHistoryItem;
use foodrescue_shared::quality::{HistorySelection, QualityCheckFlow};
use leptos::prelude::*;

use crate::components::icons::{CheckCircle, History, Search, Trash};
use crate::state::StoreContext;

#[component]
pub fn HistoryPanel(flow: RwSignal<QualityCheckFlow>, store: StoreContext) -> impl IntoView {
    let selection = RwSignal::new(HistorySelection::new());

    let visible = Memo::new(move |_| {
        store.state.with(|s| {
            selection.with(|sel| {
                sel.filter(&s.quality_history)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    });
    let has_history = move || store.state.with(|s| !s.quality_history.is_empty());
    let selecting = move || selection.with(|s| s.selecting);

    let select_all = move |_| {
        let ids: Vec<i64> = visible.with(|v| v.iter().map(|h| h.id).collect());
        selection.update(|s| s.select_all(&ids));
    };

    let confirm_delete = move |_| {
        let ids = selection.try_update(HistorySelection::confirm_delete).unwrap_or_default();
        if ids.is_empty() {
            return;
        }
        let removed = store.mutate(|s| s.delete_quality_history(&ids)).unwrap_or(0);
        log::info!("[QualityCheck] Deleted {} history entries", removed);
    };

    view! {
        <div class="relative space-y-6 pb-10">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-black tracking-tight text-slate-900 dark:text-white">"Riwayat Penyelamatan"</h2>
                <Show when=has_history>
                    <button
                        class="text-xs font-bold text-green-600"
                        on:click=move |_| selection.update(HistorySelection::toggle_select_mode)
                    >
                        {move || if selecting() { "Batal" } else { "Pilih" }}
                    </button>
                </Show>
            </div>

            <Show
                when=has_history
                fallback=|| {
                    view! {
                        <div class="rounded-[3rem] bg-white dark:bg-gray-900 py-24 text-center shadow-sm">
                            <History attr:class="mx-auto mb-4 h-12 w-12 text-slate-200" />
                            <p class="text-sm font-bold uppercase tracking-widest text-slate-400">"Riwayat Kosong"</p>
                            <p class="mt-2 text-xs text-slate-300">"Mulai scan makanan Anda untuk menyimpannya di sini."</p>
                        </div>
                    }
                }
            >
                <div class="relative">
                    <Search attr:class="absolute left-4 top-1/2 h-4 w-4 -translate-y-1/2 text-slate-400" />
                    <input
                        class="w-full rounded-2xl bg-white dark:bg-gray-800 py-3 pl-11 pr-4 text-sm shadow-sm outline-none dark:text-white"
                        placeholder="Cari bahan atau tanggal..."
                        prop:value=move || selection.with(|s| s.query.clone())
                        on:input=move |ev| selection.update(|s| s.set_query(event_target_value(&ev)))
                    />
                </div>

                <Show when=selecting>
                    <div class="flex items-center justify-between rounded-2xl bg-white dark:bg-gray-900 px-4 py-3 shadow-sm">
                        <button class="text-xs font-bold text-slate-600 dark:text-slate-300" on:click=select_all>
                            "Pilih Semua"
                        </button>
                        <button
                            class="flex items-center gap-1 text-xs font-bold text-rose-500 disabled:opacity-40"
                            disabled=move || selection.with(|s| s.selected_count() == 0)
                            on:click=move |_| {
                                selection.update(|s| {
                                    s.request_delete();
                                });
                            }
                        >
                            <Trash attr:class="h-4 w-4" />
                            {move || format!("Hapus ({})", selection.with(HistorySelection::selected_count))}
                        </button>
                    </div>
                </Show>

                <div class="space-y-4">
                    <For each=move || visible.get() key=|h| h.id let:entry>
                        <HistoryRow entry=entry flow=flow selection=selection />
                    </For>
                </div>
            </Show>

            <Show when=move || selection.with(HistorySelection::is_pending_delete)>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-slate-900/70 p-6">
                    <div class="w-full max-w-sm rounded-3xl bg-white dark:bg-gray-900 p-6 text-center shadow-2xl">
                        <h3 class="mb-2 text-lg font-black text-slate-900 dark:text-white">"Hapus Riwayat?"</h3>
                        <p class="mb-6 text-xs text-slate-500">
                            {move || {
                                format!(
                                    "{} riwayat akan dihapus permanen.",
                                    selection.with(HistorySelection::selected_count),
                                )
                            }}
                        </p>
                        <div class="flex gap-3">
                            <button
                                class="h-11 flex-1 rounded-xl border border-slate-300 text-sm font-bold text-slate-600"
                                on:click=move |_| selection.update(HistorySelection::cancel_delete)
                            >
                                "Batal"
                            </button>
                            <button class="h-11 flex-1 rounded-xl bg-rose-500 text-sm font-bold text-white" on:click=confirm_delete>
                                "Hapus"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn HistoryRow(
    entry: QualityHistoryItem,
    flow: RwSignal<QualityCheckFlow>,
    selection: RwSignal<HistorySelection>,
) -> impl IntoView {
    let id = entry.id;
    let names = entry
        .details
        .detected_items
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let score = entry.details.quality_percentage;
    let score_class = if score > 60 {
        "rounded bg-emerald-500 px-2 py-0.5 text-[9px] font-black text-white"
    } else {
        "rounded bg-rose-500 px-2 py-0.5 text-[9px] font-black text-white"
    };
    let selecting = move || selection.with(|s| s.selecting);
    let selected = move || selection.with(|s| s.is_selected(id));
    let thumbnail = entry.thumbnail.clone();
    let date = entry.date.clone();
    let entry = StoredValue::new(entry);

    view! {
        <div
            class=move || {
                if selected() {
                    "flex items-center gap-4 rounded-3xl bg-white dark:bg-gray-900 p-4 shadow-sm ring-2 ring-green-600"
                } else {
                    "flex items-center gap-4 rounded-3xl bg-white dark:bg-gray-900 p-4 shadow-sm"
                }
            }
            on:click=move |_| {
                if selecting() {
                    selection.update(|s| s.toggle(id));
                }
            }
        >
            <Show when=selecting>
                <CheckCircle attr:class=move || {
                    if selected() { "h-5 w-5 shrink-0 text-green-600" } else { "h-5 w-5 shrink-0 text-slate-200" }
                } />
            </Show>
            <div class="h-20 w-20 shrink-0 overflow-hidden rounded-2xl bg-slate-100 dark:bg-gray-800">
                {match thumbnail {
                    Some(src) => view! { <img src=src class="h-full w-full object-cover" /> }.into_any(),
                    None => {
                        view! {
                            <div class="flex h-full w-full items-center justify-center text-slate-300">
                                <History attr:class="h-6 w-6" />
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
            <div class="min-w-0 flex-1">
                <p class="mb-1 text-[10px] font-black uppercase tracking-widest text-slate-400">{date}</p>
                <h4 class="truncate text-sm font-bold text-slate-900 dark:text-white">{names}</h4>
                <div class="mt-2 flex items-center gap-2">
                    <span class=score_class>{format!("Score: {}%", score)}</span>
                    <Show when=move || !selecting()>
                        <button
                            class="text-[10px] font-black uppercase tracking-widest text-green-600"
                            on:click=move |_| entry.with_value(|e| flow.update(|f| f.show_history_entry(e)))
                        >
                            "Lihat Detail"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
