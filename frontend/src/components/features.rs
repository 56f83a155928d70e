//! 搜索、地图、商户详情、求助请求与环保影响报告

use foodrescue_shared::catalog::{food_feed, search_feed};
use foodrescue_shared::scoring::rank_feed;
use foodrescue_shared::{ImpactEstimate, OrderStatus, Screen};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::ai::AiService;
use crate::components::home::{FeedCard, open_item};
use crate::components::icons::{Bookmark, Clock, Droplets, Heart, Leaf, MapPin, Search, Sparkles, Truck, Zap};
use crate::components::ui::{EmptyState, Notice, ScreenHeader, Spinner, Toast};
use crate::state::use_store;
use crate::web::alert;
use crate::web::router::use_router;

#[component]
pub fn ExploreScreen() -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let feed = StoredValue::new(food_feed());
    let results = Memo::new(move |_| {
        query.with(|q| feed.with_value(|items| rank_feed(search_feed(items, q))))
    });

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Jelajahi" />
            <div class="p-4">
                <div class="relative mb-4">
                    <Search attr:class="absolute left-4 top-1/2 h-5 w-5 -translate-y-1/2 text-gray-400" />
                    <input
                        class="w-full rounded-full border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800 py-3 pl-11 pr-4 text-sm text-gray-900 dark:text-gray-50 outline-none focus:border-green-500"
                        placeholder="Cari makanan, mitra, atau kategori..."
                        autofocus
                        prop:value=query
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                </div>
                <p class="mb-3 text-xs text-gray-400">{move || format!("{} hasil", results.with(Vec::len))}</p>
                <div class="space-y-5">
                    <Show
                        when=move || !results.with(Vec::is_empty)
                        fallback=|| view! { <EmptyState message="Tidak ada makanan yang cocok." /> }
                    >
                        <For each=move || results.get() key=|s| s.item.id let:scored>
                            <FeedCard scored=scored />
                        </For>
                    </Show>
                </div>
            </div>
        </div>
    }
}

/// 地图占位：按顺序把商户钉在示意网格上
#[component]
pub fn MapViewScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let nearby = rank_feed(food_feed().iter());

    const PIN_POSITIONS: [(u32, u32); 4] = [(20, 30), (62, 22), (40, 58), (74, 66)];

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Peta Lokasi" />
            <div class="relative mx-4 mt-4 h-64 overflow-hidden rounded-3xl bg-[linear-gradient(90deg,#e5e7eb_1px,transparent_1px),linear-gradient(#e5e7eb_1px,transparent_1px)] bg-[size:32px_32px] bg-green-50 dark:bg-gray-800">
                {nearby
                    .iter()
                    .zip(PIN_POSITIONS)
                    .map(|(scored, (left, top))| {
                        let style = format!("left: {}%; top: {}%;", left, top);
                        let label = scored.item.partner.clone();
                        view! {
                            <div class="absolute flex -translate-x-1/2 -translate-y-full flex-col items-center" style=style>
                                <span class="mb-1 whitespace-nowrap rounded-full bg-white px-2 py-0.5 text-[10px] font-bold text-gray-700 shadow">
                                    {label}
                                </span>
                                <MapPin attr:class="h-7 w-7 fill-green-600 text-white" />
                            </div>
                        }
                    })
                    .collect_view()}
                <div class="absolute left-1/2 top-1/2 h-4 w-4 -translate-x-1/2 -translate-y-1/2 rounded-full border-4 border-white bg-blue-500 shadow"></div>
            </div>

            <div class="space-y-3 p-4">
                <h2 class="text-xs font-semibold uppercase tracking-wide text-gray-400">"Mitra Terdekat"</h2>
                {nearby
                    .into_iter()
                    .map(|scored| {
                        let item = scored.item;
                        let (avatar, partner, food_name, distance) = (
                            item.avatar.clone(),
                            item.partner.clone(),
                            item.food_name.clone(),
                            item.distance.clone(),
                        );
                        view! {
                            <button
                                class="flex w-full items-center gap-3 rounded-2xl bg-white dark:bg-gray-800 p-3 text-left shadow-sm"
                                on:click=move |_| open_item(&store, &router, item.clone(), Screen::PartnerDetail)
                            >
                                <img src=avatar class="h-10 w-10 rounded-full object-cover" />
                                <div class="min-w-0 flex-1">
                                    <p class="truncate text-sm font-bold text-gray-900 dark:text-gray-50">{partner}</p>
                                    <p class="truncate text-xs text-gray-500">{food_name}</p>
                                </div>
                                <span class="text-xs font-semibold text-green-600">{distance}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn PartnerDetailScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let Some(item) = store.state.with_untracked(|s| s.reservation_item.clone()) else {
        return view! {
            <div class="min-h-full bg-white dark:bg-gray-900">
                <ScreenHeader title="Detail Mitra" />
                <EmptyState message="Pilih makanan terlebih dahulu." />
            </div>
        }
        .into_any();
    };

    let id = item.id;
    let is_favorite = move || store.state.with(|s| s.favorites.contains(&id));
    let is_saved = move || store.state.with(|s| s.saved_items.contains(&id));
    let item = StoredValue::new(item);
    let field = move |f: fn(&foodrescue_shared::FeedItem) -> String| item.with_value(f);

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900 pb-6">
            <ScreenHeader title="Detail Mitra">
                <button
                    class=move || if is_favorite() { "p-2 text-red-500" } else { "p-2 text-gray-400" }
                    on:click=move |_| {
                        store.mutate(|s| s.toggle_favorite(id));
                    }
                >
                    <Heart attr:class=move || if is_favorite() { "h-5 w-5 fill-current" } else { "h-5 w-5" } />
                </button>
                <button
                    class=move || if is_saved() { "p-2 text-green-600" } else { "p-2 text-gray-400" }
                    on:click=move |_| {
                        store.mutate(|s| s.toggle_saved(id));
                    }
                >
                    <Bookmark attr:class=move || if is_saved() { "h-5 w-5 fill-current" } else { "h-5 w-5" } />
                </button>
            </ScreenHeader>

            <img src=field(|i| i.image.clone()) class="h-52 w-full object-cover" />
            <div class="space-y-4 p-5">
                <div class="flex items-center gap-3">
                    <img src=field(|i| i.avatar.clone()) class="h-12 w-12 rounded-full object-cover" />
                    <div>
                        <h2 class="text-lg font-bold text-gray-900 dark:text-gray-50">{field(|i| i.partner.clone())}</h2>
                        <p class="text-xs text-gray-500">
                            {field(|i| i.status.clone())} " • " {field(|i| i.distance.clone())} " • "
                            {field(|i| i.category.clone())}
                        </p>
                    </div>
                </div>
                <h3 class="text-xl font-bold text-gray-900 dark:text-gray-50">{field(|i| i.food_name.clone())}</h3>
                <div class="grid grid-cols-3 gap-3 text-center text-xs">
                    <div class="rounded-xl bg-orange-50 dark:bg-orange-950/30 p-3 text-orange-700">
                        <Clock attr:class="mx-auto mb-1 h-4 w-4" />
                        {field(|i| i.time_left.clone())}
                    </div>
                    <div class="rounded-xl bg-green-50 dark:bg-green-950/30 p-3 text-green-700">
                        <Leaf attr:class="mx-auto mb-1 h-4 w-4" />
                        "Sisa " {field(|i| i.quantity.clone())}
                    </div>
                    <div class="rounded-xl bg-blue-50 dark:bg-blue-950/30 p-3 text-blue-700">
                        <Truck attr:class="mx-auto mb-1 h-4 w-4" />
                        {item.with_value(|i| i.delivery_type.label())}
                    </div>
                </div>
                <button
                    class="flex w-full items-center justify-center gap-2 rounded-xl border border-green-600 py-3 text-sm font-semibold text-green-700"
                    on:click=move |_| router.navigate(Screen::ImpactReport)
                >
                    <Sparkles attr:class="h-4 w-4" />
                    "Lihat Dampak Lingkungan"
                </button>
                <button
                    class="w-full rounded-xl bg-green-600 py-3 font-semibold text-white"
                    on:click=move |_| router.navigate(Screen::ReservationForm)
                >
                    "Ambil Makanan"
                </button>
            </div>
        </div>
    }
    .into_any()
}

/// 求助请求只在本页确认，不写入全局状态
#[component]
pub fn CreateRequestScreen() -> impl IntoView {
    let notice: Notice = RwSignal::new(None);
    let (food, set_food) = signal(String::new());
    let (portions, set_portions) = signal(String::from("1"));
    let (note, set_note) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if food.with(|f| f.trim().is_empty()) {
            alert("Mohon isi jenis makanan yang dibutuhkan.");
            return;
        }
        log::info!("[Request] {} x {} ({})", portions.get(), food.get(), note.get());
        notice.set(Some(("Request berhasil dikirim ke mitra sekitar.".to_string(), false)));
        set_food.set(String::new());
        set_portions.set("1".into());
        set_note.set(String::new());
    };

    let input_class = "w-full rounded-xl border border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 px-4 py-3 text-sm text-gray-900 dark:text-gray-50 outline-none focus:border-green-500";

    view! {
        <div class="relative min-h-full bg-white dark:bg-gray-900">
            <Toast notice=notice />
            <ScreenHeader title="Buat Request" />
            <form class="space-y-4 p-6" on:submit=on_submit>
                <p class="text-sm text-gray-500">"Beri tahu mitra sekitar makanan apa yang Anda butuhkan."</p>
                <input
                    class=input_class
                    placeholder="Jenis makanan (mis. Nasi, Roti)"
                    prop:value=food
                    on:input=move |ev| set_food.set(event_target_value(&ev))
                />
                <input
                    class=input_class
                    type="number"
                    min="1"
                    placeholder="Jumlah porsi"
                    prop:value=portions
                    on:input=move |ev| set_portions.set(event_target_value(&ev))
                />
                <textarea
                    class=format!("{} h-24 resize-none", input_class)
                    placeholder="Catatan untuk mitra"
                    prop:value=note
                    on:input=move |ev| set_note.set(event_target_value(&ev))
                ></textarea>
                <button type="submit" class="w-full rounded-xl bg-green-600 py-3 font-semibold text-white">
                    "Kirim Request"
                </button>
            </form>
        </div>
    }
}

/// 汇总订单与扫描记录，并可让 AI 估算当前商品的环保影响
#[component]
pub fn ImpactReportScreen() -> impl IntoView {
    let store = use_store();
    let estimate = RwSignal::new(Option::<ImpactEstimate>::None);
    let loading = RwSignal::new(false);

    let rescued = move || {
        store.state.with(|s| {
            s.history_items
                .iter()
                .filter(|o| o.status == OrderStatus::Selesai)
                .count()
        })
    };
    let scans = move || store.state.with(|s| s.quality_history.len());
    let target = move || {
        store.state.with(|s| {
            s.reservation_item
                .as_ref()
                .map(|i| (i.food_name.clone(), i.quantity.clone()))
        })
    };

    let on_estimate = move |_| {
        let Some((food, quantity)) = target() else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            match AiService::load().analyze_impact(&food, &quantity).await {
                Ok(result) => estimate.set(Some(result)),
                Err(e) if e.is_quota_exceeded() => {
                    alert("Kuota AI habis. Silakan coba lagi nanti.");
                }
                Err(e) => {
                    log::error!("[Impact] Estimate failed ({}): {}", e.error_code(), e);
                    alert("Gagal menghitung dampak.");
                }
            }
            loading.set(false);
        });
    };

    let stat = |label: &'static str, value: Signal<String>| {
        view! {
            <div class="rounded-2xl bg-white dark:bg-gray-800 p-4 shadow-sm">
                <p class="text-2xl font-bold text-green-600">{value}</p>
                <p class="text-xs text-gray-500">{label}</p>
            </div>
        }
    };

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Laporan Dampak" />
            <div class="space-y-4 p-4">
                <div class="grid grid-cols-2 gap-3">
                    {stat("Pesanan Selesai", Signal::derive(move || rescued().to_string()))}
                    {stat("Cek Kualitas", Signal::derive(move || scans().to_string()))}
                </div>

                <div class="rounded-2xl bg-white dark:bg-gray-800 p-4 shadow-sm">
                    <h3 class="mb-1 text-sm font-bold text-gray-900 dark:text-gray-50">"Estimasi AI"</h3>
                    {move || match target() {
                        Some((food, quantity)) => {
                            view! {
                                <p class="mb-3 text-xs text-gray-500">{format!("{} • {}", food, quantity)}</p>
                            }
                                .into_any()
                        }
                        None => {
                            view! {
                                <p class="mb-3 text-xs text-gray-500">"Pilih makanan di beranda untuk menghitung dampaknya."</p>
                            }
                                .into_any()
                        }
                    }}
                    <button
                        class="w-full rounded-xl bg-green-600 py-2.5 text-sm font-semibold text-white disabled:opacity-50"
                        disabled=move || loading.get() || target().is_none()
                        on:click=on_estimate
                    >
                        "Hitung Dampak"
                    </button>
                </div>

                <Show when=move || loading.get()>
                    <Spinner label="Menghitung dampak..." />
                </Show>

                {move || {
                    estimate
                        .get()
                        .map(|e| {
                            view! {
                                <div class="space-y-3 rounded-2xl bg-white dark:bg-gray-800 p-4 shadow-sm">
                                    <div class="flex items-center gap-3 text-sm">
                                        <Leaf attr:class="h-5 w-5 text-green-600" />
                                        <span class="flex-1 text-gray-500">"CO₂ dihemat"</span>
                                        <span class="font-bold text-gray-900 dark:text-gray-50">{e.co2_saved}</span>
                                    </div>
                                    <div class="flex items-center gap-3 text-sm">
                                        <Zap attr:class="h-5 w-5 text-yellow-500" />
                                        <span class="flex-1 text-gray-500">"Uang dihemat"</span>
                                        <span class="font-bold text-gray-900 dark:text-gray-50">{e.money_saved}</span>
                                    </div>
                                    <div class="flex items-center gap-3 text-sm">
                                        <Droplets attr:class="h-5 w-5 text-blue-500" />
                                        <span class="flex-1 text-gray-500">"Metana dicegah"</span>
                                        <span class="font-bold text-gray-900 dark:text-gray-50">{e.methane_prevented}</span>
                                    </div>
                                    <p class="border-t border-gray-100 dark:border-gray-700 pt-3 text-xs text-gray-500">
                                        {e.nutrition_summary}
                                    </p>
                                </div>
                            }
                        })
                }}
            </div>
        </div>
    }
}
