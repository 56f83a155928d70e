//! 首页：位置、搜索入口、分类标签和排序后的商品流

use foodrescue_shared::catalog::{FEED_CATEGORIES, food_feed};
use foodrescue_shared::scoring::{CATEGORY_ALL, CATEGORY_SAVED, ScoredFeedItem, filter_feed, rank_feed};
use foodrescue_shared::{DeliveryType, FeedItem, Screen};
use leptos::prelude::*;

use crate::components::icons::{Bell, Bookmark, ChevronRight, Clock, Leaf, Search, Sparkles, Store, Truck};
use crate::state::{StoreContext, use_store};
use crate::web::router::{RouterService, use_router};

/// 记下当前商品后跳转到详情或预订页
pub fn open_item(store: &StoreContext, router: &RouterService, item: FeedItem, target: Screen) {
    store.mutate(|s| s.set_reservation_item(Some(item)));
    router.navigate(target);
}

#[component]
pub fn HomeScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();

    let (category, set_category) = signal(CATEGORY_ALL.to_string());
    let feed = StoredValue::new(food_feed());

    let ranked = Memo::new(move |_| {
        let saved = store.state.with(|s| s.saved_items.clone());
        category.with(|cat| feed.with_value(|items| rank_feed(filter_feed(items, cat, &saved))))
    });

    let user = move || store.state.with(|s| s.user.clone());
    let location = move || store.state.with(|s| s.location_name().to_string());

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950 pb-6">
            <div class="sticky top-0 z-20 bg-white dark:bg-gray-900 px-6 pt-6 pb-2 shadow-sm">
                // 头像、位置、通知
                <div class="mb-4 flex items-center justify-between">
                    <div class="flex items-center gap-3">
                        <button
                            class="h-10 w-10 overflow-hidden rounded-full border border-gray-100 dark:border-gray-800"
                            on:click=move |_| router.navigate(Screen::Profile)
                        >
                            <img src=move || user().avatar alt="Avatar" class="h-full w-full object-cover" />
                        </button>
                        <button class="text-left" on:click=move |_| router.navigate(Screen::LocationSelect)>
                            <p class="text-xs text-gray-500 dark:text-gray-400">"Lokasi Anda,"</p>
                            <div class="flex items-center gap-1">
                                <h3 class="text-sm font-bold text-gray-900 dark:text-gray-50">{location}</h3>
                                <ChevronRight attr:class="h-3.5 w-3.5 text-green-600" />
                            </div>
                        </button>
                    </div>
                    <button
                        class="relative rounded-full p-2 text-gray-600 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-800"
                        on:click=move |_| router.navigate(Screen::Notifications)
                    >
                        <Bell attr:class="h-6 w-6" />
                        <span class="absolute top-2 right-2.5 h-2 w-2 rounded-full border border-white bg-red-500"></span>
                    </button>
                </div>

                // 搜索入口
                <button
                    class="relative mb-4 flex w-full items-center gap-3 rounded-full border border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 px-4 py-3 text-sm text-gray-400"
                    on:click=move |_| router.navigate(Screen::Explore)
                >
                    <Search attr:class="h-5 w-5" />
                    "Cari makanan di sekitar..."
                </button>

                // 分类
                <div class="flex gap-2 overflow-x-auto pb-2">
                    {FEED_CATEGORIES
                        .iter()
                        .map(|cat| {
                            let cat = *cat;
                            view! {
                                <button
                                    on:click=move |_| set_category.set(cat.to_string())
                                    class=move || {
                                        if category.with(|c| c == cat) {
                                            "whitespace-nowrap rounded-full border border-green-600 bg-green-600 px-4 py-1.5 text-xs font-medium text-white"
                                        } else {
                                            "whitespace-nowrap rounded-full border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800 px-4 py-1.5 text-xs font-medium text-gray-600 dark:text-gray-300"
                                        }
                                    }
                                >
                                    {(cat == CATEGORY_SAVED).then(|| view! { <Bookmark attr:class="mr-1 inline h-2.5 w-2.5" /> })}
                                    {cat}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="px-6 pt-4">
                <PromoBanner />
                <div class="mt-6 space-y-5">
                    <Show
                        when=move || !ranked.with(Vec::is_empty)
                        fallback=|| {
                            view! {
                                <p class="py-10 text-center text-sm text-gray-400">"Belum ada makanan di kategori ini."</p>
                            }
                        }
                    >
                        <For each=move || ranked.get() key=|s| s.item.id let:scored>
                            <FeedCard scored=scored />
                        </For>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
fn PromoBanner() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="relative overflow-hidden rounded-3xl bg-gradient-to-r from-green-600 to-emerald-400 p-5 text-white shadow-lg">
            <h2 class="mb-1 text-lg font-bold">"Forum Berbagi Makanan"</h2>
            <p class="mb-4 max-w-[70%] text-xs text-green-50">"Lihat surplus makanan yang dibagikan mitra hari ini."</p>
            <div class="flex gap-2">
                <button
                    class="rounded-full bg-white px-4 py-2 text-xs font-bold text-green-700"
                    on:click=move |_| router.navigate(Screen::MapView)
                >
                    "Peta Lokasi"
                </button>
                <button
                    class="rounded-full bg-green-800 px-4 py-2 text-xs font-bold text-white"
                    on:click=move |_| router.navigate(Screen::CreateRequest)
                >
                    "Buat Request"
                </button>
            </div>
        </div>
    }
}

/// 商品卡片
///
/// 点击卡片进入商户详情，点击按钮直接进入预订表单。
#[component]
pub fn FeedCard(scored: ScoredFeedItem) -> impl IntoView {
    let router = use_router();
    let store = use_store();

    let best_match = scored.is_best_match();
    let FeedItem {
        id,
        partner,
        status,
        food_name,
        distance,
        time_left,
        quantity,
        image,
        avatar,
        delivery_type,
        ..
    } = scored.item.clone();
    let item = StoredValue::new(scored.item);
    let is_saved = move || store.state.with(|s| s.saved_items.contains(&id));

    let open = move || open_item(&store, &router, item.get_value(), Screen::PartnerDetail);
    let status_class = if status == "Buka" {
        "rounded-full bg-green-100 px-2 py-0.5 text-[10px] font-semibold text-green-700"
    } else {
        "rounded-full bg-red-100 px-2 py-0.5 text-[10px] font-semibold text-red-700"
    };

    view! {
        <div
            class="group relative cursor-pointer overflow-hidden rounded-2xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800 shadow-sm hover:shadow-md"
            on:click=move |_| open()
        >
            {best_match
                .then(|| {
                    view! {
                        <div class="absolute top-0 left-0 z-20 flex items-center gap-1 rounded-br-xl bg-gradient-to-r from-green-600 to-emerald-500 px-3 py-1 text-[10px] font-bold text-white">
                            <Sparkles attr:class="h-2.5 w-2.5" />
                            "Paling Cocok Untukmu"
                        </div>
                    }
                })}
            <div class="flex items-center gap-3 border-b border-gray-50 dark:border-gray-700 p-3">
                <img src=avatar class="h-8 w-8 rounded-full object-cover" />
                <div class="flex-1">
                    <h4 class="text-sm font-bold text-gray-900 dark:text-gray-50">{partner}</h4>
                    <div class="mt-0.5 flex items-center gap-2">
                        <span class=status_class>{status}</span>
                        <span class="text-[10px] text-gray-500">"• " {distance}</span>
                    </div>
                </div>
                <button
                    class=move || {
                        if is_saved() { "z-20 text-green-600" } else { "z-20 text-gray-400 hover:text-green-600" }
                    }
                    on:click=move |ev| {
                        ev.stop_propagation();
                        let saved = store.mutate(|s| s.toggle_saved(id));
                        log::debug!("[Home] item {} saved: {:?}", id, saved);
                    }
                >
                    <Bookmark attr:class=move || if is_saved() { "h-5 w-5 fill-current" } else { "h-5 w-5" } />
                </button>
            </div>
            <div class="relative h-40 overflow-hidden bg-gray-100 dark:bg-gray-900">
                <img src=image class="h-full w-full object-cover transition-transform duration-500 group-hover:scale-105" />
                <div class="absolute top-2 right-2 z-10">
                    {match delivery_type {
                        DeliveryType::Delivery => {
                            view! {
                                <span class="flex items-center gap-1 rounded-full bg-blue-500 px-2 py-1 text-[10px] font-bold text-white">
                                    <Truck attr:class="h-2.5 w-2.5" />
                                    "Dikirim"
                                </span>
                            }
                                .into_any()
                        }
                        DeliveryType::Pickup => {
                            view! {
                                <span class="flex items-center gap-1 rounded-full bg-orange-500 px-2 py-1 text-[10px] font-bold text-white">
                                    <Store attr:class="h-2.5 w-2.5" />
                                    "Ambil"
                                </span>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </div>
            <div class="p-4">
                <h3 class="mb-2 text-base font-bold text-gray-900 dark:text-gray-50">{food_name}</h3>
                <div class="mb-4 flex items-center gap-4 rounded-lg bg-gray-50 dark:bg-gray-900/50 p-2 text-xs">
                    <div class="flex items-center gap-1.5 font-medium text-orange-600">
                        <Clock attr:class="h-3.5 w-3.5" />
                        {time_left}
                    </div>
                    <div class="h-3 w-px bg-gray-300"></div>
                    <div class="flex items-center gap-1.5 font-medium text-green-600">
                        <Leaf attr:class="h-3.5 w-3.5" />
                        "Sisa " {quantity}
                    </div>
                </div>
                <button
                    class="h-10 w-full rounded-xl bg-green-600 text-sm font-semibold text-white hover:bg-green-700"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        open_item(&store, &router, item.get_value(), Screen::ReservationForm);
                    }
                >
                    "Ambil Makanan"
                </button>
            </div>
        </div>
    }
}
