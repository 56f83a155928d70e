//! 预订表单、订单记录与收藏列表

use foodrescue_shared::catalog::{food_feed, order_image};
use foodrescue_shared::date::Timestamp;
use foodrescue_shared::form::ReservationDraft;
use foodrescue_shared::scoring::rank_feed;
use foodrescue_shared::{DeliveryType, HistoryItem, OrderStatus, Screen};
use leptos::prelude::*;

use crate::components::home::{FeedCard, open_item};
use crate::components::icons::{CheckCircle, MapPin, Minus, Plus};
use crate::components::ui::{EmptyState, ScreenHeader};
use crate::state::use_store;
use crate::web::alert;
use crate::web::router::use_router;

// =========================================================
// 预订
// =========================================================

#[component]
pub fn ReservationFormScreen() -> impl IntoView {
    let store = use_store();
    let item = store.state.with_untracked(|s| s.reservation_item.clone());

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Form Reservasi" />
            {match item {
                Some(item) => view! { <ReservationForm draft=ReservationDraft::new(item) /> }.into_any(),
                None => view! { <EmptyState message="Pilih makanan terlebih dahulu." /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ReservationForm(draft: ReservationDraft) -> impl IntoView {
    let router = use_router();
    let store = use_store();

    let max = draft.max_portions();
    let (food_name, partner, image, quantity) = (
        draft.item.food_name.clone(),
        draft.item.partner.clone(),
        draft.item.image.clone(),
        draft.item.quantity.clone(),
    );
    let draft = RwSignal::new(draft);
    let addresses = move || store.state.with(|s| s.addresses.clone());

    let on_submit = move |_| {
        let current = draft.get();
        if let Err(e) = current.validate() {
            alert(&e.to_string());
            return;
        }
        let now = Timestamp::now();
        let Some(id) = store.mutate(|s| s.next_order_id(now)) else {
            return;
        };
        match current.into_order(id, now) {
            Ok(order) => {
                log::info!("[Reservation] Order #{} created: {}", order.id, order.item);
                store.mutate(|s| s.record_reservation(order));
                router.navigate(Screen::ReservationSuccess);
            }
            Err(e) => alert(&e.to_string()),
        }
    };

    let delivery_button = move |kind: DeliveryType| {
        view! {
            <button
                class=move || {
                    if draft.with(|d| d.delivery == kind) {
                        "flex-1 rounded-xl border-2 border-green-600 bg-green-50 dark:bg-green-950/30 py-3 text-sm font-semibold text-green-700"
                    } else {
                        "flex-1 rounded-xl border-2 border-gray-100 dark:border-gray-700 py-3 text-sm text-gray-500"
                    }
                }
                on:click=move |_| draft.update(|d| d.delivery = kind)
            >
                {kind.label()}
            </button>
        }
    };

    view! {
        <div class="space-y-5 p-4">
            <div class="flex gap-3 rounded-2xl bg-white dark:bg-gray-800 p-3 shadow-sm">
                <img src=image class="h-20 w-20 rounded-xl object-cover" />
                <div class="min-w-0 flex-1">
                    <h3 class="font-bold text-gray-900 dark:text-gray-50">{food_name}</h3>
                    <p class="text-xs text-gray-500">{partner}</p>
                    <p class="mt-1 text-xs font-semibold text-green-600">"Sisa " {quantity}</p>
                </div>
            </div>

            <div class="rounded-2xl bg-white dark:bg-gray-800 p-4 shadow-sm">
                <p class="mb-3 text-sm font-semibold text-gray-700 dark:text-gray-200">"Jumlah Porsi"</p>
                <div class="flex items-center justify-center gap-6">
                    <button
                        class="rounded-full bg-gray-100 dark:bg-gray-700 p-2 disabled:opacity-40"
                        disabled=move || draft.with(|d| d.portions <= 1)
                        on:click=move |_| draft.update(|d| d.set_portions(d.portions.saturating_sub(1)))
                    >
                        <Minus attr:class="h-4 w-4" />
                    </button>
                    <span class="w-8 text-center text-2xl font-bold text-gray-900 dark:text-gray-50">
                        {move || draft.with(|d| d.portions)}
                    </span>
                    <button
                        class="rounded-full bg-gray-100 dark:bg-gray-700 p-2 disabled:opacity-40"
                        disabled=move || draft.with(|d| d.portions >= max)
                        on:click=move |_| draft.update(|d| d.set_portions(d.portions + 1))
                    >
                        <Plus attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>

            <div class="rounded-2xl bg-white dark:bg-gray-800 p-4 shadow-sm">
                <p class="mb-3 text-sm font-semibold text-gray-700 dark:text-gray-200">"Metode Pengambilan"</p>
                <div class="flex gap-3">
                    {delivery_button(DeliveryType::Pickup)}
                    {delivery_button(DeliveryType::Delivery)}
                </div>
            </div>

            <Show when=move || draft.with(|d| d.delivery == DeliveryType::Delivery)>
                <div class="space-y-2 rounded-2xl bg-white dark:bg-gray-800 p-4 shadow-sm">
                    <div class="flex items-center justify-between">
                        <p class="text-sm font-semibold text-gray-700 dark:text-gray-200">"Alamat Pengiriman"</p>
                        <button
                            class="text-xs font-semibold text-green-600"
                            on:click=move |_| router.navigate(Screen::LocationSelect)
                        >
                            "Kelola"
                        </button>
                    </div>
                    <For each=addresses key=|a| a.id let:address>
                        {
                            let id = address.id;
                            view! {
                                <label class="flex cursor-pointer items-start gap-3 rounded-xl border border-gray-100 dark:border-gray-700 p-3">
                                    <input
                                        type="radio"
                                        name="address"
                                        class="mt-1 accent-green-600"
                                        prop:checked=move || draft.with(|d| d.address_id == Some(id))
                                        on:change=move |_| draft.update(|d| d.address_id = Some(id))
                                    />
                                    <div class="min-w-0">
                                        <p class="flex items-center gap-1 text-sm font-semibold text-gray-900 dark:text-gray-50">
                                            <MapPin attr:class="h-3.5 w-3.5 text-green-600" />
                                            {address.title}
                                        </p>
                                        <p class="truncate text-xs text-gray-500">{address.desc}</p>
                                    </div>
                                </label>
                            }
                        }
                    </For>
                </div>
            </Show>

            <button
                class="w-full rounded-xl bg-green-600 py-3 font-semibold text-white hover:bg-green-700"
                on:click=on_submit
            >
                "Konfirmasi Reservasi"
            </button>
        </div>
    }
}

#[component]
pub fn ReservationSuccessScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let latest = move || store.state.with(|s| s.history_items.first().map(|o| o.item.clone()));

    view! {
        <div class="flex min-h-full flex-col items-center justify-center gap-4 bg-white dark:bg-gray-900 p-8 text-center">
            <div class="flex h-20 w-20 items-center justify-center rounded-full bg-green-100 dark:bg-green-950/40">
                <CheckCircle attr:class="h-10 w-10 text-green-600" />
            </div>
            <h2 class="text-2xl font-bold text-gray-900 dark:text-gray-50">"Reservasi Berhasil!"</h2>
            <p class="text-sm text-gray-500">{latest}</p>
            <p class="text-xs text-gray-400">"Terima kasih telah ikut menyelamatkan makanan."</p>
            <div class="mt-6 w-full space-y-3">
                <button
                    class="w-full rounded-xl bg-green-600 py-3 font-semibold text-white"
                    on:click=move |_| router.navigate(Screen::History)
                >
                    "Lihat Pesanan"
                </button>
                <button
                    class="w-full rounded-xl py-3 text-sm font-semibold text-gray-500"
                    on:click=move |_| router.reset_to(Screen::Home)
                >
                    "Kembali ke Beranda"
                </button>
            </div>
        </div>
    }
}

// =========================================================
// 订单记录
// =========================================================

fn status_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Dikemas => "bg-orange-100 text-orange-700",
        OrderStatus::Dikirim => "bg-blue-100 text-blue-700",
        OrderStatus::Selesai => "bg-green-100 text-green-700",
        OrderStatus::Dibatalkan => "bg-red-100 text-red-700",
    }
}

#[component]
pub fn HistoryScreen() -> impl IntoView {
    let store = use_store();
    let orders = move || store.state.with(|s| s.history_items.clone());

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Riwayat Pesanan" />
            <div class="space-y-3 p-4">
                <Show
                    when=move || store.state.with(|s| !s.history_items.is_empty())
                    fallback=|| view! { <EmptyState message="Belum ada pesanan." /> }
                >
                    <For each=orders key=|o| o.id let:order>
                        <OrderRow order=order />
                    </For>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn OrderRow(order: HistoryItem) -> impl IntoView {
    let badge = format!(
        "rounded-full px-2 py-0.5 text-[10px] font-bold {}",
        status_class(order.status)
    );

    view! {
        <div class="flex gap-3 rounded-2xl bg-white dark:bg-gray-800 p-3 shadow-sm">
            <img src=order_image(order.img) class="h-14 w-14 rounded-xl object-cover" />
            <div class="min-w-0 flex-1">
                <div class="flex items-center justify-between">
                    <h4 class="truncate text-sm font-bold text-gray-900 dark:text-gray-50">{order.name}</h4>
                    <span class=badge>{order.status.label()}</span>
                </div>
                <p class="truncate text-xs text-gray-500">{order.item}</p>
                <div class="mt-1 flex items-center justify-between text-[11px] text-gray-400">
                    <span>{order.date} " • " {order.delivery.label()}</span>
                    <span class="font-semibold text-gray-700 dark:text-gray-200">{order.price}</span>
                </div>
            </div>
        </div>
    }
}

// =========================================================
// 收藏
// =========================================================

/// 已收藏商品（首页书签）
#[component]
pub fn SavedItemsScreen() -> impl IntoView {
    let store = use_store();
    let feed = StoredValue::new(food_feed());
    let saved = Memo::new(move |_| {
        let ids = store.state.with(|s| s.saved_items.clone());
        feed.with_value(|items| rank_feed(items.iter().filter(|i| ids.contains(&i.id))))
    });

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Tersimpan" />
            <div class="space-y-5 p-4">
                <Show
                    when=move || !saved.with(Vec::is_empty)
                    fallback=|| view! { <EmptyState message="Belum ada makanan yang disimpan." /> }
                >
                    <For each=move || saved.get() key=|s| s.item.id let:scored>
                        <FeedCard scored=scored />
                    </For>
                </Show>
            </div>
        </div>
    }
}

/// 关注的商户
#[component]
pub fn FavoritesScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let feed = StoredValue::new(food_feed());
    let favorites = Memo::new(move |_| {
        let ids = store.state.with(|s| s.favorites.clone());
        feed.with_value(|items| {
            items
                .iter()
                .filter(|i| ids.contains(&i.id))
                .cloned()
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Favorit Saya" />
            <div class="space-y-3 p-4">
                <Show
                    when=move || !favorites.with(Vec::is_empty)
                    fallback=|| view! { <EmptyState message="Belum ada mitra favorit." /> }
                >
                    <For each=move || favorites.get() key=|i| i.id let:item>
                        {
                            let (avatar, partner, distance) = (item.avatar.clone(), item.partner.clone(), item.distance.clone());
                            view! {
                                <button
                                    class="flex w-full items-center gap-3 rounded-2xl bg-white dark:bg-gray-800 p-3 text-left shadow-sm"
                                    on:click=move |_| {
                                        open_item(&store, &router, item.clone(), Screen::PartnerDetail)
                                    }
                                >
                                    <img src=avatar class="h-12 w-12 rounded-full object-cover" />
                                    <div class="flex-1">
                                        <p class="text-sm font-bold text-gray-900 dark:text-gray-50">{partner}</p>
                                        <p class="text-xs text-gray-500">{distance}</p>
                                    </div>
                                </button>
                            }
                        }
                    </For>
                </Show>
            </div>
        </div>
    }
}
