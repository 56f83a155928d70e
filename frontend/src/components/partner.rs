//! 合作商户端：看板、库存、交易与商品上传

use foodrescue_shared::catalog::{
    INVENTORY_CATEGORIES, PARTNER_METRICS, PRODUCT_CATEGORIES, STOCK_LEVELS, TRANSACTIONS,
    TransactionStatus, filter_inventory,
};
use foodrescue_shared::scoring::CATEGORY_ALL;
use foodrescue_shared::{ImpactEstimate, Screen};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::ai::AiService;
use crate::components::icons::{
    AlertTriangle, Bell, CheckCircle, Loader, Package, Plus, Search, TrendingUp, UploadCloud, User, X,
};
use crate::components::ui::ScreenHeader;
use crate::web::router::use_router;
use crate::web::{alert, read_event_image};

const CATEGORY_PLACEHOLDER: &str = "Pilih Kategori...";

// =========================================================
// 看板
// =========================================================

#[component]
fn IssueCard(title: &'static str, desc: &'static str, severe: bool) -> impl IntoView {
    let (box_class, text_class) = if severe {
        ("rounded-xl border border-red-100 bg-red-50 p-4", "text-red-600")
    } else {
        ("rounded-xl border border-orange-100 bg-orange-50 p-4", "text-orange-600")
    };

    view! {
        <div class=box_class>
            <div class="mb-2 flex items-start gap-3">
                <AlertTriangle attr:class=format!("h-5 w-5 {}", text_class) />
                <div>
                    <h4 class=format!("text-sm font-bold {}", text_class)>{title}</h4>
                    <p class="text-xs text-gray-500">{desc}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn PartnerDashboardScreen() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="relative min-h-full bg-white dark:bg-gray-900 pb-24">
            <header class="flex items-center justify-between border-b border-gray-50 dark:border-gray-800 p-6 shadow-sm">
                <h1 class="text-lg font-bold text-gray-900 dark:text-gray-50">"Partner Dashboard"</h1>
                <div class="flex gap-3 text-gray-500">
                    <button on:click=move |_| router.navigate(Screen::Notifications)>
                        <Bell attr:class="h-6 w-6" />
                    </button>
                    <button on:click=move |_| router.navigate(Screen::Profile)>
                        <User attr:class="h-6 w-6" />
                    </button>
                </div>
            </header>

            <div class="space-y-8 p-6">
                <section>
                    <h3 class="mb-3 font-bold text-gray-900 dark:text-gray-50">"Peringatan & Isu"</h3>
                    <div class="space-y-3">
                        <IssueCard
                            title="Peringatan Stok Rendah"
                            desc="Stok rendah: Hanya tersisa 20 unit."
                            severe=true
                        />
                        <IssueCard
                            title="Masalah Kualitas"
                            desc="Masalah kualitas terdeteksi pada batch terbaru."
                            severe=false
                        />
                    </div>
                </section>

                <section>
                    <h3 class="mb-3 font-bold text-gray-900 dark:text-gray-50">"Ringkasan Metrik"</h3>
                    <div class="grid grid-cols-2 gap-3">
                        {PARTNER_METRICS
                            .iter()
                            .map(|m| {
                                view! {
                                    <div class="rounded-2xl border border-gray-100 dark:border-gray-800 p-4 shadow-sm">
                                        <div class="mb-2 flex items-start justify-between">
                                            <p class="text-xs text-gray-500">{m.label}</p>
                                            <Package attr:class="h-4 w-4 text-orange-300" />
                                        </div>
                                        <h4 class="text-lg font-bold text-gray-900 dark:text-gray-50">{m.value}</h4>
                                        <p class="flex items-center gap-1 text-[10px] font-medium text-green-500">
                                            <TrendingUp attr:class="h-3 w-3" />
                                            {m.trend}
                                        </p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>

                <section>
                    <h3 class="mb-1 font-bold text-gray-900 dark:text-gray-50">"Tingkat Stok per Waktu"</h3>
                    <p class="mb-4 text-xs text-gray-400">"Tren stok produk selama 6 bulan terakhir."</p>
                    <div class="flex h-48 items-end justify-between gap-2 pt-8">
                        {STOCK_LEVELS
                            .iter()
                            .map(|h| {
                                view! {
                                    <div
                                        class="flex-1 rounded-t-sm bg-orange-200 hover:bg-green-600"
                                        style=format!("height: {}%;", h)
                                    ></div>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="mt-2 flex justify-between px-1 text-[10px] text-gray-400">
                        {["Jan", "Feb", "Mar", "Apr", "Mei", "Jun"].map(|m| view! { <span>{m}</span> }).collect_view()}
                    </div>
                </section>
            </div>

            <button
                class="absolute bottom-6 right-6 h-14 rounded-full bg-green-600 px-6 font-semibold text-white shadow-xl"
                on:click=move |_| router.navigate(Screen::UploadProduct)
            >
                "+ Tambah"
            </button>
        </div>
    }
}

// =========================================================
// 库存
// =========================================================

#[component]
pub fn PartnerInventoryScreen() -> impl IntoView {
    let router = use_router();
    let (category, set_category) = signal(CATEGORY_ALL.to_string());
    let (query, set_query) = signal(String::new());
    let (online, set_online) = signal(true);

    let products = Memo::new(move |_| {
        let q = query.with(|q| q.trim().to_lowercase());
        category.with(|c| filter_inventory(c))
            .into_iter()
            .filter(|p| q.is_empty() || p.name.to_lowercase().contains(&q))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900 pb-24">
            <h1 class="p-6 pb-2 text-center text-xl font-bold text-gray-900 dark:text-gray-50 shadow-sm">"Inventory"</h1>
            <div class="space-y-6 p-6">
                <div class="flex items-center justify-between rounded-2xl border border-gray-100 dark:border-gray-800 p-4 shadow-sm">
                    <div class="flex items-center gap-3">
                        <img src="https://picsum.photos/seed/person/200/200" class="h-12 w-12 rounded-full object-cover" />
                        <div>
                            <h3 class="text-sm font-bold text-gray-900 dark:text-gray-50">"PT. Maju Bersama"</h3>
                            <p class="text-xs text-gray-500">
                                "Status: "
                                <span class="font-bold text-gray-900 dark:text-gray-50">
                                    {move || if online.get() { "Online" } else { "Offline" }}
                                </span>
                            </p>
                        </div>
                    </div>
                    <button
                        class=move || {
                            if online.get() {
                                "relative h-6 w-11 rounded-full bg-green-600"
                            } else {
                                "relative h-6 w-11 rounded-full bg-gray-200"
                            }
                        }
                        on:click=move |_| set_online.update(|o| *o = !*o)
                    >
                        <span class=move || {
                            if online.get() {
                                "absolute top-0.5 left-[22px] h-5 w-5 rounded-full bg-white"
                            } else {
                                "absolute top-0.5 left-0.5 h-5 w-5 rounded-full bg-white"
                            }
                        }></span>
                    </button>
                </div>

                <div class="flex gap-3">
                    <div class="relative flex-1">
                        <Search attr:class="absolute left-4 top-1/2 h-4 w-4 -translate-y-1/2 text-gray-400" />
                        <input
                            class="w-full rounded-xl border border-gray-100 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 py-3 pl-10 pr-4 text-sm outline-none focus:border-green-500"
                            placeholder="Cari produk..."
                            prop:value=query
                            on:input=move |ev| set_query.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        class="flex items-center rounded-xl bg-green-600 px-5 text-sm font-semibold text-white"
                        on:click=move |_| router.navigate(Screen::UploadProduct)
                    >
                        <Plus attr:class="mr-1 h-4 w-4" />
                        "Tambah"
                    </button>
                </div>

                <div class="flex gap-2 overflow-x-auto pb-1">
                    {INVENTORY_CATEGORIES
                        .iter()
                        .map(|&cat| {
                            view! {
                                <button
                                    class=move || {
                                        if category.with(|c| c == cat) {
                                            "whitespace-nowrap rounded-full border border-green-200 bg-green-100 px-4 py-2 text-xs font-medium text-green-700"
                                        } else {
                                            "whitespace-nowrap rounded-full border border-transparent bg-gray-50 dark:bg-gray-800 px-4 py-2 text-xs font-medium text-gray-600"
                                        }
                                    }
                                    on:click=move |_| set_category.set(cat.to_string())
                                >
                                    {cat}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="space-y-4">
                    <For each=move || products.get() key=|p| p.id let:product>
                        <div class="flex items-center gap-4 rounded-2xl border border-gray-100 dark:border-gray-800 p-4 shadow-sm">
                            <img src=product.image class="h-16 w-16 shrink-0 rounded-xl object-cover" />
                            <div class="flex-1">
                                <div class="mb-1 flex items-center gap-2">
                                    <h4 class="text-sm font-bold text-gray-900 dark:text-gray-50">{product.name}</h4>
                                    <Show when=move || product.is_low_stock()>
                                        <span class="rounded-full bg-red-50 px-2 py-0.5 text-[10px] font-bold text-red-500">
                                            "Stok Rendah"
                                        </span>
                                    </Show>
                                </div>
                                <p class="mb-3 text-xs text-gray-500">{product.price}</p>
                                <div class="flex items-center gap-3">
                                    <div class="h-2 flex-1 overflow-hidden rounded-full bg-gray-100">
                                        <div
                                            class="h-full rounded-full bg-green-600"
                                            style=format!("width: {}%;", product.stock_percent)
                                        ></div>
                                    </div>
                                    <span class="whitespace-nowrap text-xs font-medium text-gray-600">
                                        {format!("{}% Stok", product.stock_percent)}
                                    </span>
                                </div>
                            </div>
                        </div>
                    </For>
                </div>
            </div>
        </div>
    }
}

// =========================================================
// 交易
// =========================================================

fn status_badge(status: TransactionStatus) -> (&'static str, &'static str) {
    match status {
        TransactionStatus::Selesai => ("text-green-500", "bg-green-50 text-green-600"),
        TransactionStatus::Gagal => ("text-red-500", "bg-red-50 text-red-500"),
        TransactionStatus::Tertunda => ("text-orange-500", "bg-orange-50 text-orange-500"),
    }
}

#[component]
pub fn TransactionsScreen() -> impl IntoView {
    const MONTHLY_VOLUME: [u32; 7] = [45, 60, 50, 75, 65, 85, 80];

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900 pb-24">
            <h1 class="border-b border-gray-50 dark:border-gray-800 p-6 text-center text-xl font-bold text-gray-900 dark:text-gray-50 shadow-sm">
                "Transaksi"
            </h1>
            <div class="space-y-8 p-6">
                <section>
                    <h3 class="mb-4 font-bold text-gray-900 dark:text-gray-50">"Volume Transaksi Bulanan"</h3>
                    <div class="flex h-40 items-end justify-between gap-2 border-b border-gray-100 pb-1">
                        {MONTHLY_VOLUME
                            .iter()
                            .map(|h| {
                                view! {
                                    <div class="flex-1 rounded-t-md bg-orange-300" style=format!("height: {}%;", h)></div>
                                }
                            })
                            .collect_view()}
                    </div>
                    <div class="mt-2 flex justify-between text-[10px] text-gray-400">
                        {["Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul"]
                            .map(|m| view! { <span>{m}</span> })
                            .collect_view()}
                    </div>
                </section>

                <section>
                    <h3 class="mb-4 font-bold text-gray-900 dark:text-gray-50">"Transaksi Terbaru"</h3>
                    <div class="space-y-6">
                        {TRANSACTIONS
                            .iter()
                            .map(|tx| {
                                let (amount_class, badge_class) = status_badge(tx.status);
                                view! {
                                    <div class="flex items-center gap-4">
                                        <img
                                            src=format!("https://picsum.photos/100/100?random={}", tx.img)
                                            class="h-10 w-10 rounded-full object-cover"
                                        />
                                        <div class="flex-1">
                                            <h4 class="text-sm font-bold text-gray-900 dark:text-gray-50">{tx.name}</h4>
                                            <p class="text-xs text-gray-400">{tx.date}</p>
                                        </div>
                                        <div class="text-right">
                                            <p class=format!("text-sm font-bold {}", amount_class)>{tx.amount}</p>
                                            <span class=format!("rounded-full px-2 py-0.5 text-[10px] {}", badge_class)>
                                                {tx.status.label()}
                                            </span>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
            </div>
        </div>
    }
}

// =========================================================
// 商品上传
// =========================================================

/// 上传照片后由 AI 识别分类与配料
#[component]
pub fn UploadProductScreen() -> impl IntoView {
    let router = use_router();
    let image = RwSignal::new(Option::<String>::None);
    let analyzing = RwSignal::new(false);
    let ingredients = RwSignal::new(String::new());
    let category = RwSignal::new(CATEGORY_PLACEHOLDER.to_string());
    let name = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let impact = RwSignal::new(Option::<ImpactEstimate>::None);
    let impact_loading = RwSignal::new(false);

    let on_file = move |ev: leptos::ev::Event| {
        spawn_local(async move {
            let Some(uri) = read_event_image(ev).await else {
                return;
            };
            image.set(Some(uri.clone()));
            analyzing.set(true);
            match AiService::load()
                .extract_food_metadata("Identifikasi makanan ini", Some(&uri))
                .await
            {
                Ok(meta) => {
                    let detected = if meta.category.trim().is_empty() {
                        PRODUCT_CATEGORIES[0].to_string()
                    } else {
                        meta.category
                    };
                    category.set(detected);
                    if !meta.tags.is_empty() {
                        ingredients.set(meta.tags.join(", "));
                    }
                }
                Err(e) => log::error!("[Upload] Metadata extraction failed ({}): {}", e.error_code(), e),
            }
            analyzing.set(false);
        });
    };

    let on_estimate = move |_| {
        let food = name.get_untracked();
        if food.trim().is_empty() {
            alert("Isi nama produk terlebih dahulu.");
            return;
        }
        let portions = quantity.get_untracked();
        impact_loading.set(true);
        spawn_local(async move {
            match AiService::load().analyze_impact(&food, &portions).await {
                Ok(result) => impact.set(Some(result)),
                Err(e) => log::error!("[Upload] Impact estimate failed ({}): {}", e.error_code(), e),
            }
            impact_loading.set(false);
        });
    };

    // AI 给出的分类不在预设列表时追加为选项
    let category_options = move || {
        let current = category.get();
        let mut options: Vec<String> = PRODUCT_CATEGORIES.iter().map(|c| c.to_string()).collect();
        if current != CATEGORY_PLACEHOLDER && !options.contains(&current) {
            options.push(current);
        }
        options
    };

    let input_class = "w-full rounded-xl border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800 p-4 text-sm text-gray-900 dark:text-gray-50 outline-none focus:border-green-500";

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900">
            <ScreenHeader title="Upload Produk (AI)" />
            <div class="space-y-6 p-6">
                <div>
                    <label class="mb-3 block font-bold text-gray-900 dark:text-gray-50">"Unggah Foto Produk"</label>
                    <div class="relative flex h-48 flex-col items-center justify-center overflow-hidden rounded-2xl border-2 border-dashed border-gray-200 bg-gray-50 dark:bg-gray-800">
                        {move || match image.get() {
                            Some(src) => {
                                view! {
                                    <img src=src class="h-full w-full object-cover" />
                                    <button
                                        class="absolute right-2 top-2 rounded-full bg-white/80 p-1"
                                        on:click=move |_| image.set(None)
                                    >
                                        <X attr:class="h-4 w-4" />
                                    </button>
                                }
                                    .into_any()
                            }
                            None => {
                                view! {
                                    <div class="mb-3 flex h-10 w-10 items-center justify-center rounded-full bg-white text-gray-400 shadow-sm">
                                        <UploadCloud attr:class="h-5 w-5" />
                                    </div>
                                    <span class="text-sm text-gray-500">"Ukuran file maksimum: 5MB"</span>
                                    <input
                                        type="file"
                                        accept="image/*"
                                        class="absolute inset-0 cursor-pointer opacity-0"
                                        on:change=on_file
                                    />
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                </div>

                <Show when=move || analyzing.get()>
                    <div class="flex animate-pulse items-center gap-2 rounded-xl bg-orange-50 p-3 text-sm font-bold text-green-700">
                        <Loader attr:class="h-4 w-4 animate-spin" />
                        "AI sedang identifikasi..."
                    </div>
                </Show>

                <div class="space-y-3">
                    <label class="block font-bold text-gray-900 dark:text-gray-50">"Nama Produk"</label>
                    <input
                        class=input_class
                        placeholder="mis. Nasi Box Ayam"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <input
                        class=input_class
                        placeholder="Jumlah (mis. 10 Porsi)"
                        prop:value=move || quantity.get()
                        on:input=move |ev| quantity.set(event_target_value(&ev))
                    />
                </div>

                <div>
                    <label class="mb-3 block font-bold text-gray-900 dark:text-gray-50">"Bahan-bahan (Auto-fill)"</label>
                    <textarea
                        class=format!("{} h-24 resize-none", input_class)
                        placeholder="Masukkan bahan-bahan..."
                        prop:value=move || ingredients.get()
                        on:input=move |ev| ingredients.set(event_target_value(&ev))
                    ></textarea>
                </div>

                <div>
                    <label class="mb-3 block font-bold text-gray-900 dark:text-gray-50">"Pilih Kategori"</label>
                    <select
                        class=input_class
                        prop:value=move || category.get()
                        on:change=move |ev| category.set(event_target_value(&ev))
                    >
                        <option value=CATEGORY_PLACEHOLDER>{CATEGORY_PLACEHOLDER}</option>
                        {move || {
                            category_options()
                                .into_iter()
                                .map(|c| {
                                    let value = c.clone();
                                    view! { <option value=value>{c}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>

                <div class="rounded-2xl bg-green-50 dark:bg-green-950/30 p-4">
                    <button
                        class="w-full rounded-xl border border-green-600 py-2 text-xs font-semibold text-green-700 disabled:opacity-50"
                        disabled=move || impact_loading.get()
                        on:click=on_estimate
                    >
                        {move || if impact_loading.get() { "Menghitung..." } else { "Estimasi Dampak Lingkungan" }}
                    </button>
                    {move || {
                        impact
                            .get()
                            .map(|e| {
                                view! {
                                    <div class="mt-3 grid grid-cols-3 gap-2 text-center text-[11px] text-gray-600 dark:text-gray-300">
                                        <div>
                                            <p class="font-bold text-green-700">{e.co2_saved}</p>
                                            "CO₂"
                                        </div>
                                        <div>
                                            <p class="font-bold text-green-700">{e.money_saved}</p>
                                            "Hemat"
                                        </div>
                                        <div>
                                            <p class="font-bold text-green-700">{e.methane_prevented}</p>
                                            "Metana"
                                        </div>
                                    </div>
                                }
                            })
                    }}
                </div>

                <div class="mt-6 flex items-center justify-between">
                    <button
                        class="rounded-xl border border-gray-300 px-6 py-2 text-xs font-semibold text-gray-600"
                        on:click=move |_| router.go_back()
                    >
                        "Batal"
                    </button>
                    <button
                        class="rounded-xl bg-green-600 px-6 py-2 text-xs font-semibold text-white"
                        on:click=move |_| {
                            log::info!("[Upload] Product {:?} in {}", name.get_untracked(), category.get_untracked());
                            router.navigate(Screen::Success);
                        }
                    >
                        "Upload Sekarang"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessScreen() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="flex min-h-full flex-col items-center justify-center bg-white dark:bg-gray-900 p-8 text-center">
            <div class="mb-6 flex h-40 w-48 items-center justify-center rounded-xl bg-blue-50">
                <CheckCircle attr:class="h-16 w-16 text-green-600" />
            </div>
            <h2 class="mb-2 text-2xl font-bold text-gray-900 dark:text-gray-50">"Berhasil disimpan!"</h2>
            <p class="mb-8 max-w-xs text-sm text-gray-500">"Data Anda telah berhasil disimpan dan diproses."</p>
            <button
                class="w-full rounded-xl bg-green-600 py-3 font-semibold text-white"
                on:click=move |_| router.reset_to(Screen::PartnerInventory)
            >
                "Kembali ke Beranda"
            </button>
        </div>
    }
}
