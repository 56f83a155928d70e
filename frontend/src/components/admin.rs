//! 管理后台：侧边栏与五个管理页面

use foodrescue_shared::catalog::{
    ACTIVITY_LOG, ADMIN_ROLES, ADMIN_STATS, ADMINISTRATORS, search_admin_products,
    search_admin_reports, search_admin_users,
};
use foodrescue_shared::Screen;
use leptos::prelude::*;

use crate::components::icons::{
    Bell, Edit, FileText, Flag, Key, LayoutDashboard, LogOut, Package, Search, Settings, Trash, Users, X,
};
use crate::components::ui::{Notice, Toast};
use crate::config::{load_gemini_config, save_api_key};
use crate::session;
use crate::state::use_store;
use crate::web::router::use_router;

const SEARCH_INPUT: &str = "w-full rounded-lg border border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 py-2 pl-10 pr-4 text-sm outline-none focus:ring-2 focus:ring-green-500/20";
const CARD: &str = "overflow-hidden rounded-xl border border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 shadow-sm";
const TH: &str = "px-6 py-4";

// =========================================================
// 布局
// =========================================================

#[component]
pub fn AdminSidebar() -> impl IntoView {
    let router = use_router();
    let store = use_store();

    let entry = move |label: &'static str, screen: Screen, icon: AnyView| {
        view! {
            <button
                class=move || {
                    if router.current() == screen {
                        "flex w-full items-center gap-3 rounded-lg bg-orange-50 dark:bg-orange-950/30 px-4 py-3 text-sm font-medium text-green-700"
                    } else {
                        "flex w-full items-center gap-3 rounded-lg px-4 py-3 text-sm font-medium text-gray-500 hover:bg-gray-50 dark:hover:bg-gray-800 hover:text-gray-900"
                    }
                }
                on:click=move |_| router.reset_to(screen)
            >
                {icon}
                {label}
            </button>
        }
    };

    view! {
        <aside class="flex h-screen w-64 shrink-0 flex-col border-r border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900">
            <div class="flex items-center gap-2 border-b border-gray-100 dark:border-gray-800 p-6">
                <div class="flex h-8 w-8 items-center justify-center rounded-lg bg-green-600 text-xl font-bold text-white">"F"</div>
                <span class="text-lg font-bold tracking-tight text-gray-800 dark:text-gray-100">"FoodRescue Admin"</span>
            </div>
            <nav class="flex-1 space-y-1 px-4 py-6">
                {entry("Dashboard", Screen::AdminDashboard, view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any())}
                {entry("Laporan Negatif", Screen::AdminReports, view! { <Flag attr:class="h-5 w-5" /> }.into_any())}
                {entry("Pengaturan Sistem", Screen::AdminSettings, view! { <Settings attr:class="h-5 w-5" /> }.into_any())}
                {entry("Manajemen Produk", Screen::AdminProducts, view! { <Package attr:class="h-5 w-5" /> }.into_any())}
                {entry("Pengguna & Mitra", Screen::AdminUsers, view! { <Users attr:class="h-5 w-5" /> }.into_any())}
            </nav>
            <div class="border-t border-gray-100 dark:border-gray-800 p-4">
                <button
                    class="flex w-full items-center gap-3 rounded-lg px-4 py-3 text-sm font-medium text-red-500 hover:bg-red-50"
                    on:click=move |_| session::logout(&store, &router)
                >
                    <LogOut attr:class="h-5 w-5" />
                    "Logout"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn AdminHeader(
    title: &'static str,
    #[prop(optional)] subtitle: Option<&'static str>,
    #[prop(optional)] crumb: Option<&'static str>,
) -> impl IntoView {
    view! {
        {crumb.map(|c| view! { <div class="mb-2 text-sm text-gray-400">{c}</div> })}
        <div class="mb-8 flex items-start justify-between">
            <div>
                <h1 class="text-2xl font-bold text-slate-900 dark:text-gray-50">{title}</h1>
                {subtitle.map(|s| view! { <p class="mt-1 text-sm text-slate-500">{s}</p> })}
            </div>
            <div class="flex items-center gap-4">
                <button class="rounded-full p-2 text-slate-400 hover:bg-white hover:shadow-sm">
                    <Bell attr:class="h-5 w-5" />
                </button>
                <img
                    src="https://ui-avatars.com/api/?name=Admin&background=0D8ABC&color=fff"
                    class="h-10 w-10 rounded-full"
                />
            </div>
        </div>
    }
}

/// 带图标的搜索框
#[component]
fn SearchBox(query: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <div class="relative max-w-md flex-1">
            <Search attr:class="absolute left-3 top-1/2 h-4 w-4 -translate-y-1/2 text-gray-400" />
            <input
                class=SEARCH_INPUT
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
        </div>
    }
}

// =========================================================
// 页面
// =========================================================

#[component]
pub fn AdminDashboardScreen() -> impl IntoView {
    view! {
        <div class="mx-auto max-w-7xl p-8">
            <AdminHeader title="Dashboard Admin" subtitle="Ikhtisar metrik sistem utama dan status kesehatan." />

            <div class="mb-8 grid grid-cols-4 gap-4">
                {ADMIN_STATS
                    .iter()
                    .map(|stat| {
                        view! {
                            <div class="rounded-xl border border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 p-6 shadow-sm hover:shadow-md">
                                <span class="text-sm font-medium text-gray-500">{stat.label}</span>
                                <h3 class="mb-1 mt-4 text-3xl font-bold text-gray-900 dark:text-gray-50">{stat.value}</h3>
                                <p class="text-xs font-medium text-green-500">{stat.trend}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="mb-8 grid grid-cols-2 gap-4">
                {[
                    ("Status Server", "Semua server beroperasi normal."),
                    ("Status Database", "Koneksi database stabil."),
                ]
                    .map(|(title, note)| {
                        view! {
                            <div class="flex items-center justify-between rounded-xl border border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 p-4">
                                <div>
                                    <p class="text-sm font-bold text-gray-800 dark:text-gray-100">{title}</p>
                                    <p class="text-xs text-green-600">"● Ok"</p>
                                </div>
                                <span class="text-xs text-gray-400">{note}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class=CARD>
                <div class="border-b border-gray-200 dark:border-gray-800 p-6">
                    <h3 class="font-bold text-gray-900 dark:text-gray-50">"Log Aktivitas Terbaru"</h3>
                </div>
                {ACTIVITY_LOG
                    .iter()
                    .map(|(msg, time)| {
                        view! {
                            <div class="flex items-center justify-between border-b border-gray-50 dark:border-gray-800 px-6 py-4 last:border-0">
                                <div class="flex items-center gap-3">
                                    <div class="h-2 w-2 rounded-full bg-slate-400"></div>
                                    <span class="text-sm text-gray-600 dark:text-gray-300">{*msg}</span>
                                </div>
                                <span class="text-xs font-medium text-gray-400">{*time}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

fn role_badge(role: &str) -> &'static str {
    match role {
        "Admin" => "bg-purple-100 text-purple-700",
        "Mitra" => "bg-blue-100 text-blue-700",
        "Member" => "bg-green-100 text-green-700",
        _ => "bg-gray-100 text-gray-700",
    }
}

fn user_status_color(status: &str) -> &'static str {
    match status {
        "Aktif" => "text-green-600",
        "Tertunda" => "text-orange-500",
        "Ditangguhkan" => "text-red-500",
        _ => "text-gray-400",
    }
}

#[component]
pub fn AdminUsersScreen() -> impl IntoView {
    let query = RwSignal::new(String::new());
    let users = Memo::new(move |_| query.with(|q| search_admin_users(q)));

    view! {
        <div class="mx-auto max-w-7xl p-8">
            <AdminHeader title="Manajemen Pengguna & Mitra" crumb="Beranda / Pengguna & Mitra" />
            <div class=CARD>
                <div class="flex items-center justify-between gap-3 border-b border-gray-200 dark:border-gray-800 p-4">
                    <SearchBox query=query placeholder="Cari pengguna atau mitra" />
                    <p class="text-xs text-gray-500">{move || format!("{} entri", users.with(Vec::len))}</p>
                </div>
                <table class="w-full border-collapse text-left">
                    <thead class="bg-gray-50 dark:bg-gray-800 text-xs font-semibold uppercase text-gray-500">
                        <tr>
                            <th class=TH>"Pengguna/Mitra"</th>
                            <th class=TH>"Peran"</th>
                            <th class=TH>"Status"</th>
                            <th class=TH>"Aktivitas Terakhir"</th>
                            <th class=TH>"Tanggal Bergabung"</th>
                            <th class=format!("{} text-right", TH)>"Tindakan"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-100 dark:divide-gray-800">
                        <For each=move || users.get() key=|u| u.email let:user>
                            <tr class="group hover:bg-gray-50 dark:hover:bg-gray-800">
                                <td class=TH>
                                    <div class="flex items-center gap-3">
                                        <div class="flex h-10 w-10 items-center justify-center rounded-full bg-gray-200 font-bold text-gray-500">
                                            {user.name.chars().next().map(String::from).unwrap_or_default()}
                                        </div>
                                        <div>
                                            <p class="text-sm font-bold text-gray-900 dark:text-gray-50">{user.name}</p>
                                            <p class="text-xs text-gray-500">{user.email}</p>
                                        </div>
                                    </div>
                                </td>
                                <td class=TH>
                                    <span class=format!("rounded-full px-2.5 py-1 text-xs font-bold {}", role_badge(user.role))>
                                        {user.role}
                                    </span>
                                </td>
                                <td class=TH>
                                    <span class=format!("text-xs font-semibold {}", user_status_color(user.status))>
                                        {user.status}
                                    </span>
                                </td>
                                <td class=format!("{} text-sm text-gray-600", TH)>{user.last_active}</td>
                                <td class=format!("{} text-sm text-gray-600", TH)>{user.joined}</td>
                                <td class=format!("{} text-right", TH)>
                                    <div class="flex justify-end gap-2 opacity-0 group-hover:opacity-100">
                                        <button class="rounded p-1.5 text-gray-500 hover:bg-gray-200">
                                            <Edit attr:class="h-4 w-4" />
                                        </button>
                                        <button class="rounded p-1.5 text-red-500 hover:bg-red-50">
                                            <Trash attr:class="h-4 w-4" />
                                        </button>
                                    </div>
                                </td>
                            </tr>
                        </For>
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
pub fn AdminProductsScreen() -> impl IntoView {
    let query = RwSignal::new(String::new());
    let products = Memo::new(move |_| query.with(|q| search_admin_products(q)));

    view! {
        <div class="mx-auto max-w-7xl p-8">
            <AdminHeader title="Manajemen Produk" crumb="Dashboard / Manajemen Produk" />
            <div class=CARD>
                <div class="border-b border-gray-200 dark:border-gray-800 p-4">
                    <SearchBox query=query placeholder="Cari produk..." />
                </div>
                <table class="w-full text-left text-sm">
                    <thead class="bg-gray-50 dark:bg-gray-800 text-xs uppercase text-gray-500">
                        <tr>
                            <th class="px-4 py-3">"Nama Produk"</th>
                            <th class="px-4 py-3">"Kategori"</th>
                            <th class="px-4 py-3">"Harga"</th>
                            <th class="px-4 py-3">"Stok"</th>
                            <th class="px-4 py-3">"Status"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-100 dark:divide-gray-800">
                        <For each=move || products.get() key=|p| p.name let:item>
                            <tr class="hover:bg-gray-50 dark:hover:bg-gray-800">
                                <td class="px-4 py-3 font-medium text-gray-900 dark:text-gray-50">{item.name}</td>
                                <td class="px-4 py-3 text-gray-500">{item.category}</td>
                                <td class="px-4 py-3 text-gray-900 dark:text-gray-50">{item.price}</td>
                                <td class="px-4 py-3 text-gray-500">{item.stock}</td>
                                <td class="px-4 py-3">
                                    {if item.active {
                                        view! {
                                            <span class="rounded-full border border-green-200 bg-green-50 px-2 py-0.5 text-[10px] font-bold text-green-600">
                                                "Aktif"
                                            </span>
                                        }
                                            .into_any()
                                    } else {
                                        view! {
                                            <span class="rounded-full border border-red-200 bg-red-50 px-2 py-0.5 text-[10px] font-bold text-red-500">
                                                "Dinonaktifkan"
                                            </span>
                                        }
                                            .into_any()
                                    }}
                                </td>
                            </tr>
                        </For>
                    </tbody>
                </table>
                <Show when=move || products.with(Vec::is_empty)>
                    <div class="flex flex-col items-center p-10 text-center text-sm text-gray-500">
                        <Package attr:class="mb-3 h-8 w-8 text-gray-300" />
                        "Tidak ada produk yang cocok."
                    </div>
                </Show>
            </div>
        </div>
    }
}

fn report_status_color(status: &str) -> &'static str {
    match status {
        "Tertunda" => "bg-orange-100 text-orange-600",
        "Dalam Peninjauan" => "bg-blue-100 text-blue-600",
        "Terselesaikan" => "bg-green-100 text-green-600",
        _ => "bg-red-100 text-red-600",
    }
}

#[component]
pub fn AdminReportsScreen() -> impl IntoView {
    let query = RwSignal::new(String::new());
    let reports = Memo::new(move |_| query.with(|q| search_admin_reports(q)));

    view! {
        <div class="mx-auto max-w-7xl p-8">
            <AdminHeader
                title="Moderasi Laporan Negatif"
                subtitle="Kelola dan tinjau semua laporan negatif atau bermasalah yang diajukan oleh pengguna."
                crumb="Dashboard"
            />
            <div class="mb-6 rounded-xl border border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 p-6 shadow-sm">
                <h3 class="mb-4 font-bold text-gray-900 dark:text-gray-50">"Filter Laporan"</h3>
                <SearchBox query=query placeholder="Subjek, pengirim..." />
                <div class="mt-4 flex justify-end">
                    <button
                        class="flex items-center gap-1 text-xs font-medium text-red-500 hover:underline"
                        on:click=move |_| query.set(String::new())
                    >
                        <X attr:class="h-3 w-3" />
                        "Bersihkan Filter"
                    </button>
                </div>
            </div>
            <div class=CARD>
                <table class="w-full text-left text-sm">
                    <thead class="bg-gray-50 dark:bg-gray-800 text-xs font-semibold uppercase text-gray-500">
                        <tr>
                            <th class=TH>"ID Laporan"</th>
                            <th class=TH>"Subjek"</th>
                            <th class=TH>"Jenis"</th>
                            <th class=TH>"Pengirim"</th>
                            <th class=TH>"Status"</th>
                            <th class=TH>"Tanggal Kirim"</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-gray-100 dark:divide-gray-800">
                        <For each=move || reports.get() key=|r| r.id let:row>
                            <tr class="hover:bg-gray-50 dark:hover:bg-gray-800">
                                <td class=format!("{} font-bold text-gray-900 dark:text-gray-50", TH)>{row.id}</td>
                                <td class=format!("{} max-w-xs truncate text-gray-700", TH)>{row.subject}</td>
                                <td class=format!("{} text-gray-500", TH)>{row.kind}</td>
                                <td class=format!("{} text-gray-700", TH)>{row.sender}</td>
                                <td class=TH>
                                    <span class=format!("rounded px-2 py-1 text-[10px] font-bold {}", report_status_color(row.status))>
                                        {row.status}
                                    </span>
                                </td>
                                <td class=format!("{} text-gray-500", TH)>{row.date}</td>
                            </tr>
                        </For>
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsTab {
    Access,
    Audit,
    Integration,
}

impl SettingsTab {
    const ALL: [SettingsTab; 3] = [SettingsTab::Access, SettingsTab::Audit, SettingsTab::Integration];

    fn label(&self) -> &'static str {
        match self {
            SettingsTab::Access => "Kontrol Akses",
            SettingsTab::Audit => "Log Audit",
            SettingsTab::Integration => "Integrasi AI",
        }
    }
}

#[component]
pub fn AdminSettingsScreen() -> impl IntoView {
    let tab = RwSignal::new(SettingsTab::Access);

    view! {
        <div class="mx-auto max-w-7xl p-8">
            <AdminHeader
                title="Pengaturan Sistem"
                subtitle="Kelola kontrol akses, tinjau log aktivitas, dan konfigurasikan notifikasi aplikasi."
                crumb="Dashboard"
            />
            <div class="mb-6 flex gap-1 border-b border-gray-200 dark:border-gray-800">
                {SettingsTab::ALL
                    .map(|t| {
                        view! {
                            <button
                                class=move || {
                                    if tab.get() == t {
                                        "border-b-2 border-slate-900 dark:border-gray-50 px-6 py-3 text-sm font-bold text-slate-900 dark:text-gray-50"
                                    } else {
                                        "border-b-2 border-transparent px-6 py-3 text-sm font-medium text-gray-500 hover:text-gray-800"
                                    }
                                }
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            {move || match tab.get() {
                SettingsTab::Access => view! { <AccessControl /> }.into_any(),
                SettingsTab::Audit => view! { <AuditLog /> }.into_any(),
                SettingsTab::Integration => view! { <ApiKeySettings /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn AccessControl() -> impl IntoView {
    view! {
        <div class="mb-8 rounded-xl border border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 p-6 shadow-sm">
            <h3 class="mb-2 text-lg font-bold text-gray-900 dark:text-gray-50">"Daftar Administrator"</h3>
            <p class="mb-4 text-sm text-gray-500">"Kelola daftar administrator sistem dan peran mereka."</p>
            <table class="mb-6 w-full text-left text-sm">
                <thead class="border-b border-gray-100 dark:border-gray-800 text-xs uppercase text-gray-400">
                    <tr>
                        <th class="py-3 font-medium">"Nama"</th>
                        <th class="py-3 font-medium">"Email"</th>
                        <th class="py-3 font-medium">"Peran"</th>
                        <th class="py-3 font-medium">"Ditambahkan Pada"</th>
                    </tr>
                </thead>
                <tbody>
                    {ADMINISTRATORS
                        .iter()
                        .map(|(name, email, role, date)| {
                            view! {
                                <tr class="border-b border-gray-50 dark:border-gray-800 last:border-0">
                                    <td class="py-3 font-medium text-gray-900 dark:text-gray-50">{*name}</td>
                                    <td class="py-3 text-gray-500">{*email}</td>
                                    <td class="py-3 text-gray-600">{*role}</td>
                                    <td class="py-3 text-gray-500">{*date}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
            <h3 class="mb-3 text-sm font-bold text-gray-900 dark:text-gray-50">"Peran Tersedia"</h3>
            <div class="flex flex-wrap gap-2">
                {ADMIN_ROLES
                    .iter()
                    .map(|role| {
                        view! {
                            <span class="rounded-full bg-gray-100 dark:bg-gray-800 px-3 py-1 text-xs text-gray-600 dark:text-gray-300">
                                {*role}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn AuditLog() -> impl IntoView {
    view! {
        <div class=CARD>
            {ACTIVITY_LOG
                .iter()
                .map(|(msg, time)| {
                    view! {
                        <div class="flex items-center gap-3 border-b border-gray-50 dark:border-gray-800 px-6 py-4 last:border-0">
                            <FileText attr:class="h-4 w-4 text-gray-400" />
                            <span class="flex-1 text-sm text-gray-600 dark:text-gray-300">{*msg}</span>
                            <span class="text-xs text-gray-400">{*time}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Gemini API Key 设置
#[component]
fn ApiKeySettings() -> impl IntoView {
    let notice: Notice = RwSignal::new(None);
    let configured = RwSignal::new(load_gemini_config().has_api_key());
    let key = RwSignal::new(String::new());

    let on_save = move |_| {
        let value = key.get_untracked();
        if value.trim().is_empty() {
            notice.set(Some(("API Key tidak boleh kosong.".into(), true)));
            return;
        }
        if save_api_key(&value) {
            configured.set(true);
            key.set(String::new());
            notice.set(Some(("API Key berhasil disimpan.".into(), false)));
        } else {
            notice.set(Some(("Gagal menyimpan API Key.".into(), true)));
        }
    };

    view! {
        <div class="relative rounded-xl border border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 p-6 shadow-sm">
            <Toast notice=notice />
            <div class="mb-4 flex items-center gap-3">
                <Key attr:class="h-5 w-5 text-green-600" />
                <h3 class="text-lg font-bold text-gray-900 dark:text-gray-50">"Gemini API Key"</h3>
                <span class=move || {
                    if configured.get() {
                        "rounded-full bg-green-50 px-2 py-0.5 text-[10px] font-bold text-green-600"
                    } else {
                        "rounded-full bg-red-50 px-2 py-0.5 text-[10px] font-bold text-red-500"
                    }
                }>{move || if configured.get() { "Terkonfigurasi" } else { "Belum diatur" }}</span>
            </div>
            <div class="flex gap-3">
                <input
                    type="password"
                    class="flex-1 rounded-lg border border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 px-4 py-2 text-sm outline-none"
                    placeholder="Tempel API Key baru"
                    prop:value=move || key.get()
                    on:input=move |ev| key.set(event_target_value(&ev))
                />
                <button class="rounded-lg bg-green-600 px-4 text-sm font-semibold text-white" on:click=on_save>
                    "Simpan"
                </button>
            </div>
        </div>
    }
}
