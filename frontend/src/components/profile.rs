//! 个人资料与账号设置

use foodrescue_shared::form::{check_new_password, format_phone, international_phone, local_phone};
use foodrescue_shared::{Role, Screen, User};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::{Bell, Camera, Lock, LogOut, Moon, Sun};
use crate::components::ui::{MenuRow, Notice, ScreenHeader, Section, Toast};
use crate::session;
use crate::state::use_store;
use crate::web::router::use_router;
use crate::web::{alert, read_event_image};

const INPUT_CLASS: &str = "w-full rounded-xl border border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 px-4 py-3 text-sm text-gray-900 dark:text-gray-50 outline-none focus:border-green-500";

#[component]
pub fn ProfileScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();

    let user = move || store.state.with(|s| s.user.clone());
    let dark = move || store.state.with(|s| s.is_dark_mode);
    let role = move || router.role();

    let go = move |screen: Screen| Callback::new(move |_: ()| router.navigate(screen));

    let on_switch_mode = move |_: ()| {
        let next = if role() == Role::Partner {
            Role::User
        } else {
            Role::Partner
        };
        session::switch_mode(&store, &router, next);
    };

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950 pb-6">
            <div class="px-6 pt-6 pb-2">
                <h1 class="mb-6 text-2xl font-bold text-gray-900 dark:text-gray-50">"Profil Saya"</h1>
                <div class="mb-2 flex items-center gap-4">
                    <div class="h-16 w-16 shrink-0 overflow-hidden rounded-full border-2 border-white bg-gray-200 shadow-sm">
                        <img src=move || user().avatar alt="Profile" class="h-full w-full object-cover" />
                    </div>
                    <div class="min-w-0 flex-1">
                        <h3 class="truncate text-lg font-bold text-gray-900 dark:text-gray-50">{move || user().name}</h3>
                        <p class="truncate text-sm text-gray-500 dark:text-gray-400">{move || user().email}</p>
                        <span class="mt-1 inline-block rounded-full bg-blue-100 px-2 py-0.5 text-[10px] font-bold text-blue-700">
                            {move || role().label()}
                        </span>
                    </div>
                </div>
            </div>

            <Section title="Aktivitas">
                <MenuRow label="Favorit Saya" on_select=go(Screen::Favorites) />
                <MenuRow label="Tersimpan" on_select=go(Screen::SavedItems) />
                <MenuRow label="Riwayat Pesanan" on_select=go(Screen::History) />
                <MenuRow label="Riwayat Cek Kualitas" on_select=go(Screen::QualityHistory) />
                <MenuRow label="Laporan Dampak" on_select=go(Screen::ImpactReport) />
            </Section>

            <Section title="Akun">
                <MenuRow label="Edit Profil" on_select=go(Screen::EditProfile) />
                <MenuRow label="Ganti Kata Sandi" on_select=go(Screen::ChangePassword) />
                <MenuRow label="Daftar Alamat" on_select=go(Screen::LocationSelect) />
                <MenuRow label="Pengaturan Notifikasi" on_select=go(Screen::NotificationSettings) />
            </Section>

            <Section title="Preferensi">
                <div class="flex items-center justify-between px-4 py-3">
                    <div class="flex items-center gap-3 text-sm font-semibold text-gray-900 dark:text-gray-50">
                        {move || {
                            if dark() {
                                view! { <Moon attr:class="h-5 w-5 text-gray-400" /> }.into_any()
                            } else {
                                view! { <Sun attr:class="h-5 w-5 text-gray-400" /> }.into_any()
                            }
                        }}
                        "Mode Gelap"
                    </div>
                    <button
                        class=move || {
                            if dark() {
                                "relative h-6 w-11 rounded-full bg-green-600 transition-colors"
                            } else {
                                "relative h-6 w-11 rounded-full bg-gray-200 dark:bg-gray-700 transition-colors"
                            }
                        }
                        on:click=move |_| {
                            store.mutate(|s| s.toggle_theme());
                        }
                    >
                        <div class=move || {
                            if dark() {
                                "absolute top-0.5 left-[22px] h-5 w-5 rounded-full bg-white shadow-sm transition-transform"
                            } else {
                                "absolute top-0.5 left-0.5 h-5 w-5 rounded-full bg-white shadow-sm transition-transform"
                            }
                        }></div>
                    </button>
                </div>
                <MenuRow
                    label=Signal::derive(move || {
                        let label = if role() == Role::Partner {
                            "Beralih ke Mode Penerima"
                        } else {
                            "Beralih ke Mode Mitra"
                        };
                        label.to_string()
                    })
                    on_select=Callback::new(on_switch_mode)
                />
                <MenuRow label="Bantuan & FAQ" on_select=go(Screen::HelpFaq) />
            </Section>

            <div class="px-4 pt-4">
                <button
                    class="flex w-full items-center justify-center gap-2 rounded-2xl p-4 text-sm font-bold text-red-500 hover:bg-red-50 dark:hover:bg-red-900/20"
                    on:click=move |_| session::logout(&store, &router)
                >
                    <LogOut attr:class="h-5 w-5" />
                    "Keluar"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn EditProfileScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let original = store.state.with_untracked(|s| s.user.clone());

    let (name, set_name) = signal(original.name.clone());
    let (email, set_email) = signal(original.email.clone());
    let (avatar, set_avatar) = signal(original.avatar.clone());
    let (phone, set_phone) = signal(local_phone(&original.phone));
    let original = StoredValue::new(original);

    let on_avatar = move |ev: leptos::ev::Event| {
        spawn_local(async move {
            if let Some(uri) = read_event_image(ev).await {
                set_avatar.set(uri);
            }
        });
    };

    let on_save = move |_| {
        let user = User {
            name: name.get(),
            email: email.get(),
            phone: international_phone(&phone.get()),
            avatar: avatar.get(),
            ..original.get_value()
        };
        store.mutate(|s| s.update_profile(user));
        router.go_back();
    };

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900">
            <ScreenHeader title="Edit Profil" />
            <div class="px-6 py-6">
                <label class="mb-10 flex cursor-pointer flex-col items-center">
                    <div class="group relative h-24 w-24 overflow-hidden rounded-full border-4 border-white bg-gray-100 shadow-md">
                        <img src=avatar class="h-full w-full object-cover" alt="Profile" />
                        <div class="absolute inset-0 flex items-center justify-center bg-black/40 text-white opacity-0 transition-opacity group-hover:opacity-100">
                            <Camera attr:class="h-7 w-7" />
                        </div>
                    </div>
                    <input type="file" accept="image/*" class="hidden" on:change=on_avatar />
                    <p class="mt-2 text-[10px] font-bold uppercase tracking-widest text-green-600">"Ubah Foto"</p>
                </label>

                <div class="space-y-6">
                    <label class="block space-y-1">
                        <span class="text-sm font-medium text-gray-700 dark:text-gray-300">"Nama Lengkap"</span>
                        <input class=INPUT_CLASS prop:value=name on:input=move |ev| set_name.set(event_target_value(&ev)) />
                    </label>
                    <label class="block space-y-1">
                        <span class="text-sm font-medium text-gray-700 dark:text-gray-300">"Email Terdaftar"</span>
                        <input
                            type="email"
                            class=INPUT_CLASS
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="space-y-1.5">
                        <span class="block text-sm font-medium text-gray-700 dark:text-gray-300">"Nomor WhatsApp"</span>
                        <div class="flex items-center gap-2">
                            <div class="select-none rounded-xl border border-gray-200 bg-gray-100 dark:bg-gray-800 px-4 py-3 text-sm font-bold text-gray-500">
                                "+62"
                            </div>
                            <input
                                type="text"
                                inputmode="numeric"
                                maxlength="13"
                                placeholder="852-XXXX-XXXX"
                                class=INPUT_CLASS
                                prop:value=phone
                                on:input=move |ev| set_phone.set(format_phone(&event_target_value(&ev)))
                            />
                        </div>
                        <p class="px-1 text-[10px] text-gray-400">"Gunakan nomor aktif untuk koordinasi penjemputan."</p>
                    </div>
                </div>

                <div class="pt-10">
                    <button class="w-full rounded-xl bg-green-600 py-3 font-semibold text-white" on:click=on_save>
                        "Simpan Perubahan"
                    </button>
                    <button
                        class="mt-4 w-full py-2 text-center text-xs font-bold text-gray-400 hover:text-gray-600"
                        on:click=move |_| router.go_back()
                    >
                        "Batal"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ChangePasswordScreen() -> impl IntoView {
    let router = use_router();
    let notice: Notice = RwSignal::new(None);
    let (old, set_old) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());

    let on_save = move |_| {
        if old.with(String::is_empty) {
            alert("Masukkan kata sandi lama.");
            return;
        }
        match check_new_password(&password.get(), &confirm.get()) {
            Ok(()) => {
                notice.set(Some(("Kata sandi berhasil diperbarui.".to_string(), false)));
                set_old.set(String::new());
                set_password.set(String::new());
                set_confirm.set(String::new());
            }
            Err(e) => alert(&e.to_string()),
        }
    };

    view! {
        <div class="relative min-h-full bg-white dark:bg-gray-900">
            <Toast notice=notice />
            <ScreenHeader title="Ganti Kata Sandi" />
            <div class="space-y-4 px-6 py-6">
                <div class="mb-2 flex items-center gap-3 rounded-2xl bg-green-50 dark:bg-green-950/30 p-4">
                    <Lock attr:class="h-5 w-5 shrink-0 text-green-600" />
                    <p class="text-xs text-gray-600 dark:text-gray-300">
                        "Jangan bagikan kata sandi Anda kepada siapa pun."
                    </p>
                </div>
                <input
                    type="password"
                    class=INPUT_CLASS
                    placeholder="Kata Sandi Lama"
                    prop:value=old
                    on:input=move |ev| set_old.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    class=INPUT_CLASS
                    placeholder="Kata Sandi Baru"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    class=INPUT_CLASS
                    placeholder="Konfirmasi Kata Sandi Baru"
                    prop:value=confirm
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <button class="mt-6 w-full rounded-xl bg-green-600 py-3 font-semibold text-white" on:click=on_save>
                    "Simpan Sandi Baru"
                </button>
                <button
                    class="w-full py-2 text-center text-xs font-bold text-green-600"
                    on:click=move |_| router.navigate(Screen::NewPassword)
                >
                    "Lupa kata sandi lama?"
                </button>
            </div>
        </div>
    }
}

const NOTIFICATION_OPTIONS: [(&str, &str); 3] = [
    ("Notifikasi Push", "Aktifkan untuk update real-time"),
    ("Email Penawaran", "Info surplus makanan di email"),
    ("Update Keamanan", "Informasi keamanan akun penting"),
];

/// 开关只在本页有效，不写入全局状态
#[component]
pub fn NotificationSettingsScreen() -> impl IntoView {
    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Pengaturan Notifikasi" />
            <div class="space-y-3 p-4">
                {NOTIFICATION_OPTIONS
                    .iter()
                    .map(|(title, desc)| {
                        let enabled = RwSignal::new(true);
                        view! {
                            <div class="flex items-center justify-between rounded-xl border border-gray-100 dark:border-gray-700 bg-white dark:bg-gray-800 p-4 shadow-sm">
                                <div>
                                    <p class="text-sm font-bold text-gray-900 dark:text-gray-50">{*title}</p>
                                    <p class="text-[11px] text-gray-500 dark:text-gray-400">{*desc}</p>
                                </div>
                                <button
                                    class=move || {
                                        if enabled.get() {
                                            "relative h-6 w-11 rounded-full bg-green-600"
                                        } else {
                                            "relative h-6 w-11 rounded-full bg-gray-200 dark:bg-gray-700"
                                        }
                                    }
                                    on:click=move |_| enabled.update(|v| *v = !*v)
                                >
                                    <div class=move || {
                                        if enabled.get() {
                                            "absolute top-0.5 right-0.5 h-5 w-5 rounded-full bg-white shadow-sm"
                                        } else {
                                            "absolute top-0.5 left-0.5 h-5 w-5 rounded-full bg-white shadow-sm"
                                        }
                                    }></div>
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn NotificationsScreen() -> impl IntoView {
    view! {
        <div class="min-h-full bg-white dark:bg-gray-900">
            <ScreenHeader title="Notifikasi" />
            <div class="py-20 text-center">
                <Bell attr:class="mx-auto mb-4 h-12 w-12 text-gray-300 opacity-50" />
                <p class="font-medium text-gray-500">"Belum ada notifikasi baru."</p>
                <p class="mt-1 text-xs text-gray-400">"Kami akan memberi tahu Anda jika ada surplus makanan di sekitar."</p>
            </div>
        </div>
    }
}

const FAQ: [(&str, &str); 3] = [
    (
        "Bagaimana cara menyelamatkan makanan?",
        "Pilih makanan di sekitar Anda, tekan 'Ambil', dan kunjungi mitra sesuai instruksi penjemputan.",
    ),
    (
        "Apakah makanan ini aman?",
        "Semua makanan yang dibagikan telah melalui verifikasi visual AI dan panduan kebersihan mitra.",
    ),
    (
        "Apakah ada biaya?",
        "Makanan surplus dibagikan gratis. Biaya pengiriman mengikuti kebijakan mitra.",
    ),
];

#[component]
pub fn HelpFaqScreen() -> impl IntoView {
    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Bantuan & FAQ" />
            <div class="space-y-3 p-4">
                <h2 class="text-xs font-semibold uppercase tracking-wide text-gray-400">"Pertanyaan Umum"</h2>
                {FAQ
                    .iter()
                    .map(|(q, a)| {
                        view! {
                            <div class="rounded-2xl bg-white dark:bg-gray-800 p-4 shadow-sm">
                                <h4 class="mb-2 text-sm font-bold text-gray-900 dark:text-gray-100">{*q}</h4>
                                <p class="text-xs leading-relaxed text-gray-500 dark:text-gray-400">{*a}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
