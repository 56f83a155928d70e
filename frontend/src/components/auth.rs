//! 登录、注册与找回密码

use foodrescue_shared::form::{check_new_password, check_verification_code, digits_only};
use foodrescue_shared::{Role, Screen};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::{Leaf, ShieldCheck, Store, User};
use crate::components::ui::ScreenHeader;
use crate::session;
use crate::state::use_store;
use crate::web::alert;
use crate::web::router::use_router;

const INPUT_CLASS: &str = "w-full rounded-xl border border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 px-4 py-3 text-sm text-gray-900 dark:text-gray-50 outline-none focus:border-green-500";
const PRIMARY_BUTTON: &str = "w-full rounded-xl bg-green-600 py-3 font-semibold text-white hover:bg-green-700 disabled:opacity-60";
const OUTLINE_BUTTON: &str = "flex w-full items-center gap-3 rounded-xl border border-green-600 px-6 py-3 text-sm font-semibold text-green-700 dark:text-green-400 hover:bg-green-50 dark:hover:bg-gray-800";

#[component]
pub fn LoginScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get() {
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            match session::login(email.get_untracked(), password.get_untracked()).await {
                Ok(role) => session::sign_in(&store, &router, role),
                Err(e) => alert(&e.to_string()),
            }
            set_loading.set(false);
        });
    };

    let quick_login = move |role: Role| session::sign_in(&store, &router, role);

    view! {
        <div class="flex min-h-full flex-col justify-center px-6 py-10 bg-white dark:bg-gray-900">
            <div class="mx-auto mb-6 flex h-16 w-16 items-center justify-center rounded-2xl bg-green-50 dark:bg-green-950/30">
                <Leaf attr:class="h-8 w-8 text-green-600" />
            </div>
            <h1 class="mb-2 text-center text-2xl font-bold text-gray-900 dark:text-gray-50">"Selamat Datang Kembali"</h1>
            <p class="mb-8 text-center text-sm text-gray-500 dark:text-gray-400">
                "Masuk untuk melanjutkan penyelamatan makanan Anda."
            </p>

            <form class="space-y-4" on:submit=on_submit>
                <label class="block space-y-1">
                    <span class="text-sm font-medium text-gray-700 dark:text-gray-300">"Email"</span>
                    <input
                        type="email"
                        class=INPUT_CLASS
                        placeholder="user@gmail.com"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>
                <label class="block space-y-1">
                    <span class="text-sm font-medium text-gray-700 dark:text-gray-300">"Password"</span>
                    <div class="relative">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            class=INPUT_CLASS
                            placeholder="••••••••"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="absolute right-3 top-3 text-xs font-semibold text-gray-400"
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Sembunyikan" } else { "Lihat" }}
                        </button>
                    </div>
                </label>
                <div class="text-right">
                    <button
                        type="button"
                        class="text-xs font-semibold text-green-600"
                        on:click=move |_| router.navigate(Screen::ForgotPassword)
                    >
                        "Lupa Sandi?"
                    </button>
                </div>
                <button type="submit" class=PRIMARY_BUTTON disabled=loading>
                    {move || if loading.get() { "Memproses..." } else { "Masuk" }}
                </button>
            </form>

            <div class="my-8 flex items-center gap-4">
                <div class="h-px flex-1 bg-gray-100 dark:bg-gray-800"></div>
                <span class="text-xs font-medium uppercase tracking-wider text-gray-400">"Akses Cepat (Demo)"</span>
                <div class="h-px flex-1 bg-gray-100 dark:bg-gray-800"></div>
            </div>

            <div class="space-y-3">
                <button class=OUTLINE_BUTTON on:click=move |_| quick_login(Role::User)>
                    <User attr:class="h-5 w-5" />
                    <span>"Login sebagai Penerima"</span>
                </button>
                <button class=OUTLINE_BUTTON on:click=move |_| quick_login(Role::Partner)>
                    <Store attr:class="h-5 w-5" />
                    <span>"Login sebagai Mitra"</span>
                </button>
                <button class=OUTLINE_BUTTON on:click=move |_| quick_login(Role::Admin)>
                    <ShieldCheck attr:class="h-5 w-5" />
                    <span>"Login sebagai Admin"</span>
                </button>
            </div>

            <p class="mt-8 text-center text-sm text-gray-500 dark:text-gray-400">
                "Belum punya akun? "
                <button class="font-bold text-green-600" on:click=move |_| router.navigate(Screen::Signup)>
                    "Daftar Sekarang"
                </button>
            </p>
        </div>
    }
}

#[component]
pub fn SignupScreen() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900">
            <ScreenHeader title="Daftar" />
            <div class="px-6 py-8">
                <h2 class="mb-2 text-2xl font-bold text-gray-900 dark:text-gray-50">"Buat Akun"</h2>
                <p class="mb-8 text-sm text-gray-500 dark:text-gray-400">
                    "Daftar untuk mulai menyelamatkan makanan dan lingkungan."
                </p>
                <form
                    class="space-y-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        router.navigate(Screen::Verification);
                    }
                >
                    <input class=INPUT_CLASS placeholder="Nama Lengkap" />
                    <input class=INPUT_CLASS type="email" placeholder="nama@email.com" />
                    <input class=INPUT_CLASS type="password" placeholder="Sandi" />
                    <button type="submit" class=PRIMARY_BUTTON>"Daftar Sekarang"</button>
                </form>
            </div>
        </div>
    }
}

#[component]
pub fn ForgotPasswordScreen() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900">
            <ScreenHeader title="Lupa Kata Sandi" />
            <div class="px-6 py-8">
                <h2 class="mb-2 text-2xl font-bold text-gray-900 dark:text-gray-50">"Reset Sandi"</h2>
                <p class="mb-8 text-sm text-gray-500 dark:text-gray-400">
                    "Masukkan email Anda untuk menerima kode verifikasi."
                </p>
                <form
                    class="space-y-6"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        router.navigate(Screen::Verification);
                    }
                >
                    <input class=INPUT_CLASS type="email" placeholder="nama@email.com" />
                    <button type="submit" class=PRIMARY_BUTTON>"Kirim Kode"</button>
                </form>
            </div>
        </div>
    }
}

/// 4 位验证码，通过后以普通用户身份进入首页
#[component]
pub fn VerificationScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let (code, set_code) = signal(String::new());

    let on_verify = move |_| match check_verification_code(&code.get()) {
        Ok(()) => session::sign_in(&store, &router, Role::User),
        Err(e) => alert(&e.to_string()),
    };

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900">
            <ScreenHeader title="Verifikasi" />
            <div class="px-6 pt-8 text-center">
                <h2 class="mb-4 text-2xl font-bold text-gray-900 dark:text-gray-50">"Masukkan Kode"</h2>
                <p class="mb-10 text-sm text-gray-500 dark:text-gray-400">"Kode OTP telah dikirim ke email Anda."</p>
                <input
                    class="mx-auto mb-10 block w-48 rounded-xl border border-gray-200 dark:border-gray-700 bg-gray-50 dark:bg-gray-800 py-3 text-center text-3xl font-bold tracking-[0.5em] text-gray-900 dark:text-gray-50 outline-none focus:border-green-500"
                    inputmode="numeric"
                    maxlength="4"
                    placeholder="0000"
                    prop:value=code
                    on:input=move |ev| set_code.set(digits_only(&event_target_value(&ev), 4))
                />
                <button class=PRIMARY_BUTTON on:click=on_verify>"Verifikasi"</button>
                <p class="mt-6 text-sm text-gray-400">
                    "Belum menerima kode? " <span class="font-bold text-green-600">"Kirim ulang"</span>
                </p>
            </div>
        </div>
    }
}

#[component]
pub fn NewPasswordScreen() -> impl IntoView {
    let router = use_router();
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());

    let on_save = move |_| match check_new_password(&password.get(), &confirm.get()) {
        Ok(()) => router.reset_to(Screen::Login),
        Err(e) => alert(&e.to_string()),
    };

    view! {
        <div class="min-h-full bg-white dark:bg-gray-900">
            <ScreenHeader title="Sandi Baru" />
            <div class="space-y-4 px-6 py-8">
                <input
                    class=INPUT_CLASS
                    type="password"
                    placeholder="Sandi Baru"
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <input
                    class=INPUT_CLASS
                    type="password"
                    placeholder="Konfirmasi Sandi"
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <button class=PRIMARY_BUTTON on:click=on_save>"Simpan Sandi"</button>
            </div>
        </div>
    }
}
