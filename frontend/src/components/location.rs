//! 配送地址：AI 搜索、GPS 定位、手动表单和已保存列表

use foodrescue_shared::date::Timestamp;
use foodrescue_shared::form::AddressForm;
use foodrescue_shared::{Address, AddressKind, LocationInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::ai::AiService;
use crate::components::icons::{Camera, CheckCircle, ChevronRight, Home, Loader, MapPin, Navigation, Plus, Search, Trash, X};
use crate::components::ui::ScreenHeader;
use crate::config::{GPS_GEOLOCATION_TIMEOUT_MS, PASSIVE_GEOLOCATION_TIMEOUT_MS};
use crate::state::{StoreContext, use_store};
use crate::web::router::use_router;
use crate::web::{GeoOptions, alert, current_position, read_event_image};

const INPUT_CLASS: &str = "w-full rounded-xl border border-gray-200 dark:border-gray-600 bg-gray-50 dark:bg-gray-700 px-4 py-3 text-sm text-gray-900 dark:text-white outline-none focus:border-green-500";

/// 校验表单并生成新地址；失败时弹出提示
fn build_address(store: &StoreContext, form: AddressForm) -> Option<Address> {
    let id = store.mutate(|s| s.next_address_id(Timestamp::now()))?;
    let user = store.state.with_untracked(|s| s.user.clone());
    match form.into_address(id, &user) {
        Ok(address) => Some(address),
        Err(e) => {
            alert(&e.to_string());
            None
        }
    }
}

#[component]
pub fn LocationSelectScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();

    let coords = RwSignal::new(Option::<(f64, f64)>::None);
    let query = RwSignal::new(String::new());
    let searching = RwSignal::new(false);
    let results = RwSignal::new(Vec::<LocationInfo>::new());
    let gps_loading = RwSignal::new(false);
    let show_form = RwSignal::new(false);
    let form = RwSignal::new(AddressForm::default());

    // 被动定位：只作为搜索的位置参考，失败不打扰用户
    spawn_local(async move {
        let options = GeoOptions {
            high_accuracy: true,
            timeout_ms: PASSIVE_GEOLOCATION_TIMEOUT_MS,
            maximum_age_ms: 0,
        };
        match current_position(options).await {
            Ok(position) => coords.set(Some(position)),
            Err(e) => log::warn!("[Location] Passive lookup unavailable: {}", e),
        }
    });

    let on_search = move || {
        let text = query.get_untracked();
        if text.trim().is_empty() || searching.get_untracked() {
            return;
        }
        searching.set(true);
        spawn_local(async move {
            let ai = AiService::load();
            match ai.search_location_by_query(&text, coords.get_untracked()).await {
                Ok(found) => results.set(found),
                Err(e) => log::error!("[Location] Search failed ({}): {}", e.error_code(), e),
            }
            searching.set(false);
        });
    };

    let on_gps = move |_| {
        if gps_loading.get_untracked() {
            return;
        }
        gps_loading.set(true);
        show_form.set(false);
        spawn_local(async move {
            let options = GeoOptions {
                high_accuracy: true,
                timeout_ms: GPS_GEOLOCATION_TIMEOUT_MS,
                maximum_age_ms: 0,
            };
            match current_position(options).await {
                Ok((lat, lng)) => {
                    log::info!("[Location] Detecting address for {}, {}", lat, lng);
                    match AiService::load().search_location_by_coords(lat, lng).await {
                        Ok(info) => form.set(AddressForm::from_gps(&info)),
                        Err(e) => {
                            log::error!("[Location] Reverse lookup failed ({}): {}", e.error_code(), e);
                            alert("Gagal mengurai detail alamat. Silakan isi form manual.");
                        }
                    }
                }
                Err(e) => alert(&format!(
                    "GPS Error: {}. Pastikan GPS perangkat aktif dan izin diberikan.",
                    e
                )),
            }
            show_form.set(true);
            gps_loading.set(false);
        });
    };

    let on_pick_result = move |info: LocationInfo| {
        form.set(AddressForm::from_search(&info));
        show_form.set(true);
        results.set(Vec::new());
    };

    let on_save = Callback::new(move |_: ()| {
        if let Some(address) = build_address(&store, form.get_untracked()) {
            log::info!("[Location] Saved address {:?}", address.title);
            store.mutate(|s| s.add_and_select_address(address));
            router.go_back();
        }
    });

    let current = move || store.state.with(|s| s.current_location_name.clone());
    let addresses = move || store.state.with(|s| s.addresses.clone());

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Atur Lokasi Pengiriman" />
            <div class="space-y-6 p-6">
                // 搜索
                <div class="space-y-3">
                    <p class="text-[10px] font-black uppercase tracking-widest text-gray-400">"Cari Tempat atau Alamat"</p>
                    <div class="relative">
                        <Search attr:class="absolute left-4 top-1/2 h-5 w-5 -translate-y-1/2 text-gray-400" />
                        <input
                            type="text"
                            class="h-14 w-full rounded-2xl border border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 pl-12 pr-20 text-sm font-bold shadow-sm focus:border-green-500 dark:text-white"
                            placeholder="Contoh: Gedung Sate, Bandung..."
                            prop:value=query
                            on:input=move |ev| query.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    on_search();
                                }
                            }
                        />
                        <button
                            class="absolute right-2 top-2 bottom-2 rounded-xl bg-gray-900 px-4 text-[10px] font-black uppercase tracking-widest text-white disabled:opacity-50"
                            disabled=move || query.with(|q| q.trim().is_empty()) || searching.get()
                            on:click=move |_| on_search()
                        >
                            {move || {
                                if searching.get() {
                                    view! { <Loader attr:class="h-4 w-4 animate-spin" /> }.into_any()
                                } else {
                                    view! { "Cari" }.into_any()
                                }
                            }}
                        </button>
                    </div>

                    <Show when=move || !results.with(Vec::is_empty)>
                        <div class="space-y-2">
                            <For each=move || results.get() key=|r| format!("{}|{}", r.place_name, r.address) let:result>
                                {
                                    let (name, address) = (result.place_name.clone(), result.address.clone());
                                    view! {
                                        <button
                                            class="flex w-full items-center gap-4 rounded-2xl bg-white dark:bg-gray-900 p-4 text-left shadow-sm hover:bg-green-50"
                                            on:click=move |_| on_pick_result(result.clone())
                                        >
                                            <div class="flex h-10 w-10 shrink-0 items-center justify-center rounded-xl bg-green-100 text-green-600">
                                                <MapPin attr:class="h-5 w-5" />
                                            </div>
                                            <div class="min-w-0 flex-1">
                                                <h4 class="truncate text-sm font-bold text-gray-900 dark:text-white">{name}</h4>
                                                <p class="line-clamp-1 text-[10px] font-medium text-gray-400">{address}</p>
                                            </div>
                                            <ChevronRight attr:class="h-4 w-4 text-gray-300" />
                                        </button>
                                    }
                                }
                            </For>
                            <button
                                class="w-full py-2 text-center text-[10px] font-black uppercase tracking-widest text-gray-400 hover:text-rose-500"
                                on:click=move |_| results.set(Vec::new())
                            >
                                "Bersihkan Hasil"
                            </button>
                        </div>
                    </Show>
                </div>

                // GPS
                <button
                    class="flex h-16 w-full items-center justify-start rounded-3xl border-2 border-gray-100 dark:border-gray-800 bg-white dark:bg-gray-900 px-6 text-gray-900 dark:text-white hover:border-green-500 disabled:opacity-60"
                    disabled=gps_loading
                    on:click=on_gps
                >
                    <div class="mr-4 rounded-xl bg-orange-500 p-2 text-white shadow-lg">
                        {move || {
                            if gps_loading.get() {
                                view! { <Loader attr:class="h-5 w-5 animate-spin" /> }.into_any()
                            } else {
                                view! { <Navigation attr:class="h-5 w-5" /> }.into_any()
                            }
                        }}
                    </div>
                    <div class="text-left">
                        <span class="block text-xs font-black uppercase tracking-tight">"Gunakan GPS Presisi"</span>
                        <span class="block text-[10px] font-medium text-gray-400">"Verifikasi lokasi akurat (E-KYC)"</span>
                    </div>
                </button>

                // 手动表单
                <Show
                    when=move || show_form.get()
                    fallback=move || {
                        view! {
                            <button
                                class="flex w-full items-center justify-center gap-3 rounded-3xl border-2 border-dashed border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 px-6 py-5 text-xs font-black uppercase tracking-widest text-green-600"
                                on:click=move |_| show_form.set(true)
                            >
                                <Plus attr:class="h-5 w-5" />
                                "Tambah Alamat Manual"
                            </button>
                        }
                    }
                >
                    <ManualAddressForm
                        form=form
                        on_save=on_save
                        on_cancel=Callback::new(move |_: ()| show_form.set(false))
                    />
                </Show>

                // 已保存地址
                <div class="space-y-3">
                    <h2 class="text-xs font-semibold uppercase tracking-wide text-gray-400">"Alamat Tersimpan"</h2>
                    <For each=addresses key=|a| a.id let:address>
                        {
                            let id = address.id;
                            let title = address.title.clone();
                            let title_for_select = title.clone();
                            let selected = {
                                let title = title.clone();
                                Memo::new(move |_| current() == title)
                            };
                            let is_home = address.kind == AddressKind::Home;
                            view! {
                                <div
                                    class=move || {
                                        if selected.get() {
                                            "relative flex cursor-pointer gap-4 rounded-3xl border-2 border-green-500 bg-green-50 dark:bg-green-950/20 p-5 shadow-md"
                                        } else {
                                            "relative flex cursor-pointer gap-4 rounded-3xl border-2 border-gray-100 dark:border-gray-800 bg-white dark:bg-gray-900 p-5 shadow-sm"
                                        }
                                    }
                                    on:click=move |_| {
                                        store.mutate(|s| s.select_location(title_for_select.clone()));
                                        router.go_back();
                                    }
                                >
                                    <div class="flex h-12 w-12 shrink-0 items-center justify-center rounded-2xl bg-gray-100 dark:bg-gray-800 text-gray-500">
                                        {if is_home {
                                            view! { <Home attr:class="h-5 w-5" /> }.into_any()
                                        } else {
                                            view! { <Navigation attr:class="h-5 w-5" /> }.into_any()
                                        }}
                                    </div>
                                    <div class="min-w-0 flex-1">
                                        <div class="mb-1 flex items-center justify-between">
                                            <h4 class="flex items-center gap-2 truncate text-sm font-black text-gray-900 dark:text-white">
                                                {title}
                                                <Show when=move || selected.get()>
                                                    <CheckCircle attr:class="h-4 w-4 text-green-600" />
                                                </Show>
                                            </h4>
                                            <button
                                                class="rounded-full p-1 text-gray-300 hover:text-red-500"
                                                on:click=move |ev| {
                                                    ev.stop_propagation();
                                                    if store.mutate(|s| s.delete_address(id)) == Some(true) {
                                                        log::info!("[Location] Deleted address #{}", id);
                                                    }
                                                }
                                            >
                                                <Trash attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                        <p class="line-clamp-1 text-xs font-medium text-gray-500 dark:text-gray-400">{address.desc}</p>
                                    </div>
                                </div>
                            }
                        }
                    </For>
                </div>
            </div>
        </div>
    }
}

/// 独立的新增地址页：保存后不切换当前位置
#[component]
pub fn AddAddressScreen() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let form = RwSignal::new(AddressForm::default());

    let on_save = Callback::new(move |_: ()| {
        if let Some(address) = build_address(&store, form.get_untracked()) {
            store.mutate(|s| s.add_address(address));
            router.go_back();
        }
    });

    view! {
        <div class="min-h-full bg-gray-50 dark:bg-gray-950">
            <ScreenHeader title="Tambah Alamat" />
            <div class="p-6">
                <ManualAddressForm form=form on_save=on_save on_cancel=Callback::new(move |_: ()| router.go_back()) />
            </div>
        </div>
    }
}

#[component]
fn ManualAddressForm(
    form: RwSignal<AddressForm>,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let text_field = move |label: &'static str,
                           placeholder: &'static str,
                           get: fn(&AddressForm) -> String,
                           set: fn(&mut AddressForm, String)| {
        view! {
            <label class="block space-y-1.5">
                <span class="block text-sm font-semibold text-gray-900 dark:text-gray-200">{label}</span>
                <input
                    class=INPUT_CLASS
                    placeholder=placeholder
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </label>
        }
    };

    let on_photo = move |ev: leptos::ev::Event| {
        spawn_local(async move {
            if let Some(uri) = read_event_image(ev).await {
                form.update(|f| f.photo = Some(uri));
            }
        });
    };

    view! {
        <div class="rounded-2xl border border-green-200 bg-white dark:bg-gray-800/50 p-5 shadow-sm">
            <div class="mb-6 flex items-center justify-between">
                <h4 class="text-sm font-bold text-gray-900 dark:text-white">"Formulir Alamat Manual"</h4>
                <button class="text-gray-400" on:click=move |_| on_cancel.run(())>
                    <X attr:class="h-4 w-4" />
                </button>
            </div>

            <div class="space-y-4">
                {text_field("Label Lokasi", "Rumah, Kost, dll", |f| f.title.clone(), |f, v| f.title = v)}
                <div class="grid grid-cols-2 gap-3">
                    <label class="block space-y-1.5">
                        <span class="block text-sm font-semibold text-gray-900 dark:text-gray-200">"Negara"</span>
                        <input class=INPUT_CLASS readonly prop:value=move || form.with(|f| f.country.clone()) />
                    </label>
                    {text_field("Provinsi", "DKI Jakarta", |f| f.province.clone(), |f, v| f.province = v)}
                </div>
                <div class="grid grid-cols-2 gap-3">
                    {text_field("Kota/Kabupaten", "Jakarta Selatan", |f| f.city.clone(), |f, v| f.city = v)}
                    {text_field("Kode Pos", "12345", |f| f.postal_code.clone(), |f, v| f.set_postal_code(&v))}
                </div>
                <div class="grid grid-cols-2 gap-3">
                    {text_field("RT", "001", |f| f.rt.clone(), |f, v| f.set_rt(&v))}
                    {text_field("RW", "002", |f| f.rw.clone(), |f, v| f.set_rw(&v))}
                </div>
                <label class="block space-y-1.5">
                    <span class="block text-sm font-semibold text-gray-900 dark:text-gray-200">"Alamat Lengkap"</span>
                    <textarea
                        class="h-20 w-full resize-none rounded-xl border border-gray-200 dark:border-gray-600 bg-gray-50 dark:bg-gray-700 px-4 py-3 text-sm text-gray-900 dark:text-white outline-none focus:border-green-500"
                        placeholder="Jalan, Blok, No..."
                        prop:value=move || form.with(|f| f.full_address.clone())
                        on:input=move |ev| form.update(|f| f.full_address = event_target_value(&ev))
                    ></textarea>
                </label>
                {text_field("Catatan Patokan", "Seberang toko roti...", |f| f.notes.clone(), |f, v| f.notes = v)}

                <label class="block space-y-1.5">
                    <span class="block text-sm font-semibold text-gray-900 dark:text-gray-200">"Foto Lokasi (Opsional)"</span>
                    <div class="flex h-32 w-full cursor-pointer items-center justify-center overflow-hidden rounded-xl border-2 border-dashed border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-800">
                        {move || match form.with(|f| f.photo.clone()) {
                            Some(photo) => view! { <img src=photo class="h-full w-full object-cover" alt="Lokasi" /> }.into_any(),
                            None => {
                                view! {
                                    <div class="text-center text-gray-400">
                                        <Camera attr:class="mx-auto mb-1 h-6 w-6" />
                                        <p class="text-[10px]">"Klik upload foto"</p>
                                    </div>
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                    <input type="file" accept="image/*" class="hidden" on:change=on_photo />
                </label>

                <button class="w-full rounded-xl bg-green-600 py-3 font-semibold text-white" on:click=move |_| on_save.run(())>
                    "Simpan & Gunakan"
                </button>
            </div>
        </div>
    }
}
