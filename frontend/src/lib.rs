//! FoodRescue 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `state`: 全局状态（持久化到 LocalStorage）
//! - `web::router`: 屏幕路由服务（内存中的后退栈）
//! - `session`: 模拟登录与角色切换
//! - `ai`: Gemini 调用入口
//! - `components`: UI 组件层

mod ai;
mod config;
mod session;
mod state;
mod components {
    pub mod admin;
    pub mod auth;
    pub mod features;
    pub mod home;
    pub mod icons;
    pub mod location;
    pub mod orders;
    pub mod partner;
    pub mod profile;
    pub mod quality_check;
    mod ui;
}

use crate::components::admin::{
    AdminDashboardScreen, AdminProductsScreen, AdminReportsScreen, AdminSettingsScreen,
    AdminSidebar, AdminUsersScreen,
};
use crate::components::auth::{
    ForgotPasswordScreen, LoginScreen, NewPasswordScreen, SignupScreen, VerificationScreen,
};
use crate::components::features::{
    CreateRequestScreen, ExploreScreen, ImpactReportScreen, MapViewScreen, PartnerDetailScreen,
};
use crate::components::home::HomeScreen;
use crate::components::location::{AddAddressScreen, LocationSelectScreen};
use crate::components::orders::{
    FavoritesScreen, HistoryScreen, ReservationFormScreen, ReservationSuccessScreen,
    SavedItemsScreen,
};
use crate::components::partner::{
    PartnerDashboardScreen, PartnerInventoryScreen, SuccessScreen, TransactionsScreen,
    UploadProductScreen,
};
use crate::components::profile::{
    ChangePasswordScreen, EditProfileScreen, HelpFaqScreen, NotificationSettingsScreen,
    NotificationsScreen, ProfileScreen,
};
use crate::components::quality_check::{QualityCheckScreen, QualityHistoryScreen};
use crate::config::NAVIGATION_POLICY;
use crate::state::{StoreContext, use_store};

use foodrescue_shared::screen::bottom_nav;
use foodrescue_shared::{Role, Screen};
use leptos::prelude::*;

// 浏览器 API 封装模块
pub(crate) mod web {
    mod dialog;
    mod file;
    mod geolocation;
    mod http;
    pub mod router;
    mod storage;

    pub use dialog::alert;
    pub use file::read_event_image;
    pub use geolocation::{GeoOptions, current_position};
    pub use http::FetchClient;
    pub use storage::BrowserStorage;
}

use web::router::{Router, ScreenOutlet, use_router};

/// 屏幕匹配函数
///
/// 根据 Screen 枚举返回对应的视图组件。
fn screen_matcher(screen: Screen) -> AnyView {
    match screen {
        Screen::Login => view! { <LoginScreen /> }.into_any(),
        Screen::Signup => view! { <SignupScreen /> }.into_any(),
        Screen::ForgotPassword => view! { <ForgotPasswordScreen /> }.into_any(),
        Screen::Verification => view! { <VerificationScreen /> }.into_any(),
        Screen::NewPassword => view! { <NewPasswordScreen /> }.into_any(),

        Screen::Home => view! { <HomeScreen /> }.into_any(),
        Screen::Explore => view! { <ExploreScreen /> }.into_any(),
        Screen::MapView => view! { <MapViewScreen /> }.into_any(),
        Screen::PartnerDetail => view! { <PartnerDetailScreen /> }.into_any(),
        Screen::CreateRequest => view! { <CreateRequestScreen /> }.into_any(),
        Screen::ImpactReport => view! { <ImpactReportScreen /> }.into_any(),

        Screen::ReservationForm => view! { <ReservationFormScreen /> }.into_any(),
        Screen::ReservationSuccess => view! { <ReservationSuccessScreen /> }.into_any(),
        Screen::History => view! { <HistoryScreen /> }.into_any(),
        Screen::SavedItems => view! { <SavedItemsScreen /> }.into_any(),
        Screen::Favorites => view! { <FavoritesScreen /> }.into_any(),

        Screen::CheckQuality => view! { <QualityCheckScreen /> }.into_any(),
        Screen::QualityHistory => view! { <QualityHistoryScreen /> }.into_any(),

        Screen::Profile => view! { <ProfileScreen /> }.into_any(),
        Screen::EditProfile => view! { <EditProfileScreen /> }.into_any(),
        Screen::ChangePassword => view! { <ChangePasswordScreen /> }.into_any(),
        Screen::NotificationSettings => view! { <NotificationSettingsScreen /> }.into_any(),
        Screen::Notifications => view! { <NotificationsScreen /> }.into_any(),
        Screen::HelpFaq => view! { <HelpFaqScreen /> }.into_any(),

        Screen::LocationSelect => view! { <LocationSelectScreen /> }.into_any(),
        Screen::AddAddress => view! { <AddAddressScreen /> }.into_any(),

        Screen::PartnerDashboard => view! { <PartnerDashboardScreen /> }.into_any(),
        Screen::PartnerInventory => view! { <PartnerInventoryScreen /> }.into_any(),
        Screen::Transactions => view! { <TransactionsScreen /> }.into_any(),
        Screen::UploadProduct => view! { <UploadProductScreen /> }.into_any(),
        Screen::Success => view! { <SuccessScreen /> }.into_any(),

        Screen::AdminDashboard => view! { <AdminDashboardScreen /> }.into_any(),
        Screen::AdminUsers => view! { <AdminUsersScreen /> }.into_any(),
        Screen::AdminProducts => view! { <AdminProductsScreen /> }.into_any(),
        Screen::AdminReports => view! { <AdminReportsScreen /> }.into_any(),
        Screen::AdminSettings => view! { <AdminSettingsScreen /> }.into_any(),
    }
}

/// 管理后台只渲染后台屏幕，其余屏幕回落到仪表盘
fn admin_matcher(screen: Screen) -> AnyView {
    if screen.is_admin() {
        screen_matcher(screen)
    } else {
        screen_matcher(Screen::AdminDashboard)
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 加载持久化状态
    let store = StoreContext::new();
    provide_context(store);

    view! {
        // 2. 路由器组件：注入跳转策略
        <Router policy=NAVIGATION_POLICY>
            <Shell />
        </Router>
    }
}

/// 按角色选择布局：管理员使用侧边栏，其余使用手机框架
#[component]
fn Shell() -> impl IntoView {
    let router = use_router();
    let store = use_store();
    let is_admin = Memo::new(move |_| router.role() == Role::Admin);
    let theme = move || {
        if store.state.with(|s| s.is_dark_mode) {
            "dark"
        } else {
            ""
        }
    };

    view! {
        <div class=theme>
            {move || {
                if is_admin.get() {
                    view! {
                        <div class="flex h-screen bg-gray-100 dark:bg-gray-900 font-sans">
                            <AdminSidebar />
                            <main class="flex-1 overflow-y-auto">
                                <ScreenOutlet matcher=admin_matcher />
                            </main>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="min-h-screen bg-gray-100 dark:bg-gray-950 flex items-center justify-center p-0 md:p-4 font-sans">
                            <div class="w-full h-[100dvh] md:h-[844px] md:w-[390px] bg-white dark:bg-gray-900 md:rounded-[40px] shadow-2xl overflow-hidden relative flex flex-col">
                                <div class="flex-1 overflow-y-auto relative transition-colors duration-300">
                                    <ScreenOutlet matcher=screen_matcher />
                                </div>
                                <BottomNav />
                            </div>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

/// 底部导航，只在主标签屏幕显示
#[component]
fn BottomNav() -> impl IntoView {
    use crate::components::icons::{CheckCircle, Home, Store, Truck, User};

    let router = use_router();
    let current = Memo::new(move |_| router.current());

    view! {
        <Show when=move || current.get().is_main_tab()>
            <nav class="flex justify-around border-t border-gray-100 dark:border-gray-800 bg-white dark:bg-gray-900 py-2">
                {move || {
                    bottom_nav(router.role())
                        .iter()
                        .map(|tab| {
                            let target = tab.screen;
                            let active = move || current.get() == target;
                            let icon = match target {
                                Screen::Home | Screen::PartnerDashboard => {
                                    view! { <Home attr:class="h-6 w-6" /> }.into_any()
                                }
                                Screen::CheckQuality => {
                                    view! { <CheckCircle attr:class="h-6 w-6" /> }.into_any()
                                }
                                Screen::Transactions => {
                                    view! { <Truck attr:class="h-6 w-6" /> }.into_any()
                                }
                                Screen::PartnerInventory => {
                                    view! { <Store attr:class="h-6 w-6" /> }.into_any()
                                }
                                _ => view! { <User attr:class="h-6 w-6" /> }.into_any(),
                            };
                            view! {
                                <button
                                    on:click=move |_| router.reset_to(target)
                                    class=move || {
                                        if active() {
                                            "flex flex-col items-center gap-1 text-xs font-semibold text-green-600"
                                        } else {
                                            "flex flex-col items-center gap-1 text-xs text-gray-400"
                                        }
                                    }
                                >
                                    {icon}
                                    <span>{tab.label}</span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </nav>
        </Show>
    }
}
