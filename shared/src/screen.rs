//! 屏幕定义与导航状态机 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的全部屏幕、后退栈以及屏幕间的跳转策略。

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Role;

/// 应用屏幕枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    /// 登录页 (默认屏幕)
    #[default]
    Login,
    Signup,
    ForgotPassword,
    Verification,
    NewPassword,
    Home,
    Profile,
    EditProfile,
    ChangePassword,
    NotificationSettings,
    CheckQuality,
    QualityHistory,
    Notifications,
    PartnerDashboard,
    PartnerInventory,
    Transactions,
    UploadProduct,
    Success,
    AdminDashboard,
    AdminUsers,
    AdminProducts,
    AdminReports,
    AdminSettings,
    MapView,
    PartnerDetail,
    ReservationForm,
    ReservationSuccess,
    ImpactReport,
    History,
    AddAddress,
    Explore,
    LocationSelect,
    CreateRequest,
    HelpFaq,
    SavedItems,
    Favorites,
}

impl Screen {
    /// 带底部导航栏的主屏幕
    pub fn is_main_tab(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::Profile
                | Self::CheckQuality
                | Self::PartnerDashboard
                | Self::PartnerInventory
                | Self::Transactions
        )
    }

    /// 登录前即可访问的认证流程屏幕
    pub fn is_auth_flow(&self) -> bool {
        matches!(
            self,
            Self::Login
                | Self::Signup
                | Self::ForgotPassword
                | Self::Verification
                | Self::NewPassword
        )
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::AdminDashboard
                | Self::AdminUsers
                | Self::AdminProducts
                | Self::AdminReports
                | Self::AdminSettings
        )
    }

    pub fn is_partner(&self) -> bool {
        matches!(
            self,
            Self::PartnerDashboard
                | Self::PartnerInventory
                | Self::Transactions
                | Self::UploadProduct
                | Self::Success
        )
    }

    /// 角色登录后的落地屏幕
    pub fn landing_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Partner => Self::PartnerDashboard,
            Role::User => Self::Home,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Masuk",
            Self::Signup => "Daftar",
            Self::ForgotPassword => "Lupa Kata Sandi",
            Self::Verification => "Verifikasi",
            Self::NewPassword => "Kata Sandi Baru",
            Self::Home => "Beranda",
            Self::Profile => "Profil Saya",
            Self::EditProfile => "Edit Profil",
            Self::ChangePassword => "Ganti Kata Sandi",
            Self::NotificationSettings => "Pengaturan Notifikasi",
            Self::CheckQuality => "Cek Kualitas",
            Self::QualityHistory => "Riwayat Cek Kualitas",
            Self::Notifications => "Notifikasi",
            Self::PartnerDashboard => "Dashboard Mitra",
            Self::PartnerInventory => "Inventaris",
            Self::Transactions => "Transaksi",
            Self::UploadProduct => "Unggah Produk",
            Self::Success => "Berhasil",
            Self::AdminDashboard => "Dashboard Admin",
            Self::AdminUsers => "Pengguna & Mitra",
            Self::AdminProducts => "Produk",
            Self::AdminReports => "Laporan",
            Self::AdminSettings => "Pengaturan",
            Self::MapView => "Peta",
            Self::PartnerDetail => "Detail Mitra",
            Self::ReservationForm => "Reservasi",
            Self::ReservationSuccess => "Reservasi Berhasil",
            Self::ImpactReport => "Laporan Dampak",
            Self::History => "Riwayat Pesanan",
            Self::AddAddress => "Tambah Alamat",
            Self::Explore => "Jelajahi",
            Self::LocationSelect => "Atur Lokasi Pengiriman",
            Self::CreateRequest => "Buat Permintaan",
            Self::HelpFaq => "Bantuan & FAQ",
            Self::SavedItems => "Tersimpan",
            Self::Favorites => "Favorit Saya",
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 底部导航栏的一个标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTab {
    pub screen: Screen,
    pub label: &'static str,
}

/// 按角色返回底部导航标签
pub fn bottom_nav(role: Role) -> &'static [NavTab] {
    static USER_TABS: [NavTab; 3] = [
        NavTab { screen: Screen::Home, label: "Beranda" },
        NavTab { screen: Screen::CheckQuality, label: "Cek Kualitas" },
        NavTab { screen: Screen::Profile, label: "Profil" },
    ];
    static PARTNER_TABS: [NavTab; 4] = [
        NavTab { screen: Screen::PartnerDashboard, label: "Beranda" },
        NavTab { screen: Screen::Transactions, label: "Transaksi" },
        NavTab { screen: Screen::PartnerInventory, label: "Mitra" },
        NavTab { screen: Screen::Profile, label: "Profil" },
    ];
    match role {
        Role::User => &USER_TABS,
        Role::Partner => &PARTNER_TABS,
        // 管理员使用侧边栏布局
        Role::Admin => &[],
    }
}

// =========================================================
// 跳转策略
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("screen {target} is not reachable for role {role:?}")]
    Forbidden { target: Screen, role: Role },
}

/// 屏幕跳转策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// 任意屏幕之间都可以跳转
    #[default]
    Permissive,
    /// 按登录状态和角色限制目标屏幕
    RoleGuarded,
}

impl TransitionPolicy {
    pub fn allows(&self, target: Screen, role: Role, signed_in: bool) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::RoleGuarded => {
                if target.is_auth_flow() {
                    return true;
                }
                if !signed_in {
                    return false;
                }
                if target.is_admin() {
                    return role == Role::Admin;
                }
                if target.is_partner() {
                    return matches!(role, Role::Partner | Role::Admin);
                }
                true
            }
        }
    }
}

// =========================================================
// 导航器
// =========================================================

/// 当前屏幕 + 后退栈 + 角色
///
/// 后退栈是简单的 LIFO，不支持前进。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
    role: Role,
    signed_in: bool,
    policy: TransitionPolicy,
}

impl Navigator {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    /// 当前屏幕入栈，切换到目标屏幕
    pub fn navigate(&mut self, target: Screen) -> Result<(), NavigationError> {
        if !self.policy.allows(target, self.role, self.signed_in) {
            return Err(NavigationError::Forbidden {
                target,
                role: self.role,
            });
        }
        self.history.push(self.current);
        self.current = target;
        Ok(())
    }

    /// 弹出上一屏幕；栈为空时停留在当前屏幕
    pub fn go_back(&mut self) -> Option<Screen> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(previous)
    }

    /// 登录成功：清空后退栈并跳到角色落地屏幕
    pub fn switch_role(&mut self, role: Role) -> Screen {
        self.role = role;
        self.signed_in = true;
        self.history.clear();
        self.current = Screen::landing_for(role);
        self.current
    }

    /// 在个人资料页切换用户/商家模式，商家模式落地到库存页
    pub fn switch_mode(&mut self, role: Role) -> Screen {
        self.switch_role(role);
        if role == Role::Partner {
            self.current = Screen::PartnerInventory;
        }
        self.current
    }

    /// 底部导航或侧边栏跳转：清空后退栈
    pub fn reset_to(&mut self, target: Screen) -> Result<(), NavigationError> {
        if !self.policy.allows(target, self.role, self.signed_in) {
            return Err(NavigationError::Forbidden {
                target,
                role: self.role,
            });
        }
        self.history.clear();
        self.current = target;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.role = Role::User;
        self.signed_in = false;
        self.history.clear();
        self.current = Screen::Login;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: [Screen; 8] = [
        Screen::Home,
        Screen::Profile,
        Screen::CheckQuality,
        Screen::History,
        Screen::PartnerDetail,
        Screen::LocationSelect,
        Screen::AdminUsers,
        Screen::Signup,
    ];

    fn screen_strategy() -> impl Strategy<Value = Screen> {
        prop::sample::select(SAMPLE.to_vec())
    }

    #[test]
    fn go_back_on_empty_stack_is_noop() {
        let mut nav = Navigator::default();
        assert_eq!(nav.go_back(), None);
        assert_eq!(nav.current(), Screen::Login);
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn login_resets_stack_and_lands_per_role() {
        let mut nav = Navigator::default();
        nav.navigate(Screen::Signup).unwrap();
        nav.navigate(Screen::Login).unwrap();
        assert_eq!(nav.switch_role(Role::Admin), Screen::AdminDashboard);
        assert_eq!(nav.depth(), 0);
        assert_eq!(nav.switch_role(Role::Partner), Screen::PartnerDashboard);
        assert_eq!(nav.switch_role(Role::User), Screen::Home);
    }

    #[test]
    fn switching_to_partner_mode_lands_on_inventory() {
        let mut nav = Navigator::default();
        nav.switch_role(Role::User);
        nav.navigate(Screen::Profile).unwrap();
        assert_eq!(nav.switch_mode(Role::Partner), Screen::PartnerInventory);
        assert_eq!(nav.switch_mode(Role::User), Screen::Home);
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn logout_returns_to_login() {
        let mut nav = Navigator::default();
        nav.switch_role(Role::Partner);
        nav.navigate(Screen::UploadProduct).unwrap();
        nav.logout();
        assert_eq!(nav.current(), Screen::Login);
        assert_eq!(nav.role(), Role::User);
        assert!(!nav.is_signed_in());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn permissive_policy_allows_deep_links() {
        let mut nav = Navigator::new(TransitionPolicy::Permissive);
        assert!(nav.navigate(Screen::AdminReports).is_ok());
        assert_eq!(nav.current(), Screen::AdminReports);
    }

    #[test]
    fn guarded_policy_rejects_without_touching_state() {
        let mut nav = Navigator::new(TransitionPolicy::RoleGuarded);
        let err = nav.navigate(Screen::Home).unwrap_err();
        assert_eq!(
            err,
            NavigationError::Forbidden {
                target: Screen::Home,
                role: Role::User
            }
        );
        assert_eq!(nav.current(), Screen::Login);
        assert_eq!(nav.depth(), 0);

        assert!(nav.navigate(Screen::ForgotPassword).is_ok());

        nav.switch_role(Role::User);
        assert!(nav.navigate(Screen::AdminDashboard).is_err());
        assert!(nav.navigate(Screen::UploadProduct).is_err());
        assert!(nav.navigate(Screen::CheckQuality).is_ok());

        nav.switch_role(Role::Admin);
        assert!(nav.navigate(Screen::AdminSettings).is_ok());
        assert!(nav.navigate(Screen::Transactions).is_ok());
    }

    #[test]
    fn bottom_nav_per_role() {
        assert_eq!(bottom_nav(Role::User).len(), 3);
        assert_eq!(bottom_nav(Role::Partner)[1].screen, Screen::Transactions);
        assert!(bottom_nav(Role::Admin).is_empty());
        assert!(bottom_nav(Role::User).iter().all(|t| t.screen.is_main_tab()));
    }

    #[test]
    fn screen_names_serialize_like_the_stored_identifiers() {
        assert_eq!(
            serde_json::to_value(Screen::HelpFaq).unwrap(),
            serde_json::json!("HELP_FAQ")
        );
        assert_eq!(
            serde_json::from_value::<Screen>(serde_json::json!("RESERVATION_FORM")).unwrap(),
            Screen::ReservationForm
        );
    }

    proptest! {
        #[test]
        fn navigate_twice_then_back_returns_to_first(
            prefix in prop::collection::vec(screen_strategy(), 0..6),
            a in screen_strategy(),
            b in screen_strategy(),
        ) {
            let mut nav = Navigator::default();
            for s in prefix {
                nav.navigate(s).unwrap();
            }
            let depth_before = nav.depth();

            nav.navigate(a).unwrap();
            nav.navigate(b).unwrap();
            nav.go_back();

            prop_assert_eq!(nav.current(), a);
            prop_assert_eq!(nav.depth(), depth_before + 1);

            nav.go_back();
            prop_assert_eq!(nav.depth(), depth_before);
        }
    }
}
