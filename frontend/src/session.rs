//! 会话模块
//!
//! 模拟登录：本地账号表校验，不访问任何后端。
//! 角色同时写入全局状态（持久化）和路由服务（决定布局与落地屏幕）。

use foodrescue_shared::form::authenticate;
use foodrescue_shared::{FormError, Role};
use gloo_timers::future::TimeoutFuture;

use crate::config::LOGIN_DELAY_MS;
use crate::state::StoreContext;
use crate::web::router::RouterService;

/// 校验账号密码（带模拟延迟）
///
/// # Returns
/// 账号对应的角色，失败时返回带提示文案的错误
pub async fn login(email: String, password: String) -> Result<Role, FormError> {
    TimeoutFuture::new(LOGIN_DELAY_MS).await;
    authenticate(&email, &password)
}

/// 进入指定角色的会话
pub fn sign_in(store: &StoreContext, router: &RouterService, role: Role) {
    store.mutate(|s| s.set_role(role));
    router.switch_role(role);
}

/// 在个人资料页切换用户 / 商家模式
pub fn switch_mode(store: &StoreContext, router: &RouterService, role: Role) {
    store.mutate(|s| s.set_role(role));
    router.switch_mode(role);
}

/// 注销：角色回到普通用户，返回登录页
pub fn logout(store: &StoreContext, router: &RouterService) {
    store.mutate(|s| s.set_role(Role::User));
    router.logout();
}
