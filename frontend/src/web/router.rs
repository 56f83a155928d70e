//! 路由服务模块 - 核心引擎
//!
//! 屏幕切换完全在内存中完成，不写浏览器 History：
//! 当前屏幕、后退栈和角色都保存在共享层的 `Navigator` 中，
//! 这里用 Signal 包装它以驱动界面更新。

use foodrescue_shared::{Navigator, Role, Screen, TransitionPolicy};
use leptos::prelude::*;

/// 路由器服务
///
/// 封装所有导航操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    navigator: RwSignal<Navigator>,
}

impl RouterService {
    fn new(policy: TransitionPolicy) -> Self {
        Self {
            navigator: RwSignal::new(Navigator::new(policy)),
        }
    }

    /// 当前屏幕（响应式）
    pub fn current(&self) -> Screen {
        self.navigator.with(Navigator::current)
    }

    /// 当前角色（响应式）
    pub fn role(&self) -> Role {
        self.navigator.with(Navigator::role)
    }

    /// **核心方法：导航与守卫**
    ///
    /// 策略拒绝时保持原状态并记录日志。
    pub fn navigate(&self, target: Screen) {
        self.navigator.update(|nav| {
            let from = nav.current();
            match nav.navigate(target) {
                Ok(()) => log::info!(
                    "[Router] {:?} -> {:?} (depth {})",
                    from,
                    target,
                    nav.depth()
                ),
                Err(e) => log::warn!("[Router] Access denied: {}", e),
            }
        });
    }

    /// 返回上一屏幕；栈为空时不做任何事
    pub fn go_back(&self) {
        self.navigator.update(|nav| match nav.go_back() {
            Some(screen) => log::info!("[Router] back to {:?} (depth {})", screen, nav.depth()),
            None => log::debug!("[Router] back ignored, history is empty"),
        });
    }

    /// 底部导航 / 侧边栏跳转，清空后退栈
    pub fn reset_to(&self, target: Screen) {
        self.navigator.update(|nav| match nav.reset_to(target) {
            Ok(()) => log::info!("[Router] tab -> {:?}", target),
            Err(e) => log::warn!("[Router] Access denied: {}", e),
        });
    }

    /// 登录成功后切换角色并跳到落地屏幕
    pub fn switch_role(&self, role: Role) {
        self.navigator.update(|nav| {
            let landing = nav.switch_role(role);
            log::info!("[Router] Role switched to {:?}, landing on {:?}", role, landing);
        });
    }

    /// 个人资料页切换用户/商家模式
    pub fn switch_mode(&self, role: Role) {
        self.navigator.update(|nav| {
            let landing = nav.switch_mode(role);
            log::info!("[Router] Mode switched to {:?}, landing on {:?}", role, landing);
        });
    }

    pub fn logout(&self) {
        self.navigator.update(|nav| {
            nav.logout();
            log::info!("[Router] Logged out, redirecting to login.");
        });
    }
}

/// 提供路由服务到 Context
fn provide_router(policy: TransitionPolicy) -> RouterService {
    let router = RouterService::new(policy);
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 屏幕跳转策略
    policy: TransitionPolicy,
    children: Children,
) -> impl IntoView {
    provide_router(policy);

    children()
}

/// 屏幕出口组件
///
/// 根据当前屏幕渲染对应的组件。
#[component]
pub fn ScreenOutlet(
    /// 匹配函数：接收当前屏幕，返回对应视图
    matcher: fn(Screen) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let current = Memo::new(move |_| router.current());

    move || matcher(current.get())
}
