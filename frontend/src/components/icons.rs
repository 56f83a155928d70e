//! 内联 SVG 图标（Lucide 线条风格）
//!
//! 尺寸和颜色由调用方通过 `attr:class` 传入。

use leptos::prelude::*;

macro_rules! icon {
    ($name:ident, $($d:literal),+ $(,)?) => {
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    $(<path d=$d />)+
                </svg>
            }
        }
    };
}

// 导航
icon!(Home, "M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 22V12h6v10");
icon!(User, "M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2", "M12 3a4 4 0 1 0 0 8a4 4 0 1 0 0-8");
icon!(Users, "M17 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2", "M9 3a4 4 0 1 0 0 8a4 4 0 1 0 0-8", "M23 21v-2a4 4 0 0 0-3-3.87", "M16 3.13a4 4 0 0 1 0 7.75");
icon!(Store, "M3 9l1-5h16l1 5", "M4 9v11h16V9", "M9 20v-6h6v6", "M3 9a3 3 0 0 0 6 0a3 3 0 0 0 6 0a3 3 0 0 0 6 0");
icon!(Truck, "M1 3h15v13H1z", "M16 8h4l3 3v5h-7z", "M5.5 16a2.5 2.5 0 1 0 0 5a2.5 2.5 0 1 0 0-5", "M18.5 16a2.5 2.5 0 1 0 0 5a2.5 2.5 0 1 0 0-5");
icon!(ChevronLeft, "M15 18l-6-6 6-6");
icon!(ChevronRight, "M9 18l6-6-6-6");
icon!(LayoutDashboard, "M3 3h7v9H3z", "M14 3h7v5h-7z", "M14 12h7v9h-7z", "M3 16h7v5H3z");
icon!(Settings, "M12 9a3 3 0 1 0 0 6a3 3 0 1 0 0-6", "M19.4 15a1.65 1.65 0 0 0 .33 1.82l.06.06a2 2 0 1 1-2.83 2.83l-.06-.06a1.65 1.65 0 0 0-2.9 1.17V21a2 2 0 1 1-4 0v-.09a1.65 1.65 0 0 0-2.9-1.17l-.06.06a2 2 0 1 1-2.83-2.83l.06-.06a1.65 1.65 0 0 0-1.17-2.9H3a2 2 0 1 1 0-4h.09a1.65 1.65 0 0 0 1.17-2.9l-.06-.06a2 2 0 1 1 2.83-2.83l.06.06a1.65 1.65 0 0 0 2.9-1.17V3a2 2 0 1 1 4 0v.09a1.65 1.65 0 0 0 2.9 1.17l.06-.06a2 2 0 1 1 2.83 2.83l-.06.06a1.65 1.65 0 0 0 1.17 2.9H21a2 2 0 1 1 0 4h-.09a1.65 1.65 0 0 0-1.51 1z");
icon!(LogOut, "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4", "M16 17l5-5-5-5", "M21 12H9");

// 状态
icon!(CheckCircle, "M22 11.08V12a10 10 0 1 1-5.93-9.14", "M22 4L12 14.01l-3-3");
icon!(AlertTriangle, "M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z", "M12 9v4", "M12 17h.01");
icon!(ShieldCheck, "M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z", "M9 12l2 2 4-4");
icon!(Loader, "M21 12a9 9 0 1 1-6.22-8.56");
icon!(Clock, "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20", "M12 6v6l4 2");
icon!(Bell, "M18 8A6 6 0 0 0 6 8c0 7-3 9-3 9h18s-3-2-3-9", "M13.73 21a2 2 0 0 1-3.46 0");
icon!(TrendingUp, "M23 6l-9.5 9.5-5-5L1 18", "M17 6h6v6");

// 操作
icon!(Search, "M11 3a8 8 0 1 0 0 16a8 8 0 1 0 0-16", "M21 21l-4.35-4.35");
icon!(X, "M18 6L6 18", "M6 6l12 12");
icon!(Plus, "M12 5v14", "M5 12h14");
icon!(Minus, "M5 12h14");
icon!(Trash, "M3 6h18", "M19 6l-1 14a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2L5 6", "M10 11v6", "M14 11v6", "M9 6V4a1 1 0 0 1 1-1h4a1 1 0 0 1 1 1v2");
icon!(Edit, "M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7", "M18.5 2.5a2.12 2.12 0 0 1 3 3L12 15l-4 1 1-4z");
icon!(Camera, "M23 19a2 2 0 0 1-2 2H3a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h4l2-3h6l2 3h4a2 2 0 0 1 2 2z", "M12 9a4 4 0 1 0 0 8a4 4 0 1 0 0-8");
icon!(UploadCloud, "M16 16l-4-4-4 4", "M12 12v9", "M20.39 18.39A5 5 0 0 0 18 9h-1.26A8 8 0 1 0 3 16.3");
icon!(ExternalLink, "M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6", "M15 3h6v6", "M10 14L21 3");
icon!(Bookmark, "M19 21l-7-5-7 5V5a2 2 0 0 1 2-2h10a2 2 0 0 1 2 2z");
icon!(Heart, "M20.84 4.61a5.5 5.5 0 0 0-7.78 0L12 5.67l-1.06-1.06a5.5 5.5 0 0 0-7.78 7.78l1.06 1.06L12 21.23l7.78-7.78 1.06-1.06a5.5 5.5 0 0 0 0-7.78z");
icon!(Key, "M21 2l-2 2", "M15.5 7.5l3 3L22 7l-3-3", "M11.39 11.61a5.5 5.5 0 1 1-7.78 7.78a5.5 5.5 0 0 1 7.78-7.78z", "M11.39 11.61L15.5 7.5");
icon!(Lock, "M5 11h14v11H5z", "M7 11V7a5 5 0 0 1 10 0v4");
icon!(Sun, "M12 7a5 5 0 1 0 0 10a5 5 0 1 0 0-10", "M12 1v2", "M12 21v2", "M4.22 4.22l1.42 1.42", "M18.36 18.36l1.42 1.42", "M1 12h2", "M21 12h2", "M4.22 19.78l1.42-1.42", "M18.36 5.64l1.42-1.42");
icon!(Moon, "M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z");
icon!(HelpCircle, "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20", "M9.09 9a3 3 0 0 1 5.83 1c0 2-3 3-3 3", "M12 17h.01");
icon!(History, "M3 3v5h5", "M3.05 13A9 9 0 1 0 6 5.3L3 8", "M12 7v5l4 2");
icon!(FileText, "M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z", "M14 2v6h6", "M16 13H8", "M16 17H8");
icon!(Flag, "M4 15s1-1 4-1 5 2 8 2 4-1 4-1V3s-1 1-4 1-5-2-8-2-4 1-4 1z", "M4 22v-7");
icon!(Package, "M21 16V8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16z", "M3.27 6.96L12 12.01l8.73-5.05", "M12 22.08V12");

// 位置
icon!(MapPin, "M21 10c0 7-9 13-9 13s-9-6-9-13a9 9 0 0 1 18 0z", "M12 7a3 3 0 1 0 0 6a3 3 0 1 0 0-6");
icon!(Navigation, "M3 11l19-9-9 19-2-8-8-2z");

// 食物
icon!(Leaf, "M11 20A7 7 0 0 1 9.8 6.1C15.5 5 17 4.48 19 2c1 2 2 4.18 2 8 0 5.5-4.78 10-10 10z", "M2 21c0-3 1.85-5.36 5.08-6");
icon!(Sparkles, "M12 3l1.9 5.8L20 11l-6.1 2.2L12 19l-1.9-5.8L4 11l6.1-2.2z");
icon!(ChefHat, "M6 13.87A4 4 0 0 1 7.41 6a5.11 5.11 0 0 1 9.18 0A4 4 0 0 1 18 13.87V21H6z", "M6 17h12");
icon!(Droplets, "M12 2.69l5.66 5.66a8 8 0 1 1-11.31 0z");
icon!(Zap, "M13 2L3 14h9l-1 8 10-12h-9l1-8z");
