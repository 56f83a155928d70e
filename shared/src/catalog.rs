//! 演示数据
//!
//! 首页商品流、合作商户和管理后台使用的固定数据。

use crate::model::{DeliveryType, FeedItem};
use crate::scoring::{CATEGORY_ALL, CATEGORY_SAVED};

/// 首页分类标签
pub const FEED_CATEGORIES: [&str; 6] = [
    CATEGORY_ALL,
    CATEGORY_SAVED,
    "Roti & Kue",
    "Makanan Berat",
    "Sayur & Buah",
    "Minuman",
];

/// 上传商品时可选的分类
pub const PRODUCT_CATEGORIES: [&str; 4] = ["Makanan Berat", "Minuman", "Roti & Kue", "Buah & Sayur"];

pub fn food_feed() -> Vec<FeedItem> {
    let entry = |id: u32,
                 partner: &str,
                 food_name: &str,
                 distance: &str,
                 time_left: &str,
                 quantity: &str,
                 category: &str,
                 delivery_type| FeedItem {
        id,
        partner: partner.into(),
        status: "Buka".into(),
        food_name: food_name.into(),
        distance: distance.into(),
        time_left: time_left.into(),
        quantity: quantity.into(),
        image: format!("https://picsum.photos/400/200?random={}", 100 + id),
        avatar: format!("https://picsum.photos/100/100?random={}", id),
        category: category.into(),
        delivery_type,
    };

    vec![
        entry(1, "Bakery Pagi Sore", "Roti Manis & Donat Sisa Produksi", "0.5 km", "Hari ini, s/d 21:00", "5 Paket", "Roti & Kue", DeliveryType::Pickup),
        entry(2, "Restoran Padang Murah", "Nasi Lauk Campur (Layak Makan)", "1.2 km", "Hari ini, s/d 17:00", "2 Porsi", "Makanan Berat", DeliveryType::Delivery),
        entry(3, "Toko Buah Segar Jaya", "Paket Buah Potong & Jus", "2.0 km", "Hari ini, s/d 19:00", "8 Paket", "Sayur & Buah", DeliveryType::Pickup),
        entry(4, "Kopi Senja", "Es Kopi Susu Gula Aren", "0.8 km", "Hari ini, s/d 22:00", "4 Cup", "Minuman", DeliveryType::Delivery),
    ]
}

pub fn find_feed_item(id: u32) -> Option<FeedItem> {
    food_feed().into_iter().find(|item| item.id == id)
}

/// 订单列表中的商家图片
pub fn order_image(img: u32) -> String {
    format!("https://picsum.photos/100/100?random={}", img)
}

/// 按食物名称或商家名称搜索
pub fn search_feed<'a>(items: &'a [FeedItem], query: &str) -> Vec<&'a FeedItem> {
    let query = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            query.is_empty()
                || item.food_name.to_lowercase().contains(&query)
                || item.partner.to_lowercase().contains(&query)
                || item.category.to_lowercase().contains(&query)
        })
        .collect()
}

// =========================================================
// 合作商户
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
    pub trend: &'static str,
}

pub const PARTNER_METRICS: [Metric; 4] = [
    Metric { label: "Penjualan Bulan Ini", value: "Rp 25.000.000", trend: "+12%" },
    Metric { label: "Total Pesanan", value: "1,240", trend: "+5%" },
    Metric { label: "Produk Terjual", value: "850", trend: "+8%" },
    Metric { label: "Pelanggan Baru", value: "320", trend: "+15%" },
];

/// 近 12 个月的库存水平（百分比）
pub const STOCK_LEVELS: [u32; 12] = [40, 65, 45, 80, 55, 90, 30, 70, 50, 60, 45, 85];

pub const INVENTORY_CATEGORIES: [&str; 5] =
    ["Semua", "Buah & Sayur", "Roti & Pastri", "Makanan Olahan", "Minuman"];

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryProduct {
    pub id: u32,
    pub name: &'static str,
    pub price: &'static str,
    pub stock_percent: u32,
    pub category: &'static str,
    pub image: &'static str,
}

impl InventoryProduct {
    pub fn is_low_stock(&self) -> bool {
        self.stock_percent < 20
    }
}

pub const INVENTORY: [InventoryProduct; 4] = [
    InventoryProduct { id: 1, name: "Apel Organik Segar", price: "Rp 25.000", stock_percent: 75, category: "Buah & Sayur", image: "https://picsum.photos/seed/apple/200/200" },
    InventoryProduct { id: 2, name: "Roti Gandum Utuh", price: "Rp 32.000", stock_percent: 30, category: "Roti & Pastri", image: "https://picsum.photos/seed/bread/200/200" },
    InventoryProduct { id: 3, name: "Susu Segar Murni", price: "Rp 48.000", stock_percent: 90, category: "Minuman", image: "https://picsum.photos/seed/milk/200/200" },
    InventoryProduct { id: 4, name: "Yoghurt Rendah Lemak", price: "Rp 18.000", stock_percent: 15, category: "Makanan Olahan", image: "https://picsum.photos/seed/yoghurt/200/200" },
];

pub fn filter_inventory(category: &str) -> Vec<&'static InventoryProduct> {
    INVENTORY
        .iter()
        .filter(|p| category == CATEGORY_ALL || p.category == category)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Selesai,
    Gagal,
    Tertunda,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Selesai => "Selesai",
            TransactionStatus::Gagal => "Gagal",
            TransactionStatus::Tertunda => "Tertunda",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub name: &'static str,
    pub date: &'static str,
    pub amount: &'static str,
    pub status: TransactionStatus,
    pub img: u32,
}

pub const TRANSACTIONS: [Transaction; 5] = [
    Transaction { name: "Budi Santoso", date: "28 Juli 2024", amount: "+Rp 150.000", status: TransactionStatus::Selesai, img: 12 },
    Transaction { name: "Dewi Lestari", date: "25 Juli 2024", amount: "-Rp 120.000", status: TransactionStatus::Gagal, img: 13 },
    Transaction { name: "Ahmad Fauzi", date: "24 Juli 2024", amount: "+Rp 500.000", status: TransactionStatus::Selesai, img: 14 },
    Transaction { name: "Rina Wijaya", date: "23 Juli 2024", amount: "-Rp 90.000", status: TransactionStatus::Tertunda, img: 15 },
    Transaction { name: "Hadi Prasetyo", date: "22 Juli 2024", amount: "+Rp 300.000", status: TransactionStatus::Selesai, img: 16 },
];

// =========================================================
// 管理后台
// =========================================================

pub const ADMIN_STATS: [Metric; 4] = [
    Metric { label: "Total Pengguna", value: "12.345", trend: "Naik 5.2% bulan lalu" },
    Metric { label: "Total Mitra", value: "1.890", trend: "Turun 1.1% bulan lalu" },
    Metric { label: "Total Produk", value: "567", trend: "Baru 23 bulan ini" },
    Metric { label: "Laporan Negatif", value: "42", trend: "10 belum diselesaikan" },
];

/// (pesan, waktu)
pub const ACTIVITY_LOG: [(&str, &str); 5] = [
    ("Pengguna baru \"John Doe\" terdaftar.", "2 menit yang lalu"),
    ("Produk \"Smartwatch X\" diperbarui.", "1 jam yang lalu"),
    ("Laporan negatif #00123 diselesaikan.", "3 jam yang lalu"),
    ("Login gagal dari IP 192.168.1.100.", "Kemarin"),
    ("Pengaturan sistem diperbarui oleh Admin.", "2 hari yang lalu"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub name: &'static str,
    pub email: &'static str,
    pub role: &'static str,
    pub status: &'static str,
    pub last_active: &'static str,
    pub joined: &'static str,
}

pub const ADMIN_USERS: [AdminUser; 6] = [
    AdminUser { name: "Aditya Pratama", email: "aditya.pratama@example.com", role: "Admin", status: "Aktif", last_active: "3 jam yang lalu", joined: "10 Mei 2023" },
    AdminUser { name: "Budi Santoso", email: "budi.santoso@example.com", role: "Mitra", status: "Tertunda", last_active: "1 hari yang lalu", joined: "15 April 2024" },
    AdminUser { name: "Citra Dewi", email: "citra.dewi@example.com", role: "Member", status: "Aktif", last_active: "2 jam yang lalu", joined: "22 Maret 2023" },
    AdminUser { name: "Doni Firmansyah", email: "doni.firmansyah@example.com", role: "Editor", status: "Tidak Aktif", last_active: "5 hari yang lalu", joined: "01 Januari 2024" },
    AdminUser { name: "Eka Wijaya", email: "eka.wijaya@example.com", role: "Member", status: "Aktif", last_active: "1 jam yang lalu", joined: "05 Februari 2023" },
    AdminUser { name: "Fitriani Lestari", email: "fitriani.lestari@example.com", role: "Mitra", status: "Ditangguhkan", last_active: "2 hari yang lalu", joined: "18 Juni 2023" },
];

pub fn search_admin_users(query: &str) -> Vec<&'static AdminUser> {
    let query = query.trim().to_lowercase();
    ADMIN_USERS
        .iter()
        .filter(|u| {
            query.is_empty()
                || u.name.to_lowercase().contains(&query)
                || u.email.to_lowercase().contains(&query)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminReport {
    pub id: &'static str,
    pub subject: &'static str,
    pub kind: &'static str,
    pub sender: &'static str,
    pub status: &'static str,
    pub date: &'static str,
}

pub const ADMIN_REPORTS: [AdminReport; 5] = [
    AdminReport { id: "1001", subject: "Produk Cacat: Headphone tidak...", kind: "Product Issue", sender: "Rina Wijaya", status: "Tertunda", date: "2023-10-26" },
    AdminReport { id: "1002", subject: "Perilaku tidak pantas pengguna...", kind: "User Misconduct", sender: "Budi Santoso", status: "Dalam Peninjauan", date: "2023-10-25" },
    AdminReport { id: "1003", subject: "Bug: Fitur pencarian tidak mu...", kind: "Service Bug", sender: "Siti Aminah", status: "Terselesaikan", date: "2023-10-24" },
    AdminReport { id: "1004", subject: "Spam berulang dari akun \"Promo...\"", kind: "Spam", sender: "David Pratama", status: "Diteruskan", date: "2023-10-23" },
    AdminReport { id: "1005", subject: "Konten tidak layak pada ulasan...", kind: "Content Violation", sender: "Maya Sari", status: "Tertunda", date: "2023-10-22" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct AdminProduct {
    pub name: &'static str,
    pub category: &'static str,
    pub price: &'static str,
    pub stock: u32,
    pub active: bool,
}

pub const ADMIN_PRODUCTS: [AdminProduct; 5] = [
    AdminProduct { name: "Kopi Susu Premium", category: "Minuman", price: "Rp 25.000,00", stock: 150, active: true },
    AdminProduct { name: "Roti Gandum Utuh", category: "Makanan", price: "Rp 18.000,00", stock: 80, active: true },
    AdminProduct { name: "Pasta Carbonara Instan", category: "Makanan", price: "Rp 35.000,00", stock: 200, active: true },
    AdminProduct { name: "Teh Herbal Detoks", category: "Minuman", price: "Rp 20.000,00", stock: 120, active: false },
    AdminProduct { name: "Donat Manis Aneka Rasa", category: "Makanan Ringan", price: "Rp 10.000,00", stock: 90, active: true },
];

pub fn search_admin_products(query: &str) -> Vec<&'static AdminProduct> {
    let query = query.trim().to_lowercase();
    ADMIN_PRODUCTS
        .iter()
        .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
        .collect()
}

/// (名称, 邮箱, 角色, 添加日期)
pub const ADMINISTRATORS: [(&str, &str, &str, &str); 5] = [
    ("Budi Santoso", "budi.santoso@example.com", "Administrator Utama", "2023-01-15"),
    ("Siti Aminah", "siti.aminah@example.com", "Moderator Konten", "2023-03-01"),
    ("Joko Susilo", "joko.susilo@example.com", "Analis Laporan", "2023-04-20"),
    ("Rina Wijaya", "rina.wijaya@example.com", "Administrator Utama", "2023-06-10"),
    ("Agus Salim", "agus.salim@example.com", "Analis Laporan", "2023-07-25"),
];

pub const ADMIN_ROLES: [&str; 3] = ["Administrator Utama", "Moderator Konten", "Analis Laporan"];

pub fn search_admin_reports(query: &str) -> Vec<&'static AdminReport> {
    let query = query.trim().to_lowercase();
    ADMIN_REPORTS
        .iter()
        .filter(|r| {
            query.is_empty()
                || r.subject.to_lowercase().contains(&query)
                || r.sender.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::rank_feed;

    #[test]
    fn feed_ranking_puts_nearby_scarce_items_first() {
        let feed = food_feed();
        let ranked = rank_feed(&feed);
        let ids: Vec<u32> = ranked.iter().map(|s| s.item.id).collect();
        // 0.5 km -> 50, 0.8 km -> 50, 1.2 km + 2 Porsi -> 45, 2.0 km -> 30
        assert_eq!(ids, vec![1, 4, 2, 3]);
        assert!(ranked.iter().all(|s| s.is_best_match()));
    }

    #[test]
    fn search_matches_partner_and_food() {
        let feed = food_feed();
        assert_eq!(search_feed(&feed, "kopi").len(), 1);
        assert_eq!(search_feed(&feed, "PADANG")[0].id, 2);
        assert_eq!(search_feed(&feed, "").len(), 4);
    }

    #[test]
    fn inventory_filter_and_low_stock() {
        assert_eq!(filter_inventory("Semua").len(), 4);
        let drinks = filter_inventory("Minuman");
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].name, "Susu Segar Murni");
        assert!(INVENTORY[3].is_low_stock());
        assert!(!INVENTORY[0].is_low_stock());
    }

    #[test]
    fn admin_user_search() {
        assert_eq!(search_admin_users("lestari").len(), 1);
        assert_eq!(search_admin_users("example.com").len(), 6);
    }

    #[test]
    fn admin_product_and_report_search() {
        assert_eq!(search_admin_products("roti").len(), 1);
        assert_eq!(search_admin_products("").len(), 5);
        assert_eq!(search_admin_reports("budi")[0].id, "1002");
        assert_eq!(search_admin_reports("spam").len(), 1);
    }
}
