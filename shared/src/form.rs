//! 表单校验与输入整理
//!
//! 错误的 `Display` 文本即弹窗中显示给用户的提示。

use thiserror::Error;

use crate::date::{self, Timestamp};
use crate::model::{
    Address, AddressKind, DeliveryType, FeedItem, HistoryItem, LocationInfo, OrderStatus, Role,
    User,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Mohon lengkapi Label, Alamat Lengkap, dan Kota.")]
    MissingAddressFields,
    #[error("Coba: user@gmail.com / 123")]
    InvalidCredentials,
    #[error("Konfirmasi sandi tidak cocok.")]
    PasswordMismatch,
    #[error("Sandi tidak boleh kosong.")]
    EmptyPassword,
    #[error("Kode verifikasi harus 4 digit.")]
    InvalidVerificationCode,
    #[error("Pilih alamat pengiriman.")]
    MissingDeliveryAddress,
    #[error("Jumlah porsi tidak tersedia.")]
    InvalidPortion,
}

/// 只保留数字并截断到 `max` 位
pub fn digits_only(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// 手机号格式化为 `xxx-xxxx-xxxx`（不含国家码，最多 11 位数字）
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let len = digits.len();
    if len <= 3 {
        digits
    } else if len <= 7 {
        format!("{}-{}", &digits[..3], &digits[3..])
    } else {
        let end = len.min(11);
        format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..end])
    }
}

/// 存储的号码形如 `+62 812-3456-7890`，编辑时去掉国家码
pub fn local_phone(stored: &str) -> String {
    stored.replacen("+62", "", 1).trim().to_string()
}

pub fn international_phone(local: &str) -> String {
    format!("+62 {}", local)
}

// =========================================================
// 地址表单
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AddressForm {
    pub title: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub rt: String,
    pub rw: String,
    pub postal_code: String,
    pub full_address: String,
    pub notes: String,
    pub photo: Option<String>,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            country: "Indonesia".into(),
            province: String::new(),
            city: String::new(),
            rt: String::new(),
            rw: String::new(),
            postal_code: String::new(),
            full_address: String::new(),
            notes: String::new(),
            photo: None,
        }
    }
}

impl AddressForm {
    /// 由 GPS 反查结果预填
    pub fn from_gps(info: &LocationInfo) -> Self {
        Self {
            title: if info.place_name.is_empty() {
                "Lokasi GPS".into()
            } else {
                info.place_name.clone()
            },
            province: info.province.clone(),
            city: info.city.clone(),
            rt: digits_only(&info.rt, 3),
            rw: digits_only(&info.rw, 3),
            postal_code: digits_only(&info.postal_code, 5),
            full_address: info.address.clone(),
            ..Self::default()
        }
    }

    /// 由搜索结果预填，RT/RW 留空
    pub fn from_search(info: &LocationInfo) -> Self {
        Self {
            title: info.place_name.clone(),
            province: info.province.clone(),
            city: info.city.clone(),
            postal_code: digits_only(&info.postal_code, 5),
            full_address: info.address.clone(),
            ..Self::default()
        }
    }

    pub fn set_postal_code(&mut self, input: &str) {
        self.postal_code = digits_only(input, 5);
    }

    pub fn set_rt(&mut self, input: &str) {
        self.rt = digits_only(input, 3);
    }

    pub fn set_rw(&mut self, input: &str) {
        self.rw = digits_only(input, 3);
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.title) || blank(&self.full_address) || blank(&self.city) {
            return Err(FormError::MissingAddressFields);
        }
        Ok(())
    }

    /// `alamat, kota[, provinsi]`
    pub fn detailed_address(&self) -> String {
        let mut desc = format!("{}, {}", self.full_address.trim(), self.city.trim());
        if !self.province.trim().is_empty() {
            desc.push_str(", ");
            desc.push_str(self.province.trim());
        }
        desc
    }

    /// 校验并生成地址，收件人信息取自当前用户
    pub fn into_address(self, id: i64, user: &User) -> Result<Address, FormError> {
        self.validate()?;
        let desc = self.detailed_address();
        let notes = self.notes.trim();
        Ok(Address {
            id,
            title: self.title.trim().to_string(),
            desc,
            kind: AddressKind::Gps,
            receiver: if user.name.is_empty() {
                "User".into()
            } else {
                user.name.clone()
            },
            phone: user.phone.clone(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            photo: self.photo,
        })
    }
}

// =========================================================
// 登录 / 注册
// =========================================================

pub struct MockAccount {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
    pub role: Role,
}

pub const MOCK_ACCOUNTS: [MockAccount; 3] = [
    MockAccount {
        email: "user@gmail.com",
        password: "123",
        name: "Budi Santoso",
        role: Role::User,
    },
    MockAccount {
        email: "admin@gmail.com",
        password: "123",
        name: "System Admin",
        role: Role::Admin,
    },
    MockAccount {
        email: "mitra@gmail.com",
        password: "123",
        name: "Mitra Sukses",
        role: Role::Partner,
    },
];

/// 模拟登录，返回账号角色
pub fn authenticate(email: &str, password: &str) -> Result<Role, FormError> {
    MOCK_ACCOUNTS
        .iter()
        .find(|a| a.email == email.trim() && a.password == password)
        .map(|a| a.role)
        .ok_or(FormError::InvalidCredentials)
}

pub fn check_new_password(password: &str, confirm: &str) -> Result<(), FormError> {
    if password.is_empty() {
        return Err(FormError::EmptyPassword);
    }
    if password != confirm {
        return Err(FormError::PasswordMismatch);
    }
    Ok(())
}

/// 验证码为 4 位数字
pub fn check_verification_code(code: &str) -> Result<(), FormError> {
    if code.len() == 4 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FormError::InvalidVerificationCode)
    }
}

// =========================================================
// 预订
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub item: FeedItem,
    pub portions: u32,
    pub delivery: DeliveryType,
    pub address_id: Option<i64>,
}

impl ReservationDraft {
    pub fn new(item: FeedItem) -> Self {
        Self {
            delivery: item.delivery_type,
            item,
            portions: 1,
            address_id: None,
        }
    }

    /// 可预订的最大份数，数量无法解析时视为 1
    pub fn max_portions(&self) -> u32 {
        self.item
            .quantity
            .split_whitespace()
            .next()
            .and_then(|n| n.parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(1)
    }

    pub fn set_portions(&mut self, portions: u32) {
        self.portions = portions.clamp(1, self.max_portions());
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.portions == 0 || self.portions > self.max_portions() {
            return Err(FormError::InvalidPortion);
        }
        if self.delivery == DeliveryType::Delivery && self.address_id.is_none() {
            return Err(FormError::MissingDeliveryAddress);
        }
        Ok(())
    }

    /// 生成订单记录，状态为 Dikemas
    pub fn into_order(self, id: i64, now: Timestamp) -> Result<HistoryItem, FormError> {
        self.validate()?;
        let unit = self
            .item
            .quantity
            .split_whitespace()
            .nth(1)
            .unwrap_or("Porsi");
        Ok(HistoryItem {
            id,
            name: self.item.partner.clone(),
            item: format!("{} {} {}", self.portions, unit, self.item.food_name),
            date: date::short_date(now),
            price: "Gratis".into(),
            status: OrderStatus::Dikemas,
            delivery: self.delivery,
            img: self.item.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            name: "Budi Santoso".into(),
            phone: "+62 812-3456-7890".into(),
            ..User::default()
        }
    }

    fn feed_item(quantity: &str, delivery: DeliveryType) -> FeedItem {
        FeedItem {
            id: 4,
            partner: "Kopi Senja".into(),
            status: "Buka".into(),
            food_name: "Es Kopi Susu Gula Aren".into(),
            distance: "0.8 km".into(),
            time_left: "Hari ini, s/d 22:00".into(),
            quantity: quantity.into(),
            image: String::new(),
            avatar: String::new(),
            category: "Minuman".into(),
            delivery_type: delivery,
        }
    }

    #[test]
    fn phone_is_grouped_3_4_4() {
        assert_eq!(format_phone("81"), "81");
        assert_eq!(format_phone("8123"), "812-3");
        assert_eq!(format_phone("8123456"), "812-3456");
        assert_eq!(format_phone("81234567890"), "812-3456-7890");
        assert_eq!(format_phone("812-3456-78901234"), "812-3456-7890");
        assert_eq!(format_phone("abc812x3"), "812-3");
    }

    #[test]
    fn phone_country_code_round_trip() {
        assert_eq!(local_phone("+62 812-3456-7890"), "812-3456-7890");
        assert_eq!(international_phone("812-3456-7890"), "+62 812-3456-7890");
    }

    #[test]
    fn numeric_fields_are_sanitized() {
        let mut form = AddressForm::default();
        form.set_postal_code("12a3456");
        form.set_rt("0012");
        form.set_rw("x7");
        assert_eq!(form.postal_code, "12345");
        assert_eq!(form.rt, "001");
        assert_eq!(form.rw, "7");
    }

    #[test]
    fn address_requires_title_address_and_city() {
        let form = AddressForm {
            title: "Kos".into(),
            full_address: "Jl. Kenanga 3".into(),
            ..AddressForm::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Mohon lengkapi Label, Alamat Lengkap, dan Kota.");
    }

    #[test]
    fn address_description_and_receiver() {
        let form = AddressForm {
            title: "Kos".into(),
            full_address: "Jl. Kenanga 3".into(),
            city: "Bandung".into(),
            notes: "  ".into(),
            ..AddressForm::default()
        };
        let addr = form.clone().into_address(7, &user()).unwrap();
        assert_eq!(addr.desc, "Jl. Kenanga 3, Bandung");
        assert_eq!(addr.kind, AddressKind::Gps);
        assert_eq!(addr.receiver, "Budi Santoso");
        assert_eq!(addr.phone, "+62 812-3456-7890");
        assert_eq!(addr.notes, None);

        let with_province = AddressForm {
            province: "Jawa Barat".into(),
            ..form
        };
        assert_eq!(
            with_province.detailed_address(),
            "Jl. Kenanga 3, Bandung, Jawa Barat"
        );
    }

    #[test]
    fn gps_prefill_defaults_title() {
        let info = LocationInfo {
            address: "Jl. Asia Afrika".into(),
            city: "Bandung".into(),
            rt: "RT 02".into(),
            ..LocationInfo::default()
        };
        let form = AddressForm::from_gps(&info);
        assert_eq!(form.title, "Lokasi GPS");
        assert_eq!(form.rt, "02");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn mock_login() {
        assert_eq!(authenticate("mitra@gmail.com", "123"), Ok(Role::Partner));
        assert_eq!(authenticate(" admin@gmail.com ", "123"), Ok(Role::Admin));
        let err = authenticate("user@gmail.com", "salah").unwrap_err();
        assert_eq!(err.to_string(), "Coba: user@gmail.com / 123");
    }

    #[test]
    fn password_and_code_checks() {
        assert_eq!(check_new_password("abc", "abd"), Err(FormError::PasswordMismatch));
        assert_eq!(check_new_password("", ""), Err(FormError::EmptyPassword));
        assert!(check_new_password("abc", "abc").is_ok());
        assert!(check_verification_code("1234").is_ok());
        assert!(check_verification_code("12a4").is_err());
        assert!(check_verification_code("123").is_err());
    }

    #[test]
    fn delivery_reservation_needs_address() {
        let mut draft = ReservationDraft::new(feed_item("4 Cup", DeliveryType::Delivery));
        assert_eq!(draft.validate(), Err(FormError::MissingDeliveryAddress));
        draft.address_id = Some(1);
        draft.set_portions(9);
        assert_eq!(draft.portions, 4);

        let order = draft.into_order(500, Timestamp::new(1_730_106_300_000)).unwrap();
        assert_eq!(order.status, OrderStatus::Dikemas);
        assert_eq!(order.item, "4 Cup Es Kopi Susu Gula Aren");
        assert_eq!(order.date, "28 Okt 2024");
        assert_eq!(order.name, "Kopi Senja");
        assert_eq!(order.img, 4);
    }

    #[test]
    fn pickup_reservation_with_unparsable_quantity() {
        let mut draft = ReservationDraft::new(feed_item("banyak", DeliveryType::Pickup));
        assert_eq!(draft.max_portions(), 1);
        draft.set_portions(3);
        assert_eq!(draft.portions, 1);
        assert!(draft.validate().is_ok());
    }
}
