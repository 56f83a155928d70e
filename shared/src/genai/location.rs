//! 地图检索结果的文本解析
//!
//! 模型以 `标签: 值` 的半结构化文本回答，多个地点之间用 `---` 分隔。

use std::sync::LazyLock;

use regex::Regex;

use crate::model::LocationInfo;

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^[ \t*\-]*(NAMA[_ ]TEMPAT|ALAMAT|KOTA|PROVINSI|KODE[_ ]POS|RT|RW)\**[ \t]*:[ \t]*\**[ \t]*(.*?)[ \t]*$",
    )
    .expect("location field pattern is valid")
});

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*-{3,}\s*$").expect("separator pattern is valid"));

/// 占位值视为空
fn clean(value: &str) -> String {
    let v = value.trim().trim_matches('*').trim();
    match v.to_lowercase().as_str() {
        "-" | "" | "n/a" | "tidak diketahui" | "tidak ada" => String::new(),
        _ => v.to_string(),
    }
}

fn parse_record(block: &str) -> Option<LocationInfo> {
    let mut info = LocationInfo::default();
    let mut matched = false;
    for caps in FIELD_RE.captures_iter(block) {
        let label = caps[1].to_uppercase().replace(' ', "_");
        let value = clean(&caps[2]);
        matched = true;
        let slot = match label.as_str() {
            "NAMA_TEMPAT" => &mut info.place_name,
            "ALAMAT" => &mut info.address,
            "KOTA" => &mut info.city,
            "PROVINSI" => &mut info.province,
            "KODE_POS" => &mut info.postal_code,
            "RT" => &mut info.rt,
            "RW" => &mut info.rw,
            _ => continue,
        };
        // 同一字段出现多次时保留第一次
        if slot.is_empty() {
            *slot = value;
        }
    }
    if !matched || (info.place_name.is_empty() && info.address.is_empty()) {
        return None;
    }
    Some(info)
}

/// 解析全部地点，没有可识别字段的段落被跳过
pub fn parse_locations(text: &str) -> Vec<LocationInfo> {
    SEPARATOR_RE
        .split(text)
        .filter_map(parse_record)
        .collect()
}

/// 按顺序为地点附上地图链接
pub fn attach_maps_uris(locations: &mut [LocationInfo], uris: &[String]) {
    for (info, uri) in locations.iter_mut().zip(uris) {
        info.maps_uri = Some(uri.clone());
    }
}

/// 反查坐标无法解析出地址时使用的占位地址
pub fn coordinate_fallback(lat: f64, lng: f64) -> String {
    format!("Koordinat: {}, {}", lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_record() {
        let text = "NAMA_TEMPAT: Gedung Sate\n\
                    ALAMAT: Jl. Diponegoro No.22\n\
                    KOTA: Bandung\n\
                    PROVINSI: Jawa Barat\n\
                    KODE_POS: 40115\n\
                    RT: -\n\
                    RW: 05";
        let locations = parse_locations(text);
        assert_eq!(locations.len(), 1);
        let loc = &locations[0];
        assert_eq!(loc.place_name, "Gedung Sate");
        assert_eq!(loc.address, "Jl. Diponegoro No.22");
        assert_eq!(loc.city, "Bandung");
        assert_eq!(loc.province, "Jawa Barat");
        assert_eq!(loc.postal_code, "40115");
        assert_eq!(loc.rt, "");
        assert_eq!(loc.rw, "05");
    }

    #[test]
    fn tolerates_markdown_and_spacing() {
        let text = "Berikut hasilnya:\n\
                    **NAMA_TEMPAT:** Monas\n\
                    - Alamat : Gambir\n\
                    * KOTA: Jakarta Pusat";
        let loc = &parse_locations(text)[0];
        assert_eq!(loc.place_name, "Monas");
        assert_eq!(loc.address, "Gambir");
        assert_eq!(loc.city, "Jakarta Pusat");
    }

    #[test]
    fn blank_field_does_not_swallow_next_line() {
        let text = "NAMA_TEMPAT: Rumah Budi\nALAMAT:\nKOTA: Bandung\nPROVINSI: Jawa Barat";
        let loc = &parse_locations(text)[0];
        assert_eq!(loc.place_name, "Rumah Budi");
        assert_eq!(loc.address, "");
        assert_eq!(loc.city, "Bandung");
        assert_eq!(loc.province, "Jawa Barat");
    }

    #[test]
    fn splits_records_on_separator() {
        let text = "NAMA_TEMPAT: A\nKOTA: X\n---\nNAMA_TEMPAT: B\nKOTA: Y\n---\nTidak ada lagi.";
        let names: Vec<String> = parse_locations(text)
            .into_iter()
            .map(|l| l.place_name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn unparsable_text_yields_nothing() {
        assert!(parse_locations("Maaf, saya tidak menemukan lokasi.").is_empty());
        assert!(parse_locations("KOTA: Bandung").is_empty());
    }

    #[test]
    fn maps_uris_are_attached_in_order() {
        let mut locations = parse_locations("NAMA_TEMPAT: A\n---\nNAMA_TEMPAT: B");
        attach_maps_uris(&mut locations, &["https://maps.google.com/?cid=1".to_string()]);
        assert_eq!(locations[0].maps_uri.as_deref(), Some("https://maps.google.com/?cid=1"));
        assert_eq!(locations[1].maps_uri, None);
    }

    #[test]
    fn fallback_formats_coordinates() {
        assert_eq!(coordinate_fallback(-6.2, 106.8), "Koordinat: -6.2, 106.8");
    }
}
