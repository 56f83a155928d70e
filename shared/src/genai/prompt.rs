//! 提示词模板

use crate::model::DetectedItem;

pub fn quality_prompt(ingredients: &[String]) -> String {
    format!(
        "Analisis kualitas bahan surplus ini secara profesional.\n\
         Bahan: {}.\n\
         \n\
         Tugas Utama Anda:\n\
         1. Deteksi semua item spesifik secara visual atau dari teks.\n\
         2. Kelompokkan SETIAP item ke salah satu kategori eksklusif ini: 'Buah', 'Sayur', 'Protein', 'Karbohidrat', 'Olahan', 'Roti', 'Bumbu', atau 'Lainnya'.\n\
         3. IDENTIFIKASI ALERGEN: Cek apakah ada bahan yang mengandung Alergen Umum (Kacang, Seafood, Gluten/Gandum, Susu, Telur, Kedelai). Masukkan ke daftar 'allergens'.\n\
         4. Berikan skor kualitas (0-100%).\n\
         5. Prediksi sisa hari sebelum basi.\n\
         6. Berikan 3 TIPS PENYIMPANAN spesifik.\n\
         7. Estimasi Dampak Lingkungan (CO2 dalam kg, Air dalam Liter).\n\
         8. Berikan breakdown skor higienitas (skor 0-100).",
        ingredients.join(", ")
    )
}

pub fn recipes_prompt(items: &[DetectedItem], exclude_titles: &[String], iteration: u32) -> String {
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    let mut prompt = format!(
        "Cari 5 resep Cookpad Indonesia dari bahan: {}. Iterasi: {}. Berikan sourceUrl valid.",
        names.join(", "),
        iteration
    );
    if !exclude_titles.is_empty() {
        prompt.push_str(&format!(
            " Jangan ulangi resep berikut: {}.",
            exclude_titles.join(", ")
        ));
    }
    prompt.push_str(" Jawab hanya dengan JSON {\"recipes\": [...]}.");
    prompt
}

/// 位置字段说明，每个结果一段
const LOCATION_FORMAT: &str = "NAMA_TEMPAT: <nama tempat>\n\
     ALAMAT: <jalan dan nomor>\n\
     KOTA: <kota/kabupaten>\n\
     PROVINSI: <provinsi>\n\
     KODE_POS: <5 digit>\n\
     RT: <angka>\n\
     RW: <angka>";

pub fn coords_prompt(lat: f64, lng: f64) -> String {
    format!(
        "Tentukan alamat lengkap di Indonesia untuk koordinat {}, {}. \
         Jawab hanya dengan format berikut, isi '-' jika tidak diketahui:\n{}",
        lat, lng, LOCATION_FORMAT
    )
}

pub fn place_query_prompt(query: &str) -> String {
    format!(
        "Cari hingga 5 tempat di Indonesia yang cocok dengan \"{}\". \
         Untuk setiap tempat gunakan format berikut, isi '-' jika tidak diketahui, \
         dan pisahkan setiap tempat dengan baris ---:\n{}",
        query.trim(),
        LOCATION_FORMAT
    )
}

pub fn impact_prompt(food_name: &str, quantity: &str) -> String {
    format!(
        "Estimasi dampak menyelamatkan {} {} dari pembuangan: CO2 yang dicegah (kg), \
         uang yang dihemat (Rupiah, format 'Rp 15.000'), metana yang dicegah (kg), \
         dan ringkasan nutrisi satu kalimat.",
        quantity.trim(),
        food_name.trim()
    )
}

pub fn metadata_prompt(description: &str) -> String {
    format!(
        "{}. Tentukan kategori produk makanan ini dan daftar bahan utamanya sebagai tags.",
        description.trim()
    )
}
