use crate::domain::model::{Applicant, Inventory};
use crate::utils::error::{Result, SeedError};
use chrono::{DateTime, FixedOffset, Timelike, Utc};

pub const EXPORT_FILENAME: &str = "applicants_list.csv";
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

const UTF8_BOM: &str = "\u{FEFF}";
const HEADER: [&str; 6] = ["Time", "Name", "Phone", "Address", "IsMember", "Seeds"];

/// 將申請紀錄匯出為 Excel 可直接開啟的 CSV（UTF-8 BOM、全欄位加引號）。
///
/// `applicants` 依傳入順序輸出；種子名稱以 `inventory` 對應，找不到時輸出 id。
pub fn export_applicants_csv(
    applicants: &[Applicant],
    inventory: &Inventory,
    utc_offset_hours: i32,
) -> Result<Vec<u8>> {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3600).ok_or_else(|| {
        SeedError::validation(format!("Invalid UTC offset: {} hours", utc_offset_hours))
    })?;

    // 標題列不加引號，資料列才用 QuoteStyle::Always
    let mut output = UTF8_BOM.as_bytes().to_vec();
    output.extend_from_slice(HEADER.join(",").as_bytes());
    output.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(output);

    for applicant in applicants {
        let seeds = inventory.seed_names(&applicant.selected_seeds).join("; ");
        writer.write_record([
            format_local_time(&applicant.timestamp, &offset),
            applicant.name.clone(),
            applicant.phone.clone(),
            applicant.address.replace("\r\n", " ").replace('\n', " "),
            membership_label(applicant.is_member).to_string(),
            seeds,
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| SeedError::IoError(e.into_error()))
}

pub fn membership_label(is_member: bool) -> &'static str {
    if is_member {
        "회원"
    } else {
        "비회원"
    }
}

/// 以韓國慣用格式輸出時間，例如 `2026. 1. 5. 오후 3:04:05`
pub fn format_local_time(timestamp: &DateTime<Utc>, offset: &FixedOffset) -> String {
    let local = timestamp.with_timezone(offset);
    let (is_pm, hour12) = local.hour12();
    format!(
        "{}. {}. {}. {} {}:{:02}:{:02}",
        local.format("%Y"),
        local.format("%-m"),
        local.format("%-d"),
        if is_pm { "오후" } else { "오전" },
        hour12,
        local.minute(),
        local.second()
    )
}
