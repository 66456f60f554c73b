use crate::core::SeedVariety;
use crate::utils::error::Result;
use std::io::Read;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 解析種子清單 CSV。
///
/// 第一列為標題，欄位依序為 id, family, name, quantity（不看標題名稱）。
/// 缺少 id 或品名的列會被略過；數量無法解析時以 0 計。
pub fn parse_seed_csv<R: Read>(reader: R) -> Result<Vec<SeedVariety>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seeds = Vec::new();
    let mut skipped = 0usize;

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = index + 2;

        let id = match record.get(0).and_then(|v| v.parse::<i64>().ok()) {
            Some(id) => id,
            None => {
                tracing::debug!("Skipping CSV line {}: missing or invalid id", line);
                skipped += 1;
                continue;
            }
        };

        let name = record.get(2).unwrap_or_default();
        if name.is_empty() {
            tracing::debug!("Skipping CSV line {}: missing name", line);
            skipped += 1;
            continue;
        }

        let quantity = match record.get(3).map(|v| v.parse::<u32>()) {
            Some(Ok(q)) => q,
            _ => {
                tracing::warn!(
                    "CSV line {}: quantity {:?} for seed {} is not a valid count, using 0",
                    line,
                    record.get(3).unwrap_or_default(),
                    id
                );
                0
            }
        };

        seeds.push(SeedVariety {
            id,
            family: record.get(1).unwrap_or_default().to_string(),
            name: name.to_string(),
            quantity,
        });
    }

    if skipped > 0 {
        tracing::info!("Parsed {} seeds from CSV, skipped {} rows", seeds.len(), skipped);
    }

    Ok(seeds)
}

/// 同 [`parse_seed_csv`]，但先去除 Excel 存檔常見的 UTF-8 BOM
pub fn parse_seed_csv_bytes(data: &[u8]) -> Result<Vec<SeedVariety>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    parse_seed_csv(data)
}
