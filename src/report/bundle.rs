// ==========================================
// 经销商配件报表引擎 - 合并打包
// ==========================================
// 职责: 报表仓库 → 按 (类型, 品牌, 经销商) 分组的合并工作簿 ZIP
// 红线: 键按 "_" 切分,前三段为分组键,剩余段拼回网点名;
//       品牌/经销商含下划线会破坏分组(键格式的隐含约束)
// ==========================================

use crate::domain::DataTable;
use crate::report::error::ExportResult;
use crate::report::store::ReportStore;
use crate::report::workbook::WorkbookWriter;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use tracing::{debug, warn};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// 合并包的建议下载名
pub const COMBINED_BUNDLE_NAME: &str = "Combined_Dealerwise_Reports.zip";

/// 生成合并打包
///
/// 每组一个单工作表工作簿 `{类型}_{品牌}_{经销商}.xlsx`,
/// 内容为该组全部主表的纵向合并(缺 Location 列的表按键里的网点段补上)。
/// 仓库里没有可分组报表时返回 None。
pub fn build_combined_bundle(store: &ReportStore) -> ExportResult<Option<Vec<u8>>> {
    let mut groups: BTreeMap<(String, String, String), Vec<DataTable>> = BTreeMap::new();

    for (key, report) in store.iter() {
        let parts: Vec<&str> = key.split('_').collect();
        if parts.len() < 4 {
            warn!(key = %key, "报表键段数不足,跳过打包");
            continue;
        }
        let group_key = (
            parts[0].to_string(),
            parts[1].to_string(),
            parts[2].to_string(),
        );
        let location_part = parts[3..].join("_");

        let mut table = report.primary_table().clone();
        if !table.has_column("Location") {
            table.append_constant_column("Location", &location_part);
        }
        groups.entry(group_key).or_default().push(table);
    }

    if groups.is_empty() {
        return Ok(None);
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for ((report_type, brand, dealer), tables) in &groups {
        let combined = DataTable::concat_union(tables);
        debug!(
            report_type = %report_type,
            brand = %brand,
            dealer = %dealer,
            rows = combined.len(),
            "写入合并工作簿"
        );
        let workbook = WorkbookWriter::write_sheets(&[("Sheet1", &combined)])?;
        zip.start_file(format!("{report_type}_{brand}_{dealer}.xlsx"), options)?;
        zip.write_all(&workbook)?;
    }

    let cursor = zip.finish()?;
    Ok(Some(cursor.into_inner()))
}
