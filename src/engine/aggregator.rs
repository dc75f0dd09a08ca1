// ==========================================
// 经销商配件报表引擎 - 汇总引擎
// ==========================================
// 职责: 按种类合并 → 日期窗口过滤 → 派生字段 → 三类报表
// 红线: 无文件 I/O;窗口边界含当天(today - N 天当天保留)
// ==========================================

use crate::domain::record_kind::{BRAND_COLUMN, DEALER_COLUMN, LOCATION_COLUMN, SOURCE_FILE_COLUMN};
use crate::domain::report::{
    OEM_FLAGGED_COLUMNS, PENDING_REPORT_COLUMNS, UNIFIED_OEM_COLUMNS,
};
use crate::domain::{DataTable, Report, ReportKind};
use crate::engine::accumulator::LocationAccumulator;
use crate::importer::data_cleaner::DataCleaner;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use tracing::{debug, warn};

/// 订单积压保留窗口(天)
pub const BACKLOG_WINDOW_DAYS: i64 = 90;

/// 收货明细保留窗口(天)
pub const RECEIVING_WINDOW_DAYS: i64 = 60;

/// transit 求和的六个数量列(注意不含 PROCESSING_SHIPPEO)
const TRANSIT_COLUMNS: &[&str] = &[
    "B/O",
    "PROCESSING_ALLOCATION",
    "PROCESSING_ON-PICK",
    "PROCESSING_ON-PACK",
    "PROCESSING_PACKED",
    "PROCESSING_INVOICE",
];

/// OEM 统一表的日期展示格式(DD Mon YYYY)
const OEM_DATE_FORMAT: &str = "%d %b %Y";

// ==========================================
// Remark 判定
// ==========================================

/// 订单积压行的复核标记
///
/// | transit | 对账一致 | Remark      |
/// |---------|---------|-------------|
/// | = 0     | 是      | Ok          |
/// | > 0     | 否      | Ok          |
/// | = 0     | 否      | Pls Check   |
/// | > 0     | 是      | 无          |
pub fn classify_remark(transit: f64, reconciled: bool) -> Option<&'static str> {
    if transit == 0.0 && reconciled {
        Some("Ok")
    } else if transit > 0.0 && !reconciled {
        Some("Ok")
    } else if transit == 0.0 && !reconciled {
        Some("Pls Check")
    } else {
        None
    }
}

// ==========================================
// 统一 OEM 行(中间结构)
// ==========================================
// Remark 语义分叉: 积压行为复核分类,收货行为源文件名
// (历史格式如此,下游两种含义都在用,这里原样保留)
#[derive(Debug, Clone)]
struct UnifiedRow {
    brand: String,
    dealer: String,
    location: String,
    order_number: String,
    part_number: String,
    order_date: NaiveDate,
    po_qty: String,
    remark: Option<String>,
}

// ==========================================
// Aggregator - 汇总引擎
// ==========================================
pub struct Aggregator {
    today: NaiveDate, // 窗口基准日,测试可注入
}

impl Aggregator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// 统一 OEM 报表(双工作表)
    ///
    /// 三个来源任一有文件即生成(过滤后可为空表):
    /// 积压(90 天窗)+ 收货待入明细、当日收货明细(各 60 天窗)
    pub fn build_oem_report(&self, acc: &LocationAccumulator) -> Option<Report> {
        let has_source = !acc.order_backlog.is_empty()
            || !acc.receiving_pending_detail.is_empty()
            || !acc.receiving_today_detail.is_empty();
        if !has_source {
            return None;
        }

        let mut rows = Vec::new();
        rows.extend(self.backlog_rows(&acc.order_backlog));
        rows.extend(self.receiving_rows(&acc.receiving_pending_detail));
        rows.extend(self.receiving_rows(&acc.receiving_today_detail));

        let full = unified_table(&rows);
        let flagged = flagged_extract(&rows);
        debug!(rows = full.len(), flagged = flagged.len(), "生成 OEM 统一表");
        Some(Report::two_sheet(ReportKind::Oem, flagged, full))
    }

    /// Stock 报表: 各文件五列表直接纵向合并,不再加工
    pub fn build_stock_report(&self, acc: &LocationAccumulator) -> Option<Report> {
        if acc.stock.is_empty() {
            return None;
        }
        let merged = DataTable::concat_union(&acc.stock);
        Some(Report::single(ReportKind::Stock, merged))
    }

    /// Pending 报表: 调拨明细选列重命名
    ///
    /// 调拨明细无必需列契约;源列缺失时本报表直接缺省(告警,不记校验错误)
    pub fn build_pending_report(&self, acc: &LocationAccumulator) -> Option<Report> {
        if acc.transfer_detail.is_empty() {
            return None;
        }
        let merged = DataTable::concat_union(&acc.transfer_detail);
        let selected = merged.select(&[
            (BRAND_COLUMN, "Brand"),
            (DEALER_COLUMN, "Dealer"),
            (LOCATION_COLUMN, "Location"),
            ("PART NO ?", "PartNumber"),
            ("QUANTITY", "Qty"),
        ]);
        let Some(mut table) = selected else {
            warn!("调拨明细缺少 PART NO ?/QUANTITY 列,跳过 Pending 报表");
            return None;
        };
        table.map_column("PartNumber", |v| DataCleaner::clean_part_number(v));
        debug_assert_eq!(table.columns(), PENDING_REPORT_COLUMNS);
        Some(Report::single(ReportKind::Pending, table))
    }

    /// 积压行: 90 天窗口 + transit / 对账 / Remark 派生
    fn backlog_rows(&self, tables: &[DataTable]) -> Vec<UnifiedRow> {
        if tables.is_empty() {
            return Vec::new();
        }
        let merged = DataTable::concat_union(tables);
        let cutoff = self.today - Duration::days(BACKLOG_WINDOW_DAYS);

        let mut rows = Vec::new();
        for idx in 0..merged.len() {
            // 日期不可解析的行移出窗口,不报错
            let Some(date) = merged
                .cell(idx, "PO DATE")
                .and_then(DataCleaner::parse_date)
            else {
                continue;
            };
            if date < cutoff {
                continue;
            }

            let transit: f64 = TRANSIT_COLUMNS
                .iter()
                .map(|c| DataCleaner::to_num(merged.cell(idx, c).unwrap_or("")))
                .sum();
            let current = DataCleaner::to_num(merged.cell(idx, "QUANTITY_CURRENT").unwrap_or(""));
            let shipped = DataCleaner::to_num(merged.cell(idx, "PROCESSING_SHIPPEO").unwrap_or(""));
            let reconciled = current == shipped;

            rows.push(UnifiedRow {
                brand: merged.cell(idx, BRAND_COLUMN).unwrap_or("").to_string(),
                dealer: merged.cell(idx, DEALER_COLUMN).unwrap_or("").to_string(),
                location: merged.cell(idx, LOCATION_COLUMN).unwrap_or("").to_string(),
                order_number: merged.cell(idx, "ORDER NO").unwrap_or("").to_string(),
                part_number: merged.cell(idx, "PART NO_CURRENT").unwrap_or("").to_string(),
                order_date: date,
                po_qty: DataCleaner::fmt_num(transit),
                remark: classify_remark(transit, reconciled).map(String::from),
            });
        }
        rows
    }

    /// 收货明细行: 60 天窗口,Remark 位携带源文件名
    fn receiving_rows(&self, tables: &[DataTable]) -> Vec<UnifiedRow> {
        if tables.is_empty() {
            return Vec::new();
        }
        let merged = DataTable::concat_union(tables);
        let cutoff = self.today - Duration::days(RECEIVING_WINDOW_DAYS);

        let mut rows = Vec::new();
        for idx in 0..merged.len() {
            let Some(date) = merged
                .cell(idx, "ORDER DATE")
                .and_then(DataCleaner::parse_date)
            else {
                continue;
            };
            if date < cutoff {
                continue;
            }

            rows.push(UnifiedRow {
                brand: merged.cell(idx, BRAND_COLUMN).unwrap_or("").to_string(),
                dealer: merged.cell(idx, DEALER_COLUMN).unwrap_or("").to_string(),
                location: merged.cell(idx, LOCATION_COLUMN).unwrap_or("").to_string(),
                // 源格式的列名带尾随空格
                order_number: merged.cell(idx, "ORDER NO ").unwrap_or("").to_string(),
                part_number: merged.cell(idx, "PART NO _SUPPLY").unwrap_or("").to_string(),
                order_date: date,
                po_qty: merged.cell(idx, "ACCEPT QTY").unwrap_or("").to_string(),
                remark: merged.cell(idx, SOURCE_FILE_COLUMN).map(String::from),
            });
        }
        rows
    }
}

/// 全量统一表: 配件号去空白,日期转 DD Mon YYYY,三个发票占位列置空
fn unified_table(rows: &[UnifiedRow]) -> DataTable {
    let mut table = DataTable::new(
        UNIFIED_OEM_COLUMNS.iter().map(|c| c.to_string()).collect(),
    );
    for row in rows {
        table.push_row(vec![
            row.brand.clone(),
            row.dealer.clone(),
            row.location.clone(),
            row.order_number.clone(),
            DataCleaner::clean_part_number(&row.part_number),
            row.order_date.format(OEM_DATE_FORMAT).to_string(),
            row.po_qty.clone(),
            row.remark.clone().unwrap_or_default(),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    table
}

/// 复核清单: Remark == "Pls Check" 的 (网点, 订单号),按首见去重
fn flagged_extract(rows: &[UnifiedRow]) -> DataTable {
    let mut table = DataTable::new(
        OEM_FLAGGED_COLUMNS.iter().map(|c| c.to_string()).collect(),
    );
    let mut seen = HashSet::new();
    for row in rows {
        if row.remark.as_deref() != Some("Pls Check") {
            continue;
        }
        let key = (row.location.clone(), row.order_number.clone());
        if seen.insert(key) {
            table.push_row(vec![row.location.clone(), row.order_number.clone()]);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordKind;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn date_str(days_ago: i64) -> String {
        (today() - Duration::days(days_ago))
            .format("%Y-%m-%d")
            .to_string()
    }

    /// 构造带溯源列的积压表(仅派生所需列;窄表是可接受的有损情形)
    fn backlog_table(rows: Vec<Vec<String>>) -> DataTable {
        DataTable::from_rows(
            s(&[
                "ORDER NO",
                "PART NO_CURRENT",
                "QUANTITY_CURRENT",
                "B/O",
                "PO DATE",
                "PROCESSING_ALLOCATION",
                "PROCESSING_SHIPPEO",
                "__source_file__",
                "Brand",
                "Dealer",
                "Location",
            ]),
            rows,
        )
    }

    fn backlog_row(
        order: &str,
        bo: &str,
        current: &str,
        shipped: &str,
        date: &str,
    ) -> Vec<String> {
        s(&[
            order, "P-100", current, bo, date, "0", shipped, "BO List.csv", "Hyundai", "ABC",
            "North",
        ])
    }

    fn receiving_table(rows: Vec<Vec<String>>) -> DataTable {
        DataTable::from_rows(
            s(&[
                "ORDER NO ",
                "PART NO _SUPPLY",
                "ACCEPT QTY",
                "ORDER DATE",
                "__source_file__",
                "Brand",
                "Dealer",
                "Location",
            ]),
            rows,
        )
    }

    #[test]
    fn test_remark_matrix_exhaustive() {
        assert_eq!(classify_remark(0.0, true), Some("Ok"));
        assert_eq!(classify_remark(5.0, false), Some("Ok"));
        assert_eq!(classify_remark(0.0, false), Some("Pls Check"));
        assert_eq!(classify_remark(5.0, true), None);
    }

    #[test]
    fn test_backlog_window_boundary_inclusive() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::OrderBacklog,
            backlog_table(vec![
                backlog_row("O-90", "0", "0", "0", &date_str(90)),
                backlog_row("O-91", "0", "0", "0", &date_str(91)),
            ]),
        );

        let report = Aggregator::new(today()).build_oem_report(&acc).unwrap();
        let full = report.primary_table();
        assert_eq!(full.len(), 1);
        assert_eq!(full.cell(0, "OrderNumber"), Some("O-90"));
    }

    #[test]
    fn test_receiving_window_boundary_inclusive() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::ReceivingPendingDetail,
            receiving_table(vec![
                s(&["R-60", "P-1", "4", &date_str(60), "Receving Pending Detail.csv", "Hyundai", "ABC", "North"]),
                s(&["R-61", "P-2", "4", &date_str(61), "Receving Pending Detail.csv", "Hyundai", "ABC", "North"]),
            ]),
        );

        let report = Aggregator::new(today()).build_oem_report(&acc).unwrap();
        let full = report.primary_table();
        assert_eq!(full.len(), 1);
        assert_eq!(full.cell(0, "OrderNumber"), Some("R-60"));
    }

    #[test]
    fn test_unparseable_dates_dropped_silently() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::OrderBacklog,
            backlog_table(vec![
                backlog_row("O-1", "0", "0", "0", "not a date"),
                backlog_row("O-2", "0", "0", "0", &date_str(1)),
            ]),
        );

        let report = Aggregator::new(today()).build_oem_report(&acc).unwrap();
        assert_eq!(report.primary_table().len(), 1);
    }

    #[test]
    fn test_transit_sums_six_columns_excluding_shippeo() {
        let table = DataTable::from_rows(
            s(&[
                "ORDER NO",
                "PART NO_CURRENT",
                "QUANTITY_CURRENT",
                "B/O",
                "PO DATE",
                "PROCESSING_ALLOCATION",
                "PROCESSING_ON-PICK",
                "PROCESSING_ON-PACK",
                "PROCESSING_PACKED",
                "PROCESSING_INVOICE",
                "PROCESSING_SHIPPEO",
                "Brand",
                "Dealer",
                "Location",
            ]),
            vec![s(&[
                "O-1", "P-1", "21", "1", &date_str(5), "2", "3", "4", "5", "6", "99", "Hyundai",
                "ABC", "North",
            ])],
        );
        let mut acc = LocationAccumulator::new();
        acc.push(RecordKind::OrderBacklog, table);

        let report = Aggregator::new(today()).build_oem_report(&acc).unwrap();
        let full = report.primary_table();
        // 1+2+3+4+5+6 = 21,SHIPPEO 的 99 不计入
        assert_eq!(full.cell(0, "POQty"), Some("21"));
        // QUANTITY_CURRENT(21) != SHIPPEO(99) 且 transit > 0 → Ok
        assert_eq!(full.cell(0, "Remark"), Some("Ok"));
    }

    #[test]
    fn test_oem_full_table_shape_and_date_format() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::OrderBacklog,
            backlog_table(vec![backlog_row("O-1", "5", "5", "0", "2026-08-01")]),
        );

        let report = Aggregator::new(today()).build_oem_report(&acc).unwrap();
        let full = report.primary_table();
        assert_eq!(full.columns(), UNIFIED_OEM_COLUMNS);
        assert_eq!(full.cell(0, "OrderDate"), Some("01 Aug 2026"));
        assert_eq!(full.cell(0, "OEMInvoiceNo"), Some(""));
        assert_eq!(full.cell(0, "OEMInvoiceDate"), Some(""));
        assert_eq!(full.cell(0, "OEMInvoiceQty"), Some(""));
    }

    #[test]
    fn test_receiving_remark_carries_source_file_name() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::ReceivingTodayDetail,
            receiving_table(vec![s(&[
                "R-1",
                " P-9 ",
                "7",
                &date_str(10),
                "Receving Today Detail.csv",
                "Hyundai",
                "ABC",
                "North",
            ])]),
        );

        let report = Aggregator::new(today()).build_oem_report(&acc).unwrap();
        let full = report.primary_table();
        assert_eq!(full.cell(0, "Remark"), Some("Receving Today Detail.csv"));
        assert_eq!(full.cell(0, "PartNumber"), Some("P-9"));
        assert_eq!(full.cell(0, "POQty"), Some("7"));
    }

    #[test]
    fn test_flagged_extract_dedup_on_location_and_order() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::OrderBacklog,
            backlog_table(vec![
                // transit=0 且不对账 → Pls Check;同一订单两行
                backlog_row("O-1", "0", "5", "0", &date_str(1)),
                backlog_row("O-1", "0", "5", "0", &date_str(2)),
                backlog_row("O-2", "0", "5", "0", &date_str(3)),
                // transit=0 且对账 → Ok,不入清单
                backlog_row("O-3", "0", "0", "0", &date_str(4)),
            ]),
        );

        let report = Aggregator::new(today()).build_oem_report(&acc).unwrap();
        let flagged = &report.sheets[0].table;
        assert_eq!(flagged.columns(), OEM_FLAGGED_COLUMNS);
        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged.cell(0, "OrderNumber"), Some("O-1"));
        assert_eq!(flagged.cell(1, "OrderNumber"), Some("O-2"));
    }

    #[test]
    fn test_oem_absent_without_contributing_kinds() {
        let mut acc = LocationAccumulator::new();
        // 只有收货清单(list)不触发 OEM 报表
        acc.push(
            RecordKind::ReceivingPendingList,
            DataTable::from_rows(s(&["SEQ"]), vec![s(&["1"])]),
        );

        assert!(Aggregator::new(today()).build_oem_report(&acc).is_none());
    }

    #[test]
    fn test_stock_report_is_plain_concat() {
        let mut acc = LocationAccumulator::new();
        let cols = &["Brand", "Dealer", "Location", "Partnumber", "Qty"];
        acc.push(
            RecordKind::Stock,
            DataTable::from_rows(s(cols), vec![s(&["H", "A", "N", "P-1", "5"])]),
        );
        acc.push(
            RecordKind::Stock,
            DataTable::from_rows(s(cols), vec![s(&["H", "A", "N", "P-2", "3"])]),
        );

        let report = Aggregator::new(today()).build_stock_report(&acc).unwrap();
        assert_eq!(report.primary_table().len(), 2);
    }

    #[test]
    fn test_pending_report_selection_and_trim() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::TransferDetail,
            DataTable::from_rows(
                s(&["PART NO ?", "QUANTITY", "EXTRA", "__source_file__", "Brand", "Dealer", "Location"]),
                vec![s(&[" P-7 ", "2", "x", "Transfer Detail.csv", "Hyundai", "ABC", "North"])],
            ),
        );

        let report = Aggregator::new(today()).build_pending_report(&acc).unwrap();
        let table = report.primary_table();
        assert_eq!(table.columns(), PENDING_REPORT_COLUMNS);
        assert_eq!(table.cell(0, "PartNumber"), Some("P-7"));
        assert_eq!(table.cell(0, "Qty"), Some("2"));
    }

    #[test]
    fn test_pending_report_omitted_when_columns_missing() {
        let mut acc = LocationAccumulator::new();
        acc.push(
            RecordKind::TransferDetail,
            DataTable::from_rows(
                s(&["ITEM", "Brand", "Dealer", "Location"]),
                vec![s(&["P-7", "H", "A", "N"])],
            ),
        );

        assert!(Aggregator::new(today()).build_pending_report(&acc).is_none());
    }
}
