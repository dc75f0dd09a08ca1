// ==========================================
// 经销商配件报表引擎 - 报表模型
// ==========================================
// 职责: 报表种类、报表键、单/双工作表报表结构
// 红线: 键格式 {前缀}_{品牌}_{经销商}_{网点},品牌/经销商内不得含下划线
// ==========================================

use crate::domain::location::Location;
use crate::domain::table::DataTable;
use serde::{Deserialize, Serialize};

// ==========================================
// 统一 OEM 报表列(后三列为人工回填占位)
// ==========================================
pub const UNIFIED_OEM_COLUMNS: &[&str] = &[
    "Brand",
    "Dealer",
    "Location",
    "OrderNumber",
    "PartNumber",
    "OrderDate",
    "POQty",
    "Remark",
    "OEMInvoiceNo",
    "OEMInvoiceDate",
    "OEMInvoiceQty",
];

/// OEM 报表第一张工作表: 待人工复核的 (网点, 订单号) 去重清单
pub const OEM_FLAGGED_COLUMNS: &[&str] = &["Location", "OrderNumber"];

/// Stock 报表列(Partnumber 的小写 n 是历史格式,下游依赖)
pub const STOCK_REPORT_COLUMNS: &[&str] = &["Brand", "Dealer", "Location", "Partnumber", "Qty"];

/// Pending(调拨明细)报表列
pub const PENDING_REPORT_COLUMNS: &[&str] = &["Brand", "Dealer", "Location", "PartNumber", "Qty"];

// ==========================================
// ReportKind - 报表种类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Oem,     // 订单积压 + 收货明细统一复核表
    Stock,   // 在库存量
    Pending, // 调拨在途
}

impl ReportKind {
    /// 报表键前缀(也是打包分组的第一段)
    pub fn prefix(&self) -> &'static str {
        match self {
            ReportKind::Oem => "OEM",
            ReportKind::Stock => "Stock",
            ReportKind::Pending => "Pending",
        }
    }

    /// 组合报表键: {前缀}_{品牌}_{经销商}_{网点}
    pub fn key_for(&self, location: &Location) -> String {
        format!(
            "{}_{}_{}_{}",
            self.prefix(),
            location.brand,
            location.dealer,
            location.name
        )
    }
}

// ==========================================
// ReportSheet / Report - 报表结构
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ReportSheet {
    pub name: String,     // 工作表名
    pub table: DataTable, // 表内容
}

/// 一份可导出报表;OEM 为双工作表(复核清单 + 全量表),其余单工作表
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub sheets: Vec<ReportSheet>,
}

impl Report {
    /// 单工作表报表(工作表名沿用导出层的 "Sheet1")
    pub fn single(kind: ReportKind, table: DataTable) -> Self {
        Self {
            kind,
            sheets: vec![ReportSheet {
                name: "Sheet1".to_string(),
                table,
            }],
        }
    }

    /// OEM 双工作表报表: sheet1 = 复核清单,sheet2 = 全量统一表
    pub fn two_sheet(kind: ReportKind, flagged: DataTable, full: DataTable) -> Self {
        Self {
            kind,
            sheets: vec![
                ReportSheet {
                    name: "sheet1".to_string(),
                    table: flagged,
                },
                ReportSheet {
                    name: "sheet2".to_string(),
                    table: full,
                },
            ],
        }
    }

    /// 参与合并打包的主表(双工作表报表取全量表)
    pub fn primary_table(&self) -> &DataTable {
        &self.sheets.last().expect("报表至少一张工作表").table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_key_format() {
        let location = Location::new("Hyundai", "ABC", "North", "/tmp/north");
        assert_eq!(ReportKind::Oem.key_for(&location), "OEM_Hyundai_ABC_North");
        assert_eq!(ReportKind::Stock.key_for(&location), "Stock_Hyundai_ABC_North");
        assert_eq!(
            ReportKind::Pending.key_for(&location),
            "Pending_Hyundai_ABC_North"
        );
    }

    #[test]
    fn test_primary_table_is_last_sheet() {
        let flagged = DataTable::new(vec!["Location".into(), "OrderNumber".into()]);
        let mut full = DataTable::new(vec!["Brand".into()]);
        full.push_row(vec!["Hyundai".into()]);

        let report = Report::two_sheet(ReportKind::Oem, flagged, full);
        assert_eq!(report.sheets.len(), 2);
        assert_eq!(report.primary_table().len(), 1);
    }
}
