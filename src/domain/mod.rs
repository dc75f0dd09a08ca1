// ==========================================
// 经销商配件报表引擎 - 领域模型层
// ==========================================
// 职责: 定义网点、表格、文件种类描述符、报表结构
// 红线: 不含文件 I/O,不含归一化/汇总逻辑
// ==========================================

pub mod location;
pub mod record_kind;
pub mod report;
pub mod table;

// 重导出核心类型
pub use location::Location;
pub use record_kind::{
    RecordKind, RecordKindSpec, BRAND_COLUMN, DEALER_COLUMN, LOCATION_COLUMN,
    ORDER_BACKLOG_COLUMNS, ORDER_BACKLOG_REQUIRED, RECEIVING_DETAIL_COLUMNS,
    RECEIVING_LIST_COLUMNS, RECORD_KIND_SPECS, SOURCE_FILE_COLUMN, STOCK_PART_COLUMNS,
    STOCK_QTY_COLUMNS, TRANSFER_LIST_COLUMNS,
};
pub use report::{
    Report, ReportKind, ReportSheet, OEM_FLAGGED_COLUMNS, PENDING_REPORT_COLUMNS,
    STOCK_REPORT_COLUMNS, UNIFIED_OEM_COLUMNS,
};
pub use table::DataTable;
