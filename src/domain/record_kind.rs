// ==========================================
// 经销商配件报表引擎 - 文件种类描述符
// ==========================================
// 职责: 八类导出文件的前缀匹配器 + 表头偏移 + 规范列表 + 必需列
// 红线: 描述符不可变,按固定优先级顺序匹配
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 溯源列名(归一化后追加)
// ==========================================
pub const SOURCE_FILE_COLUMN: &str = "__source_file__";
pub const BRAND_COLUMN: &str = "Brand";
pub const DEALER_COLUMN: &str = "Dealer";
pub const LOCATION_COLUMN: &str = "Location";

// ==========================================
// 规范列表(列名与顺序来自 DMS 导出格式,含个别原生空格)
// ==========================================

/// BO LIST - 订单积压(表头在第 2 行)
pub const ORDER_BACKLOG_COLUMNS: &[&str] = &[
    "ORDER NO",
    "LINE",
    "PART NO_ORDER",
    "PART NO_CURRENT",
    "PART NAME",
    "PARTSOURCE",
    "QUANTITY_ORDER",
    "QUANTITY_CURRENT",
    "B/O",
    "PO DATE",
    "PDC",
    "ETA",
    "MSG",
    "PROCESSING_ALLOCATION",
    "PROCESSING_ON-PICK",
    "PROCESSING_ON-PACK",
    "PROCESSING_PACKED",
    "PROCESSING_INVOICE",
    "PROCESSING_SHIPPEO",
    "LOST QTY",
    "ELAP",
];

/// BO LIST 必需列(缺失则整文件丢弃)
pub const ORDER_BACKLOG_REQUIRED: &[&str] = &[
    "ORDER NO",
    "PART NO_CURRENT",
    "PO DATE",
    "QUANTITY_CURRENT",
    "PROCESSING_ALLOCATION",
];

/// Receiving Pending/Today Detail 共用列表
/// 注意: `CASE NO `、`ORDER NO `、`PART NO _SUPPLY` 的空格是导出格式原样
pub const RECEIVING_DETAIL_COLUMNS: &[&str] = &[
    "SEQ",
    "CASE NO ",
    "ORDER NO ",
    "LINE NO",
    "PART NO _SUPPLY",
    "PART NO _ORDER",
    "H/K",
    "PART NAME",
    "SUPPLY QTY",
    "ORDER QTY",
    "ACCEPT QTY",
    "CLAIM QTY",
    "CLAIM TYPE",
    "CLAIM CODE",
    "LOC",
    "LIST PRICE",
    "NDP (UNIT)",
    "ED (UNIT)",
    "MAT VALUE",
    "DEPOT S/C",
    "VOR S/C",
    "OTHER CHARGES",
    "STAX(%)",
    "CTAX(%)",
    "ITAX(%)",
    "TAX(%)",
    "HSN CODE",
    "TAX AMT",
    "FRT/INS",
    "SGST AMT",
    "CGST AMT",
    "IGST AMT",
    "COMP CESS AMT",
    "LANDED COST",
    "ORDER DATE",
    "RECEIVING DATE",
    "STATUS",
];

/// Receiving Pending/Today List 共用列表(表头在第 3 行)
pub const RECEIVING_LIST_COLUMNS: &[&str] = &[
    "SEQ",
    "H/K",
    "GR_NO",
    "GR_TYPE",
    "GR_STATUS",
    "INVOICE_NO",
    "INVOICE_DATE",
    "SHIPPED INFORMATION_SUPPLIER",
    "SHIPPED INFORMATION_TRUCK NO",
    "SHIPPED INFORMATION_CARRIER NAME",
    "SHIPPED INFORMATION_FINISH DATE",
    "SHIPPED INFORMATION_ACCEPT QTY",
    "SHIPPED INFORMATION_CLAIM QTY",
    "SHIPPED INFORMATION_MAT VALUE",
    "SHIPPED INFORMATION_FREIGHT AMT",
    "SHIPPED INFORMATION_SGST AMT",
    "SHIPPED INFORMATION_IGST AMT",
    "SHIPPED INFORMATION_TCS AMT",
    "SHIPPED INFORMATION_TAX AMOUNT",
];

/// Transfer List 列表
pub const TRANSFER_LIST_COLUMNS: &[&str] = &[
    "TRANSFER NO",
    "REQ.DATE",
    "REQ.TIME",
    "SEND DATE",
    "SEND.TIME",
    "RECE.DATE",
    "RECE.TIME",
    "REQU.DEALER",
    "SEND DEALER",
    "ITEM_REQ",
    "ITEM_SEND",
    "QUANTITY_REQ",
    "QUANTITY_SEND",
    "AMOUNT",
    "AMOUNT2",
    "TAXABLE AMT",
    "SGST AMT",
    "CGST AMT",
    "IGST AMT",
    "COMP CESS AMT",
    "STATUS",
];

/// Stock 配件号列名变体(大小写敏感精确匹配,先到先得)
pub const STOCK_PART_COLUMNS: &[&str] = &[
    "PART NO ?",
    "PART NO",
    "PART NO.",
    "PART_NO",
    "PART NUMBER",
    "PART_NUMBER",
];

/// Stock 数量列名变体
pub const STOCK_QTY_COLUMNS: &[&str] = &[
    "ON-HAND",
    "ON HAND",
    "ONHAND",
    "ON_HAND",
    "QTY",
    "CLOSE_QTY",
];

// ==========================================
// RecordKind - 文件种类
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    OrderBacklog,           // BO LIST
    Stock,                  // Stock
    ReceivingPendingDetail, // Receving Pending Detail
    ReceivingPendingList,   // Receving Pending List
    ReceivingTodayList,     // Receving Today List
    ReceivingTodayDetail,   // Receving Today Detail
    TransferList,           // Transfer List
    TransferDetail,         // Transfer Detail
}

// ==========================================
// RecordKindSpec - 种类描述符
// ==========================================
// 用途: 分类器按 prefix 匹配,归一化器按其余字段处理
#[derive(Debug, Clone, Copy)]
pub struct RecordKindSpec {
    pub kind: RecordKind,
    /// 文件名前缀(对小写化、去空白后的文件名匹配)
    pub prefix: &'static str,
    /// 校验信息里的展示名
    pub label: &'static str,
    /// 表头所在行(之前的行全部丢弃)
    pub header_offset: usize,
    /// 规范列表;为空表示保留原始表头(Stock / Transfer Detail)
    pub canonical_columns: &'static [&'static str],
    /// 必需列;为空表示不校验
    pub required_columns: &'static [&'static str],
    /// 读取失败是否记入校验错误(其余种类静默跳过)
    pub report_read_failure: bool,
}

/// 全部种类描述符,按分类优先级排列
///
/// 前缀可能互相覆盖("receving pending detail" vs "receving pending list"),
/// 顺序即优先级,先匹配者生效
pub const RECORD_KIND_SPECS: &[RecordKindSpec] = &[
    RecordKindSpec {
        kind: RecordKind::OrderBacklog,
        prefix: "bo list",
        label: "BO LIST",
        header_offset: 1,
        canonical_columns: ORDER_BACKLOG_COLUMNS,
        required_columns: ORDER_BACKLOG_REQUIRED,
        report_read_failure: true,
    },
    RecordKindSpec {
        kind: RecordKind::Stock,
        prefix: "stock",
        label: "Stock",
        header_offset: 0,
        canonical_columns: &[],
        required_columns: &[],
        report_read_failure: true,
    },
    RecordKindSpec {
        kind: RecordKind::ReceivingPendingDetail,
        prefix: "receving pending detail",
        label: "Receving Pending Detail",
        header_offset: 1,
        canonical_columns: RECEIVING_DETAIL_COLUMNS,
        required_columns: &[],
        report_read_failure: false,
    },
    RecordKindSpec {
        kind: RecordKind::ReceivingPendingList,
        prefix: "receving pending list",
        label: "Receving Pending List",
        header_offset: 2,
        canonical_columns: RECEIVING_LIST_COLUMNS,
        required_columns: &[],
        report_read_failure: false,
    },
    RecordKindSpec {
        kind: RecordKind::ReceivingTodayList,
        prefix: "receving today list",
        label: "Receving Today List",
        header_offset: 2,
        canonical_columns: RECEIVING_LIST_COLUMNS,
        required_columns: &[],
        report_read_failure: false,
    },
    RecordKindSpec {
        kind: RecordKind::ReceivingTodayDetail,
        prefix: "receving today detail",
        label: "Receving Today Detail",
        header_offset: 1,
        canonical_columns: RECEIVING_DETAIL_COLUMNS,
        required_columns: &[],
        report_read_failure: false,
    },
    RecordKindSpec {
        kind: RecordKind::TransferList,
        prefix: "transfer list",
        label: "Transfer List",
        header_offset: 1,
        canonical_columns: TRANSFER_LIST_COLUMNS,
        required_columns: &[],
        report_read_failure: false,
    },
    RecordKindSpec {
        kind: RecordKind::TransferDetail,
        prefix: "transfer detail",
        label: "Transfer Detail",
        header_offset: 0,
        canonical_columns: &[],
        required_columns: &[],
        report_read_failure: false,
    },
];

impl RecordKind {
    /// 取本种类的描述符
    pub fn spec(&self) -> &'static RecordKindSpec {
        RECORD_KIND_SPECS
            .iter()
            .find(|s| s.kind == *self)
            .expect("每个 RecordKind 均有描述符")
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }
}
