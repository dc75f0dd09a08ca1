// ==========================================
// 经销商配件报表引擎 - 模式归一化器
// ==========================================
// 职责: 规范列名套用 / 必需列校验 / Stock 变体列解析与类别过滤 / 溯源列追加
// 红线: 必需列缺失即整文件丢弃,不做部分接收
// ==========================================

use crate::domain::record_kind::{
    RecordKind, RecordKindSpec, BRAND_COLUMN, DEALER_COLUMN, LOCATION_COLUMN,
    SOURCE_FILE_COLUMN, STOCK_PART_COLUMNS, STOCK_QTY_COLUMNS,
};
use crate::domain::{DataTable, Location};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::validation::ValidationLog;
use std::collections::HashSet;
use tracing::debug;

// ==========================================
// 配件类别
// ==========================================

/// 从原始类型码派生配件类别
///
/// X/Y → Spares,A → Accessories,其余不归类(None)
pub fn derive_part_category(code: &str) -> Option<&'static str> {
    match code.trim().to_uppercase().as_str() {
        "X" | "Y" => Some("Spares"),
        "A" => Some("Accessories"),
        _ => None,
    }
}

// ==========================================
// CategoryFilter - 类别过滤器
// ==========================================
// 用途: 空集 = 未启用(全部通过);启用时未归类行一律丢弃
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    accepted: HashSet<String>, // 统一转小写
}

impl CategoryFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accepted: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// 未启用过滤
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.accepted.is_empty()
    }

    pub fn accepts(&self, category: Option<&str>) -> bool {
        if !self.is_active() {
            return true;
        }
        match category {
            Some(c) => self.accepted.contains(&c.to_lowercase()),
            None => false,
        }
    }
}

// ==========================================
// SchemaNormalizer - 归一化器
// ==========================================
pub struct SchemaNormalizer {
    category_filter: CategoryFilter,
}

impl SchemaNormalizer {
    pub fn new(category_filter: CategoryFilter) -> Self {
        Self { category_filter }
    }

    /// 归一化一张原始表
    ///
    /// # 返回
    /// - Some(DataTable): 归一化结果;Stock 已缩减为最终五列
    /// - None: 文件被丢弃(必需列缺失等,原因已记入 log)
    pub fn normalize(
        &self,
        spec: &RecordKindSpec,
        table: DataTable,
        location: &Location,
        file_name: &str,
        log: &mut ValidationLog,
    ) -> Option<DataTable> {
        if spec.kind == RecordKind::Stock {
            return self.normalize_stock(table, location, file_name, log);
        }

        let mut table = table;
        // 规范列名按位置套用;Transfer Detail 等保留原始表头
        if !spec.canonical_columns.is_empty() {
            table.apply_canonical_names(spec.canonical_columns);
        }

        if !spec.required_columns.is_empty() {
            let missing: Vec<&str> = spec
                .required_columns
                .iter()
                .filter(|c| !table.has_column(c))
                .copied()
                .collect();
            if !missing.is_empty() {
                log.record_missing_columns(&location.name, spec.label, &missing);
                return None;
            }
        }

        append_provenance(&mut table, location, file_name);
        Some(table)
    }

    /// Stock: 变体列解析 → 溯源 → 类别过滤 → 缩减为最终五列
    fn normalize_stock(
        &self,
        table: DataTable,
        location: &Location,
        file_name: &str,
        log: &mut ValidationLog,
    ) -> Option<DataTable> {
        // 变体列表精确匹配,先到先得
        let part_col = STOCK_PART_COLUMNS.iter().find(|c| table.has_column(c));
        let qty_col = STOCK_QTY_COLUMNS.iter().find(|c| table.has_column(c));
        let (part_col, qty_col) = match (part_col, qty_col) {
            (Some(p), Some(q)) => (*p, *q),
            _ => {
                log.record_stock_columns_unresolved(&location.name, file_name);
                return None;
            }
        };

        let mut table = table;
        append_provenance(&mut table, location, file_name);

        // 类别过滤:启用时按 PART TYPE 派生类别,未归类行丢弃
        if self.category_filter.is_active() {
            let type_idx = table.column_index("PART TYPE");
            let filter = &self.category_filter;
            let before = table.len();
            table.retain_rows(|row| {
                let category = type_idx.and_then(|i| derive_part_category(&row[i]));
                filter.accepts(category)
            });
            debug!(
                file = %file_name,
                kept = table.len(),
                dropped = before - table.len(),
                "应用配件类别过滤"
            );
        }

        let mut reduced = table.select(&[
            (BRAND_COLUMN, "Brand"),
            (DEALER_COLUMN, "Dealer"),
            (LOCATION_COLUMN, "Location"),
            (part_col, "Partnumber"),
            (qty_col, "Qty"),
        ])?;
        reduced.map_column("Partnumber", |v| DataCleaner::clean_part_number(v));
        reduced.map_column("Qty", |v| DataCleaner::fmt_num(DataCleaner::to_num(v)));
        Some(reduced)
    }
}

/// 追加溯源列: 源文件名 + 品牌/经销商/网点
fn append_provenance(table: &mut DataTable, location: &Location, file_name: &str) {
    table.append_constant_column(SOURCE_FILE_COLUMN, file_name);
    table.append_constant_column(BRAND_COLUMN, &location.brand);
    table.append_constant_column(DEALER_COLUMN, &location.dealer);
    table.append_constant_column(LOCATION_COLUMN, &location.name);
}
