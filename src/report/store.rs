// ==========================================
// 经销商配件报表引擎 - 报表仓库
// ==========================================
// 职责: 运行期内 报表键 → 报表 的只追加映射
// 红线: 键重复时按"后写覆盖"处理并告警(网点目录配置重复的兜底)
// ==========================================

use crate::domain::Report;
use std::collections::BTreeMap;
use tracing::warn;

// ==========================================
// ReportStore - 报表仓库
// ==========================================
// 用途: 编排器写入,导出层按前缀枚举
// BTreeMap 保证枚举顺序确定
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: BTreeMap<String, Report>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一份报表;键已存在时覆盖并告警
    pub fn insert(&mut self, key: String, report: Report) {
        if self.reports.contains_key(&key) {
            warn!(key = %key, "报表键重复,后写覆盖先写");
        }
        self.reports.insert(key, report);
    }

    pub fn get(&self, key: &str) -> Option<&Report> {
        self.reports.get(key)
    }

    /// 按键前缀枚举(如 "OEM_"、"Stock_")
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.reports
            .keys()
            .filter(|k| k.starts_with(prefix))
            .map(|k| k.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Report)> {
        self.reports.iter()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataTable, ReportKind};

    fn stock_report(rows: usize) -> Report {
        let mut table = DataTable::new(vec!["Partnumber".into()]);
        for i in 0..rows {
            table.push_row(vec![format!("P-{i}")]);
        }
        Report::single(ReportKind::Stock, table)
    }

    #[test]
    fn test_prefix_enumeration() {
        let mut store = ReportStore::new();
        store.insert("Stock_H_A_North".into(), stock_report(1));
        store.insert("Stock_H_A_South".into(), stock_report(1));
        store.insert("OEM_H_A_North".into(), stock_report(1));

        assert_eq!(
            store.keys_with_prefix("Stock_"),
            vec!["Stock_H_A_North", "Stock_H_A_South"]
        );
        assert_eq!(store.keys_with_prefix("OEM_").len(), 1);
        assert_eq!(store.keys_with_prefix("Pending_").len(), 0);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let mut store = ReportStore::new();
        store.insert("Stock_H_A_North".into(), stock_report(1));
        store.insert("Stock_H_A_North".into(), stock_report(3));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("Stock_H_A_North").unwrap().primary_table().len(),
            3
        );
    }
}
