// ==========================================
// 经销商配件报表引擎 - 校验信息汇集
// ==========================================
// 职责: 运行级校验错误列表,贯穿读取与归一化阶段
// 红线: 只追加,永不中断处理;运行结束后一次性展示
// ==========================================

use serde_json::{json, Value};
use tracing::warn;

// ==========================================
// ValidationLog - 运行级校验日志
// ==========================================
// 用途: 以可变引用传入各阶段,条目为面向用户的英文信息
//       (信息格式与 DMS 报表工具的历史输出保持一致)
#[derive(Debug, Default)]
pub struct ValidationLog {
    entries: Vec<String>,
}

impl ValidationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条校验错误
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(message = %message, "记录校验错误");
        self.entries.push(message);
    }

    /// 文件不可读(仅 BO LIST / Stock 记录)
    pub fn record_unreadable(&mut self, location: &str, kind_label: &str, file: &str) {
        self.record(format!("{location}: Unable to read {kind_label} -> {file}"));
    }

    /// 必需列缺失
    pub fn record_missing_columns(&mut self, location: &str, kind_label: &str, missing: &[&str]) {
        self.record(format!(
            "{location}: {kind_label} missing columns - {}",
            missing.join(", ")
        ));
    }

    /// Stock 配件号/数量列均无法解析
    pub fn record_stock_columns_unresolved(&mut self, location: &str, file: &str) {
        self.record(format!(
            "{location}: Stock file missing part/qty columns -> {file}"
        ));
    }

    /// 网点目录不可枚举
    pub fn record_unlistable_directory(&mut self, location: &str, path: &str) {
        self.record(format!("{location}: Unable to list directory -> {path}"));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 汇总为 JSON 报告(供调用方/界面展示)
    pub fn to_report(&self) -> Value {
        json!({
            "total_errors": self.entries.len(),
            "errors": self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_formats() {
        let mut log = ValidationLog::new();
        log.record_unreadable("North", "BO LIST", "BO List.xlsx");
        log.record_missing_columns("North", "BO LIST", &["ORDER NO", "PO DATE"]);
        log.record_stock_columns_unresolved("North", "Stock.csv");

        assert_eq!(
            log.entries(),
            &[
                "North: Unable to read BO LIST -> BO List.xlsx",
                "North: BO LIST missing columns - ORDER NO, PO DATE",
                "North: Stock file missing part/qty columns -> Stock.csv",
            ]
        );
    }

    #[test]
    fn test_json_report() {
        let mut log = ValidationLog::new();
        log.record("X: some issue");

        let report = log.to_report();
        assert_eq!(report["total_errors"], 1);
        assert_eq!(report["errors"][0], "X: some issue");
    }
}
