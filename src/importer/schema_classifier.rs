// ==========================================
// 经销商配件报表引擎 - 文件分类器
// ==========================================
// 职责: 文件名前缀 → RecordKind,按描述符表固定优先级匹配
// 红线: 未识别文件名静默忽略(返回 None,不是错误)
// ==========================================

use crate::domain::record_kind::{RecordKindSpec, RECORD_KIND_SPECS};

/// 按文件名分类
///
/// 匹配对象是小写化、去首尾空白后的文件名;
/// 首个命中的描述符生效(RECORD_KIND_SPECS 的顺序即优先级)
pub fn classify(file_name: &str) -> Option<&'static RecordKindSpec> {
    let normalized = file_name.to_lowercase().trim().to_string();
    RECORD_KIND_SPECS
        .iter()
        .find(|spec| normalized.starts_with(spec.prefix))
}
