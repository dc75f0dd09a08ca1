// ==========================================
// 经销商配件报表引擎 - 核心库
// ==========================================
// 技术栈: calamine + csv + chrono + zip
// 系统定位: 多网点 DMS 导出文件 → 规范报表 → 合并打包
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 网点/表格/种类描述符/报表结构
pub mod domain;

// 导入层 - 读取/分类/归一化/校验
pub mod importer;

// 引擎层 - 汇总规则与运行编排
pub mod engine;

// 报表层 - 仓库/工作簿写出/合并打包
pub mod report;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{DataTable, Location, RecordKind, Report, ReportKind, ReportSheet};

// 导入层
pub use importer::{
    CategoryFilter, ImportError, ImportResult, LocationImporter, LocationImporterImpl,
    TabularReader, UniversalReader, ValidationLog,
};

// 引擎层
pub use engine::{
    Aggregator, LocationAccumulator, ProgressUpdate, ReportOrchestrator, RunOptions, RunSummary,
};

// 报表层
pub use report::{
    build_combined_bundle, ExportError, ExportResult, ReportStore, WorkbookWriter,
    COMBINED_BUNDLE_NAME,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "经销商配件报表引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
