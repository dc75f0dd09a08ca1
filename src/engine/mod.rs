// ==========================================
// 经销商配件报表引擎 - 引擎层
// ==========================================
// 职责: 汇总规则与运行编排
// 红线: 业务规则不触碰文件系统(读取在导入层,导出在报表层)
// ==========================================

pub mod accumulator;
pub mod aggregator;
pub mod orchestrator;

// 重导出核心类型
pub use accumulator::LocationAccumulator;
pub use aggregator::{
    classify_remark, Aggregator, BACKLOG_WINDOW_DAYS, RECEIVING_WINDOW_DAYS,
};
pub use orchestrator::{ProgressUpdate, ReportOrchestrator, RunOptions, RunSummary};
