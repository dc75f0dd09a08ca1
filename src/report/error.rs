// ==========================================
// 经销商配件报表引擎 - 报表层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 报表导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("归档写入失败: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("导出 I/O 失败: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
