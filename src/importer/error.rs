// ==========================================
// 经销商配件报表引擎 - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入层错误类型
///
/// 读取失败对整个运行永远非致命:调用方将其转换为校验信息
/// (BO LIST / Stock)或静默跳过(其余种类),然后继续下一个文件
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("分隔文本解析失败: {0}")]
    DelimitedParseError(String),

    #[error("无法探测分隔符: {0}")]
    DelimiterDetectionError(String),

    // ===== 表格结构错误 =====
    #[error("表头行缺失(偏移 {offset}): {file}")]
    MissingHeaderRow { file: String, offset: usize },

    #[error("表格无数据行: {0}")]
    EmptyTable(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::DelimitedParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsError>
impl From<calamine::XlsError> for ImportError {
    fn from(err: calamine::XlsError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
