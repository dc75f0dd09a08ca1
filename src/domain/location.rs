// ==========================================
// 经销商配件报表引擎 - 网点模型
// ==========================================
// 职责: 处理单元 (品牌, 经销商, 网点名, 导出目录)
// 红线: 只读输入,单次处理过程中不可变
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ==========================================
// Location - 经销商网点
// ==========================================
// 用途: 一个网点的全部导出文件作为一个单元处理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub brand: String,  // 品牌
    pub dealer: String, // 经销商
    pub name: String,   // 网点名
    pub path: PathBuf,  // 导出文件目录
}

impl Location {
    pub fn new(
        brand: impl Into<String>,
        dealer: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            brand: brand.into(),
            dealer: dealer.into(),
            name: name.into(),
            path: path.into(),
        }
    }
}
