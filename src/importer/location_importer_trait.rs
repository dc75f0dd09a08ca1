// ==========================================
// 经销商配件报表引擎 - 导入层 Trait
// ==========================================
// 职责: 定义读取/采集接口(不包含实现)
// ==========================================

use crate::domain::{DataTable, Location};
use crate::engine::accumulator::LocationAccumulator;
use crate::importer::error::ImportResult;
use crate::importer::validation::ValidationLog;
use std::path::Path;

// ==========================================
// TabularReader Trait
// ==========================================
// 用途: 把任意格式的单个文件读成原始表(阶段 0)
// 实现者: SpreadsheetReader, DelimitedReader, UniversalReader
pub trait TabularReader {
    /// 读取文件为原始表
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - header_offset: 表头所在行(之前的物理行全部丢弃)
    ///
    /// # 返回
    /// - Ok(DataTable): 原始表(可能为空,调用方把空表视同失败)
    /// - Err: 文件读取/解析错误(调用方转为校验信息或静默跳过)
    fn read_table(&self, file_path: &Path, header_offset: usize) -> ImportResult<DataTable>;
}

// ==========================================
// LocationImporter Trait
// ==========================================
// 用途: 单网点全部文件的 分类 → 读取 → 归一化 → 累积(阶段 1)
// 实现者: LocationImporterImpl
pub trait LocationImporter {
    /// 采集一个网点目录下的全部可识别文件
    ///
    /// # 参数
    /// - location: 网点(品牌/经销商/网点名/目录)
    /// - log: 运行级校验日志(可变引用,跨网点共享)
    ///
    /// # 返回
    /// - LocationAccumulator: 按种类分组的归一化表;目录不可枚举时为空
    ///
    /// # 错误语义
    /// 永不失败:所有文件级问题记入 log 或静默跳过后继续
    fn collect(&self, location: &Location, log: &mut ValidationLog) -> LocationAccumulator;
}
