// ==========================================
// 经销商配件报表引擎 - 导入层
// ==========================================
// 职责: 外部导出文件 → 归一化表
// 支持: Excel (.xlsx/.xls), 任意扩展名分隔文本
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_reader;
pub mod location_importer_impl;
pub mod location_importer_trait;
pub mod schema_classifier;
pub mod schema_normalizer;
pub mod validation;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_reader::{DelimitedReader, SpreadsheetReader, UniversalReader};
pub use location_importer_impl::LocationImporterImpl;
pub use location_importer_trait::{LocationImporter, TabularReader};
pub use schema_classifier::classify;
pub use schema_normalizer::{derive_part_category, CategoryFilter, SchemaNormalizer};
pub use validation::ValidationLog;
