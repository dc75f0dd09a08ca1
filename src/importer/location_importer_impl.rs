// ==========================================
// 经销商配件报表引擎 - 网点采集器实现
// ==========================================
// 职责: 单网点目录的 分类 → 读取 → 归一化 → 累积
// 流程: 目录排序枚举 → 前缀分类 → 按种类表头偏移读取 → 归一化
// ==========================================

use crate::domain::Location;
use crate::engine::accumulator::LocationAccumulator;
use crate::importer::file_reader::UniversalReader;
use crate::importer::location_importer_trait::{LocationImporter, TabularReader};
use crate::importer::schema_classifier::classify;
use crate::importer::schema_normalizer::{CategoryFilter, SchemaNormalizer};
use crate::importer::validation::ValidationLog;
use std::path::PathBuf;
use tracing::{debug, instrument};

// ==========================================
// LocationImporterImpl - 网点采集器
// ==========================================
pub struct LocationImporterImpl {
    reader: Box<dyn TabularReader>,
    normalizer: SchemaNormalizer,
}

impl LocationImporterImpl {
    pub fn new(reader: Box<dyn TabularReader>, normalizer: SchemaNormalizer) -> Self {
        Self { reader, normalizer }
    }

    /// 默认装配: 按扩展名分派的读取器 + 给定类别过滤
    pub fn with_default_reader(category_filter: CategoryFilter) -> Self {
        Self::new(
            Box::new(UniversalReader),
            SchemaNormalizer::new(category_filter),
        )
    }

    /// 枚举网点目录下的文件,按文件名排序保证合并顺序确定
    fn sorted_files(&self, location: &Location, log: &mut ValidationLog) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&location.path) {
            Ok(entries) => entries,
            Err(_) => {
                log.record_unlistable_directory(
                    &location.name,
                    &location.path.display().to_string(),
                );
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files
    }
}

impl LocationImporter for LocationImporterImpl {
    #[instrument(skip(self, location, log), fields(location = %location.name))]
    fn collect(&self, location: &Location, log: &mut ValidationLog) -> LocationAccumulator {
        let mut acc = LocationAccumulator::new();

        for path in self.sorted_files(location, log) {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            // 未识别的文件名静默忽略
            let Some(spec) = classify(&file_name) else {
                continue;
            };
            debug!(file = %file_name, kind = spec.label, "分类命中");

            match self.reader.read_table(&path, spec.header_offset) {
                Ok(table) if !table.is_empty() => {
                    if let Some(normalized) =
                        self.normalizer
                            .normalize(spec, table, location, &file_name, log)
                    {
                        acc.push(spec.kind, normalized);
                    }
                }
                // 空表与读取失败等价处理
                other => {
                    if let Err(err) = other {
                        debug!(file = %file_name, error = %err, "文件读取失败");
                    }
                    if spec.report_read_failure {
                        log.record_unreadable(&location.name, spec.label, &file_name);
                    }
                }
            }
        }

        debug!(tables = acc.table_count(), "网点采集完成");
        acc
    }
}
