// ==========================================
// 经销商配件报表引擎 - 运行编排器
// ==========================================
// 职责: 网点循环 → 采集 → 汇总 → 写入报表仓库
// 红线: 单线程同步;逐网点回调进度;任何文件级问题不中断运行
// ==========================================

use crate::domain::Location;
use crate::engine::aggregator::Aggregator;
use crate::importer::location_importer_impl::LocationImporterImpl;
use crate::importer::location_importer_trait::LocationImporter;
use crate::importer::schema_normalizer::CategoryFilter;
use crate::importer::validation::ValidationLog;
use crate::report::store::ReportStore;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// ProgressUpdate - 进度信号
// ==========================================
// 用途: 每网点回调一次,仅供调用方展示,不影响执行
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub current: usize,  // 当前网点序号(1 起)
    pub total: usize,    // 网点总数
    pub message: String, // 人类可读状态
}

// ==========================================
// RunOptions - 运行选项
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 配件类别过滤(空 = 不过滤),对 Stock 生效
    pub categories: Vec<String>,
    /// 日期窗口基准日;缺省取本地当天,测试可注入
    pub today: Option<NaiveDate>,
}

// ==========================================
// RunSummary - 运行结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub locations_processed: usize,
    pub reports_generated: usize,
    /// 全部校验错误,运行结束后一次性呈现
    pub validation_errors: Vec<String>,
}

// ==========================================
// ReportOrchestrator - 编排器
// ==========================================
#[derive(Default)]
pub struct ReportOrchestrator;

impl ReportOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// 执行一次完整运行
    ///
    /// # 参数
    /// - locations: 待处理网点(顺序即处理顺序)
    /// - options: 类别过滤与基准日
    /// - store: 本次运行的报表仓库(追加写入)
    /// - progress: 进度回调,每网点一次
    #[instrument(skip_all, fields(run_id))]
    pub fn run<F>(
        &self,
        locations: &[Location],
        options: &RunOptions,
        store: &mut ReportStore,
        mut progress: F,
    ) -> RunSummary
    where
        F: FnMut(&ProgressUpdate),
    {
        let started = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        let today = options.today.unwrap_or_else(|| Local::now().date_naive());
        let importer =
            LocationImporterImpl::with_default_reader(CategoryFilter::new(&options.categories));
        let aggregator = Aggregator::new(today);
        let mut log = ValidationLog::new();

        let total = locations.len();
        info!(total, %today, "开始生成报表");

        let mut reports_generated = 0usize;
        for (idx, location) in locations.iter().enumerate() {
            progress(&ProgressUpdate {
                current: idx + 1,
                total,
                message: format!(
                    "Generating reports for {} ({}/{})...",
                    location.name,
                    idx + 1,
                    total
                ),
            });

            let acc = importer.collect(location, &mut log);
            let reports = [
                aggregator.build_oem_report(&acc),
                aggregator.build_stock_report(&acc),
                aggregator.build_pending_report(&acc),
            ];
            for report in reports.into_iter().flatten() {
                let key = report.kind.key_for(location);
                store.insert(key, report);
                reports_generated += 1;
            }
        }

        info!(
            locations = total,
            reports = reports_generated,
            validation_errors = log.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "报表生成完成"
        );

        RunSummary {
            run_id,
            locations_processed: total,
            reports_generated,
            validation_errors: log.entries().to_vec(),
        }
    }
}
