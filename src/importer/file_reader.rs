// ==========================================
// 经销商配件报表引擎 - 文件读取器
// ==========================================
// 支持: Excel (.xlsx/.xls) / 任意扩展名的分隔文本
// 策略: .xls 先按二进制格式解析,失败回退 xlsx 引擎;
//       分隔文本先按 UTF-8 解码,失败回退 windows-1252
// ==========================================

use crate::domain::DataTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::location_importer_trait::TabularReader;
use calamine::{open_workbook, Data, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1252;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;

// ==========================================
// 行集 → 表格(两类读取器共用)
// ==========================================
// 表头取偏移处的物理行;数据行中全空行跳过,
// 比表头宽的行跳过(坏行),窄的行补空
fn table_from_rows(
    rows: Vec<Vec<String>>,
    header_offset: usize,
    file: &str,
) -> ImportResult<DataTable> {
    if rows.len() <= header_offset {
        return Err(ImportError::MissingHeaderRow {
            file: file.to_string(),
            offset: header_offset,
        });
    }

    let header: Vec<String> = rows[header_offset]
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    if header.is_empty() {
        return Err(ImportError::EmptyTable(file.to_string()));
    }

    let width = header.len();
    let mut table = DataTable::new(header);
    for row in rows.into_iter().skip(header_offset + 1) {
        if row.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        if row.len() > width {
            debug!(file = %file, fields = row.len(), expected = width, "跳过字段数超限的行");
            continue;
        }
        table.push_row(row);
    }
    Ok(table)
}

// ==========================================
// SpreadsheetReader - Excel 读取器
// ==========================================
pub struct SpreadsheetReader;

impl SpreadsheetReader {
    /// 读取第一个工作表为物理行集
    fn first_sheet_rows<RS, R>(workbook: &mut R, file: &str) -> ImportResult<Vec<Vec<String>>>
    where
        RS: Read + Seek,
        R: Reader<RS>,
        ImportError: From<R::Error>,
    {
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(format!(
                "{file}: 无工作表"
            )));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook.worksheet_range(&sheet_name)?;

        Ok(range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    fn read_xlsx(path: &Path, file: &str) -> ImportResult<Vec<Vec<String>>> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        Self::first_sheet_rows(&mut workbook, file)
    }

    fn read_xls(path: &Path, file: &str) -> ImportResult<Vec<Vec<String>>> {
        let mut workbook: Xls<_> = open_workbook(path)?;
        Self::first_sheet_rows(&mut workbook, file)
    }
}

impl TabularReader for SpreadsheetReader {
    fn read_table(&self, file_path: &Path, header_offset: usize) -> ImportResult<DataTable> {
        let file = file_name_of(file_path);
        let ext = extension_of(file_path);

        let rows = if ext == "xls" {
            // 旧格式优先按二进制引擎解析,失败回退 xlsx 引擎
            Self::read_xls(file_path, &file)
                .or_else(|_| Self::read_xlsx(file_path, &file))?
        } else {
            Self::read_xlsx(file_path, &file)?
        };

        table_from_rows(rows, header_offset, &file)
    }
}

/// 单元格转文本;日期单元格按日期时间渲染,避免落成 Excel 序列数
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

// ==========================================
// DelimitedReader - 分隔文本读取器
// ==========================================
pub struct DelimitedReader;

/// 候选分隔符,按偏好顺序
const DELIMITER_CANDIDATES: &[u8] = b",\t;|";

impl DelimitedReader {
    /// 读入并解码文件内容: UTF-8 优先,失败回退 windows-1252
    fn decode(path: &Path) -> ImportResult<String> {
        let bytes = std::fs::read(path)?;
        match std::str::from_utf8(&bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => {
                debug!(file = %path.display(), "UTF-8 解码失败,回退 windows-1252");
                let (decoded, _, _) = WINDOWS_1252.decode(&bytes);
                Ok(decoded.into_owned())
            }
        }
    }

    /// 在前若干非空行上探测分隔符
    ///
    /// 各行出现次数一致的候选优先;否则取总次数最多者;
    /// 全部候选都未出现时报错(单列文件视为不可读,与历史行为一致)
    fn sniff_delimiter(text: &str, file: &str) -> ImportResult<u8> {
        let sample: Vec<&str> = text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(10)
            .collect();
        if sample.is_empty() {
            return Err(ImportError::EmptyTable(file.to_string()));
        }

        let mut best: Option<(u8, usize)> = None;
        for &candidate in DELIMITER_CANDIDATES {
            let counts: Vec<usize> = sample
                .iter()
                .map(|l| l.bytes().filter(|&b| b == candidate).count())
                .collect();
            let total: usize = counts.iter().sum();
            if total == 0 {
                continue;
            }
            let consistent = counts.iter().all(|&c| c == counts[0]);
            if consistent {
                return Ok(candidate);
            }
            if best.map_or(true, |(_, t)| total > t) {
                best = Some((candidate, total));
            }
        }

        best.map(|(d, _)| d)
            .ok_or_else(|| ImportError::DelimiterDetectionError(file.to_string()))
    }
}

impl TabularReader for DelimitedReader {
    fn read_table(&self, file_path: &Path, header_offset: usize) -> ImportResult<DataTable> {
        let file = file_name_of(file_path);
        let text = Self::decode(file_path)?;
        let delimiter = Self::sniff_delimiter(&text, &file)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true) // 行宽不一致交由 table_from_rows 处理
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|v| v.trim().to_string()).collect());
        }

        table_from_rows(rows, header_offset, &file)
    }
}

// ==========================================
// UniversalReader - 按扩展名分派
// ==========================================
pub struct UniversalReader;

impl TabularReader for UniversalReader {
    fn read_table(&self, file_path: &Path, header_offset: usize) -> ImportResult<DataTable> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        match extension_of(file_path).as_str() {
            "xlsx" | "xls" => SpreadsheetReader.read_table(file_path, header_offset),
            // 其余扩展名一律按分隔文本处理
            _ => DelimitedReader.read_table(file_path, header_offset),
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
