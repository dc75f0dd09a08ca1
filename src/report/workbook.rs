// ==========================================
// 经销商配件报表引擎 - 工作簿写出器
// ==========================================
// 职责: Report → 最小可用的 SpreadsheetML (.xlsx) 字节流
// 实现: 手写 OOXML 包结构(内容类型/关系/工作簿/工作表),zip 打包
// 单元格: 数值文本写数值单元格,其余写内联字符串
// ==========================================

use crate::domain::{DataTable, Report};
use crate::importer::data_cleaner::DataCleaner;
use crate::report::error::ExportResult;
use std::io::{Cursor, Write};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

// ==========================================
// WorkbookWriter - 工作簿写出器
// ==========================================
pub struct WorkbookWriter;

impl WorkbookWriter {
    /// 把一份报表写成 .xlsx 字节流(每张 ReportSheet 一个工作表)
    pub fn write_report(report: &Report) -> ExportResult<Vec<u8>> {
        let sheets: Vec<(&str, &DataTable)> = report
            .sheets
            .iter()
            .map(|s| (s.name.as_str(), &s.table))
            .collect();
        Self::write_sheets(&sheets)
    }

    /// 把若干 (工作表名, 表格) 写成 .xlsx 字节流
    pub fn write_sheets(sheets: &[(&str, &DataTable)]) -> ExportResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options)?;
        zip.write_all(content_types_xml(sheets.len()).as_bytes())?;

        zip.start_file("_rels/.rels", options)?;
        zip.write_all(ROOT_RELS_XML.as_bytes())?;

        zip.start_file("xl/workbook.xml", options)?;
        zip.write_all(workbook_xml(sheets).as_bytes())?;

        zip.start_file("xl/_rels/workbook.xml.rels", options)?;
        zip.write_all(workbook_rels_xml(sheets.len()).as_bytes())?;

        for (idx, (_, table)) in sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", idx + 1), options)?;
            zip.write_all(sheet_xml(table).as_bytes())?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

const ROOT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#
);

fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    ));
    for idx in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{idx}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn workbook_xml(sheets: &[(&str, &DataTable)]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        r#"<sheets>"#,
    ));
    for (idx, (name, _)) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(name),
            idx + 1,
            idx + 1
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    ));
    for idx in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{idx}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{idx}.xml"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// 表头行 + 数据行;首行为列名
fn sheet_xml(table: &DataTable) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        r#"<sheetData>"#,
    ));

    push_row_xml(&mut xml, 1, table.columns().iter().map(|c| (c.as_str(), false)));
    for (row_idx, row) in table.rows().iter().enumerate() {
        push_row_xml(
            &mut xml,
            row_idx + 2,
            row.iter().map(|v| (v.as_str(), DataCleaner::is_numeric(v))),
        );
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row_xml<'a>(xml: &mut String, row_num: usize, cells: impl Iterator<Item = (&'a str, bool)>) {
    xml.push_str(&format!(r#"<row r="{row_num}">"#));
    for (col_idx, (value, numeric)) in cells.enumerate() {
        let cell_ref = format!("{}{}", column_letters(col_idx), row_num);
        if numeric {
            xml.push_str(&format!(
                r#"<c r="{cell_ref}"><v>{}</v></c>"#,
                value.trim()
            ));
        } else if value.is_empty() {
            xml.push_str(&format!(r#"<c r="{cell_ref}" t="inlineStr"><is><t/></is></c>"#));
        } else {
            xml.push_str(&format!(
                r#"<c r="{cell_ref}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                escape_xml(value)
            ));
        }
    }
    xml.push_str("</row>");
}

/// 0 基列下标 → Excel 列号(A, B, …, Z, AA, …)
fn column_letters(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).expect("列号仅含 A-Z")
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
