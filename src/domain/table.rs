// ==========================================
// 经销商配件报表引擎 - 通用表格模型
// ==========================================
// 职责: 列名 + 字符串单元格的有序表格
// 红线: 无文件 I/O,无业务规则
// ==========================================

use serde::Serialize;

// ==========================================
// DataTable - 原始/归一化表格
// ==========================================
// 用途: 读取层输出原始表,归一化层重命名列,引擎层按列名取值
// 不变量: 每行宽度等于列数(写入时补齐/截断)
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// 创建空表(仅列名)
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 从列名与行数据创建,行宽度按列数补齐/截断
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// 数据行数(不含表头)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 追加一行,宽度不足补空串,超出截断
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// 按列名查找列下标(重名列取首个)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// 取单元格,列不存在返回 None
    pub fn cell(&self, row_idx: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.rows.get(row_idx).map(|r| r[col].as_str())
    }

    /// 按位置套用规范列名
    ///
    /// - 原始列数少于规范列表: 仅套用前缀(有损截断,可接受)
    /// - 原始列数多于规范列表: 丢弃多余列,保持"同类表列集固定"的不变量
    ///
    /// 对已规范化的表重复调用结果不变(幂等)
    pub fn apply_canonical_names(&mut self, names: &[&str]) {
        let keep = self.columns.len().min(names.len());
        self.columns = names[..keep].iter().map(|s| s.to_string()).collect();
        for row in &mut self.rows {
            row.truncate(keep);
        }
    }

    /// 追加常量列(每行同一值)
    pub fn append_constant_column(&mut self, name: &str, value: &str) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.to_string());
        }
    }

    /// 按 (源列名, 目标列名) 选取并重命名列;任一源列缺失返回 None
    pub fn select(&self, mapping: &[(&str, &str)]) -> Option<DataTable> {
        let mut indices = Vec::with_capacity(mapping.len());
        for (source, _) in mapping {
            indices.push(self.column_index(source)?);
        }

        let columns = mapping.iter().map(|(_, target)| target.to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Some(DataTable::from_rows(columns, rows))
    }

    /// 仅保留满足谓词的行
    pub fn retain_rows<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&[String]) -> bool,
    {
        self.rows.retain(|row| predicate(row));
    }

    /// 原地改写某列的每个单元格
    pub fn map_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if let Some(col) = self.column_index(name) {
            for row in &mut self.rows {
                row[col] = f(&row[col]);
            }
        }
    }

    /// 纵向合并多张表,列按名取并集(首见顺序),缺失单元格置空
    ///
    /// 同一种类的表在有损截断后列数可能不同,与 pandas concat 语义对齐
    pub fn concat_union(tables: &[DataTable]) -> DataTable {
        let mut columns: Vec<String> = Vec::new();
        for table in tables {
            for col in &table.columns {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }

        let mut merged = DataTable::new(columns);
        for table in tables {
            let indices: Vec<Option<usize>> = merged
                .columns
                .iter()
                .map(|c| table.column_index(c))
                .collect();
            for row in &table.rows {
                let out = indices
                    .iter()
                    .map(|idx| idx.map(|i| row[i].clone()).unwrap_or_default())
                    .collect();
                merged.push_row(out);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut table = DataTable::new(s(&["A", "B", "C"]));
        table.push_row(s(&["1"]));
        table.push_row(s(&["1", "2", "3", "4"]));

        assert_eq!(table.rows()[0], s(&["1", "", ""]));
        assert_eq!(table.rows()[1], s(&["1", "2", "3"]));
    }

    #[test]
    fn test_canonical_names_truncated_to_raw_width() {
        let mut table = DataTable::from_rows(s(&["x", "y"]), vec![s(&["1", "2"])]);
        table.apply_canonical_names(&["A", "B", "C", "D"]);

        assert_eq!(table.columns(), s(&["A", "B"]));
        assert_eq!(table.rows()[0], s(&["1", "2"]));
    }

    #[test]
    fn test_canonical_names_drop_surplus_columns() {
        let mut table = DataTable::from_rows(s(&["x", "y", "z"]), vec![s(&["1", "2", "3"])]);
        table.apply_canonical_names(&["A", "B"]);

        assert_eq!(table.columns(), s(&["A", "B"]));
        assert_eq!(table.rows()[0], s(&["1", "2"]));
    }

    #[test]
    fn test_canonical_names_idempotent() {
        let mut table = DataTable::from_rows(s(&["x", "y"]), vec![s(&["1", "2"])]);
        table.apply_canonical_names(&["A", "B"]);
        let first = table.columns().to_vec();
        table.apply_canonical_names(&["A", "B"]);

        assert_eq!(table.columns(), first);
    }

    #[test]
    fn test_select_missing_column_is_none() {
        let table = DataTable::from_rows(s(&["A"]), vec![s(&["1"])]);
        assert!(table.select(&[("A", "a"), ("B", "b")]).is_none());
    }

    #[test]
    fn test_concat_union_fills_missing_cells() {
        let left = DataTable::from_rows(s(&["A", "B"]), vec![s(&["1", "2"])]);
        let right = DataTable::from_rows(s(&["A", "C"]), vec![s(&["3", "4"])]);

        let merged = DataTable::concat_union(&[left, right]);
        assert_eq!(merged.columns(), s(&["A", "B", "C"]));
        assert_eq!(merged.rows()[0], s(&["1", "2", ""]));
        assert_eq!(merged.rows()[1], s(&["3", "", "4"]));
    }
}
