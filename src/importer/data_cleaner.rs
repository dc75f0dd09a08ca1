// ==========================================
// 经销商配件报表引擎 - 数据清洗器
// ==========================================
// 职责: 数值宽容转换 / 日期宽容解析 / 配件号清洗 / 单元格数值格式化
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};

/// 日期时间格式(整串匹配,优先尝试)
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// 日期格式,兼容 DMS 导出的 2 位/4 位年份写法
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d/%m/%Y",
];

pub struct DataCleaner;

impl DataCleaner {
    /// 宽容数值转换: 非数值/缺失一律按 0 处理
    ///
    /// 派生字段(transit、T/F)的求和与比较依赖该语义
    pub fn to_num(value: &str) -> f64 {
        value.trim().parse::<f64>().unwrap_or(0.0)
    }

    /// 判断单元格是否可作为数值导出
    pub fn is_numeric(value: &str) -> bool {
        let trimmed = value.trim();
        !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
    }

    /// 数值格式化为单元格文本,整数值不带小数点
    pub fn fmt_num(value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            format!("{}", value)
        }
    }

    /// 宽容日期解析,失败返回 None(调用方将该行移出日期窗口)
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                return Some(dt.date());
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }

        // 带时间后缀但格式未覆盖时,退回只解析日期部分
        if let Some(first) = trimmed.split_whitespace().next() {
            if first != trimmed {
                for fmt in DATE_FORMATS {
                    if let Ok(date) = NaiveDate::parse_from_str(first, fmt) {
                        return Some(date);
                    }
                }
            }
        }
        None
    }

    /// 配件号清洗: 去首尾空白
    pub fn clean_part_number(value: &str) -> String {
        value.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_num_coerces_invalid_to_zero() {
        assert_eq!(DataCleaner::to_num("5"), 5.0);
        assert_eq!(DataCleaner::to_num(" 2.5 "), 2.5);
        assert_eq!(DataCleaner::to_num(""), 0.0);
        assert_eq!(DataCleaner::to_num("abc"), 0.0);
        assert_eq!(DataCleaner::to_num("-3"), -3.0);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(DataCleaner::fmt_num(5.0), "5");
        assert_eq!(DataCleaner::fmt_num(2.5), "2.5");
        assert_eq!(DataCleaner::fmt_num(0.0), "0");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert_eq!(DataCleaner::parse_date("2025-01-20"), Some(expected));
        assert_eq!(DataCleaner::parse_date("2025/01/20"), Some(expected));
        assert_eq!(DataCleaner::parse_date("20250120"), Some(expected));
        assert_eq!(DataCleaner::parse_date("20-Jan-2025"), Some(expected));
        assert_eq!(DataCleaner::parse_date("20-Jan-25"), Some(expected));
        assert_eq!(DataCleaner::parse_date("01/20/2025"), Some(expected));
        assert_eq!(DataCleaner::parse_date("2025-01-20 00:00:00"), Some(expected));
    }

    #[test]
    fn test_parse_date_invalid_is_none() {
        assert_eq!(DataCleaner::parse_date(""), None);
        assert_eq!(DataCleaner::parse_date("not a date"), None);
        assert_eq!(DataCleaner::parse_date("2025-13-40"), None);
    }

    #[test]
    fn test_clean_part_number() {
        assert_eq!(DataCleaner::clean_part_number("  86350-1W000  "), "86350-1W000");
    }
}
