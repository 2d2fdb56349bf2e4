//! 对齐列表格解析器
//!
//! 解析 `system host-list`、`kubectl get pods`、`dcmanager subcloud list`
//! 等命令的固定宽度对齐列输出。第一行视为表头行，其余非空行按表头
//! 列边界切片取值。
//!
//! # 输出格式示例
//!
//! ```text
//! NAME                STATUS   AGE
//! armada              Active   18d
//! cert-manager        Active   18d
//! ```

use tracing::debug;

use crate::error::{Result, TableError};
use crate::header::{detect_headers, slice_cols, Header};
use crate::record::Record;

/// 解析完成的表格
///
/// 记录顺序与输出行顺序一致；所有记录的键集合等于检测到的表头集合。
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<Header>,
    records: Vec<Record>,
}

impl Table {
    /// 按列顺序返回表头描述
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// 按行顺序返回记录
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// 取出记录列表（消费表格）
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// 记录数量
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否没有任何记录
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 对齐列表格解析器
///
/// 每个命令适配器持有自己的允许表头集合。输出中出现集合之外的列时
/// 解析立即失败，不会静默丢弃列。
#[derive(Debug, Clone)]
pub struct TableParser {
    possible_headers: Vec<String>,
    merge_continuation: bool,
}

impl TableParser {
    /// 创建解析器
    ///
    /// # Arguments
    /// * `possible_headers` - 此命令已知的表头标签集合
    pub fn new<I, S>(possible_headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            possible_headers: possible_headers.into_iter().map(Into::into).collect(),
            merge_continuation: false,
        }
    }

    /// 开启续行合并模式
    ///
    /// 首列切片全为空白的物理行视为上一条记录的延续，
    /// 续行的值以单个空格连接到对应字段之后。
    pub fn merge_continuation_lines(mut self, enabled: bool) -> Self {
        self.merge_continuation = enabled;
        self
    }

    /// 解析输出行
    ///
    /// 只有表头没有数据行时返回空表，不报错。
    ///
    /// # Errors
    /// 表头检测失败或行列错位时返回 [`TableError`]。
    pub fn parse(&self, lines: &[String]) -> Result<Table> {
        // 跳过前导空行定位表头行
        let mut iter = lines.iter();
        let header_line = loop {
            match iter.next() {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
                None => {
                    return Err(TableError::Parse("输出为空，没有表头行".to_string()));
                }
            }
        };

        let max_line_len = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        let labels: Vec<&str> = self.possible_headers.iter().map(String::as_str).collect();
        let headers = detect_headers(header_line, &labels, max_line_len)?;

        let mut records: Vec<Record> = Vec::new();

        for line in iter {
            if line.trim().is_empty() || is_separator_line(line) {
                continue;
            }

            if self.merge_continuation && !records.is_empty() {
                let first = &headers[0];
                let first_cell = slice_cols(line, first.start_col, first.end_col);
                if first_cell.trim().is_empty() {
                    let last = records
                        .last_mut()
                        .ok_or_else(|| TableError::Parse("续行之前没有记录".to_string()))?;
                    for header in &headers {
                        let value = extract_value(line, header);
                        last.append_value(&header.name, &value);
                    }
                    continue;
                }
            }

            let mut record = Record::new();
            for header in &headers {
                record.push(header.name.clone(), extract_value(line, header));
            }
            records.push(record);
        }

        debug!(
            "表格解析完成: {} 个表头, {} 条记录",
            headers.len(),
            records.len()
        );

        Ok(Table { headers, records })
    }
}

/// 按表头边界提取并裁剪一个单元格的值
fn extract_value(line: &str, header: &Header) -> String {
    slice_cols(line, header.start_col, header.end_col)
        .trim()
        .to_string()
}

/// 是否为分隔线（仅由 `-`、`=`、`+` 组成的行）
fn is_separator_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| matches!(c, '-' | '=' | '+'))
}

/// 去除表格边框
///
/// `system`、`fm`、`dcmanager` 等工具输出带边框的表格
/// （`+----+` 分隔行与 `|` 竖线列分隔）。分隔行丢弃，竖线替换为
/// 空格以保持列对齐，结果可直接交给 [`TableParser`]。
pub fn strip_borders(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|l| !is_separator_line(l))
        .map(|l| l.replace('|', " "))
        .collect()
}
