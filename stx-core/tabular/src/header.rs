//! 表头检测
//!
//! 平台 CLI 的对齐列输出没有显式分隔符，列边界只能从表头行推断。
//! 检测结果对同一表头行是稳定的：同样的输入总是产生同样的表头描述。

use tracing::debug;

use crate::error::{Result, TableError};

/// 表头描述
///
/// `start_col` 为包含下标，`end_col` 为不包含下标（按字符计）。
/// 最右侧表头的 `end_col` 等于整段输出中观察到的最大行长。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// 表头标签
    pub name: String,
    /// 起始列（包含）
    pub start_col: usize,
    /// 结束列（不包含）
    pub end_col: usize,
}

/// 按字符下标切片一行（列位置按字符而非字节计）
pub(crate) fn slice_cols(line: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    line.chars().skip(start).take(end - start).collect()
}

/// 在表头行中检测所有已知标签的位置
///
/// 标签必须位于词边界上：前面是行首或空白，后面是空白或行尾。
/// 该规则保证 `NAME` 不会命中 `NAMESPACE` 的前缀，`AGE` 不会命中
/// `IMAGE` 的后缀。
///
/// # Arguments
/// * `header_line` - 输出的第一行
/// * `possible_headers` - 此命令已知的表头标签集合
/// * `max_line_len` - 整段输出的最大行长（字符数）
///
/// # Errors
/// 表头行含有允许列表之外的标签时返回 [`TableError::UnknownHeader`]；
/// 一个已知标签都没有命中时返回 [`TableError::Parse`]。
pub fn detect_headers(
    header_line: &str,
    possible_headers: &[&str],
    max_line_len: usize,
) -> Result<Vec<Header>> {
    let chars: Vec<char> = header_line.chars().collect();
    let mut headers: Vec<Header> = Vec::new();

    for label in possible_headers {
        for start in find_label_positions(&chars, label) {
            // 同一起始列只保留最长的标签（NAME 与 NAMESPACE 同列起始时取后者）
            if let Some(existing) = headers.iter_mut().find(|h| h.start_col == start) {
                if label.chars().count() > existing.name.chars().count() {
                    existing.name = label.to_string();
                }
            } else {
                headers.push(Header {
                    name: label.to_string(),
                    start_col: start,
                    end_col: 0,
                });
            }
        }
    }

    if headers.is_empty() {
        return Err(TableError::Parse(format!(
            "表头行未命中任何已知标签: {:?}",
            header_line.trim()
        )));
    }

    headers.sort_by_key(|h| h.start_col);

    // 落在更长标签内部的命中是伪命中（NOMINATED NODE 中间的 NODE）
    let spans: Vec<(usize, usize)> = headers
        .iter()
        .map(|h| (h.start_col, h.start_col + h.name.chars().count()))
        .collect();
    let mut index = 0;
    headers.retain(|h| {
        let inner = spans
            .iter()
            .enumerate()
            .any(|(i, (s, e))| i != index && *s < h.start_col && h.start_col < *e);
        index += 1;
        !inner
    });

    // 结束列 = 下一个表头的起始列；最右侧表头延伸到最大行长
    let line_len = chars.len().max(max_line_len);
    for i in 0..headers.len() {
        headers[i].end_col = if i + 1 < headers.len() {
            headers[i + 1].start_col
        } else {
            line_len
        };
    }

    // 表头行自身的首列之前必须全为空白，否则存在未知的前导列
    let leading: String = chars[..headers[0].start_col].iter().collect();
    if !leading.trim().is_empty() {
        return Err(TableError::UnknownHeader(leading.trim().to_string()));
    }

    // 复核：每个切片裁剪后必须与标签完全一致，否则命令新增了未知列
    for header in &headers {
        let sliced = slice_cols(header_line, header.start_col, header.end_col);
        let sliced = sliced.trim();
        if sliced != header.name {
            let unexpected = sliced
                .strip_prefix(header.name.as_str())
                .unwrap_or(sliced)
                .trim();
            return Err(TableError::UnknownHeader(unexpected.to_string()));
        }
    }

    debug!("检测到 {} 个表头: {:?}", headers.len(), headers);
    Ok(headers)
}

/// 查找标签在词边界上的所有起始列
fn find_label_positions(chars: &[char], label: &str) -> Vec<usize> {
    let label_chars: Vec<char> = label.chars().collect();
    let mut positions = Vec::new();

    if label_chars.is_empty() || label_chars.len() > chars.len() {
        return positions;
    }

    for start in 0..=(chars.len() - label_chars.len()) {
        if chars[start..start + label_chars.len()] != label_chars[..] {
            continue;
        }
        let boundary_before = start == 0 || chars[start - 1].is_whitespace();
        let end = start + label_chars.len();
        let boundary_after = end == chars.len() || chars[end].is_whitespace();
        if boundary_before && boundary_after {
            positions.push(start);
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_basic() {
        let line = "NAME                STATUS   AGE";
        let headers = detect_headers(line, &["NAME", "STATUS", "AGE"], line.len()).unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0].name, "NAME");
        assert_eq!(headers[0].start_col, 0);
        assert_eq!(headers[0].end_col, 20);
        assert_eq!(headers[1].name, "STATUS");
        assert_eq!(headers[1].start_col, 20);
        assert_eq!(headers[2].name, "AGE");
        assert_eq!(headers[2].end_col, line.len());
    }

    #[test]
    fn test_detect_is_stable() {
        let line = "NAME      READY   STATUS";
        let first = detect_headers(line, &["NAME", "READY", "STATUS"], 40).unwrap();
        let second = detect_headers(line, &["NAME", "READY", "STATUS"], 40).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_namespace_not_confused_with_name() {
        let line = "NAMESPACE     NAME                READY   STATUS";
        let headers =
            detect_headers(line, &["NAMESPACE", "NAME", "READY", "STATUS"], line.len()).unwrap();

        assert_eq!(headers[0].name, "NAMESPACE");
        assert_eq!(headers[0].start_col, 0);
        assert_eq!(headers[1].name, "NAME");
        assert_eq!(headers[1].start_col, 14);
    }

    #[test]
    fn test_age_not_matched_inside_image() {
        let line = "IMAGE           AGE";
        let headers = detect_headers(line, &["IMAGE", "AGE"], line.len()).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1].start_col, 16);
    }

    #[test]
    fn test_node_not_matched_inside_nominated_node() {
        let line = "NAME       NODE            NOMINATED NODE   READINESS GATES";
        let headers = detect_headers(
            line,
            &["NAME", "NODE", "NOMINATED NODE", "READINESS GATES"],
            line.len(),
        )
        .unwrap();

        assert_eq!(headers.len(), 4);
        assert_eq!(headers[1].name, "NODE");
        assert_eq!(headers[2].name, "NOMINATED NODE");
        assert_eq!(headers[2].start_col, 27);
    }

    #[test]
    fn test_unknown_header_fails_fast() {
        let line = "NAME SURPRISE READY STATUS";
        let err = detect_headers(line, &["NAME", "READY", "STATUS"], line.len()).unwrap_err();
        match err {
            TableError::UnknownHeader(token) => assert_eq!(token, "SURPRISE"),
            other => panic!("期望 UnknownHeader, 实际 {other:?}"),
        }
    }

    #[test]
    fn test_unknown_trailing_header() {
        let line = "NAME READY SURPRISE";
        let err = detect_headers(line, &["NAME", "READY"], line.len()).unwrap_err();
        match err {
            TableError::UnknownHeader(token) => assert_eq!(token, "SURPRISE"),
            other => panic!("期望 UnknownHeader, 实际 {other:?}"),
        }
    }

    #[test]
    fn test_unknown_leading_header() {
        let line = "SURPRISE NAME READY";
        let err = detect_headers(line, &["NAME", "READY"], line.len()).unwrap_err();
        match err {
            TableError::UnknownHeader(token) => assert_eq!(token, "SURPRISE"),
            other => panic!("期望 UnknownHeader, 实际 {other:?}"),
        }
    }

    #[test]
    fn test_no_known_header() {
        let err = detect_headers("FOO BAR", &["NAME"], 10).unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }
}
