//! 两列属性表解析器
//!
//! 解析 `<tool> show <entity>` 风格的两列输出（`Property | Value`），
//! 坍缩成属性名到值的平面映射。内部复用对齐列表格解析器，
//! 表头允许集合固定为 `{"Property", "Value"}`。
//!
//! # 输出格式示例
//!
//! ```text
//! +--------------------+--------------------------------------+
//! | Property           | Value                                |
//! +--------------------+--------------------------------------+
//! | uuid               | 0dd0a2d3-a3d6-4a8e-b0fc-7efc17f56a9e |
//! | nameservers        | 8.8.8.8,1.1.1.1                      |
//! +--------------------+--------------------------------------+
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::table::TableParser;

/// 属性值
///
/// 默认全部为字符串；按调用开启类型收敛后，匹配整数、浮点、
/// 布尔或 `None` 模式的值被转换为对应类型，其余保持字符串。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// 字符串值
    Str(String),
    /// 整数值
    Int(i64),
    /// 浮点值
    Float(f64),
    /// 布尔值
    Bool(bool),
    /// 空值（CLI 输出中的 `None`）
    None,
}

impl PropertyValue {
    /// 按类型收敛规则解释一个原始字符串
    fn coerced(raw: &str) -> Self {
        match raw {
            "None" | "none" => return PropertyValue::None,
            "True" | "true" => return PropertyValue::Bool(true),
            "False" | "false" => return PropertyValue::Bool(false),
            _ => {}
        }
        if let Ok(n) = raw.parse::<i64>() {
            return PropertyValue::Int(n);
        }
        if raw.contains('.') {
            if let Ok(f) = raw.parse::<f64>() {
                return PropertyValue::Float(f);
            }
        }
        PropertyValue::Str(raw.to_string())
    }

    /// 以字符串视图取值（非字符串类型返回 None）
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 以整数取值
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// 以布尔取值
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 是否为空值
    pub fn is_none(&self) -> bool {
        matches!(self, PropertyValue::None)
    }
}

/// 属性表：属性名到值的有序映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyTable {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyTable {
    /// 按属性名取值
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// 按属性名取字符串值（值为其他类型时返回 None）
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_str)
    }

    /// 是否包含某属性
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// 按插入顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// 属性数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 逗号分隔值拆分辅助（`nameservers=8.8.8.8,1.1.1.1` 一类的值）
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 两列属性表解析器
#[derive(Debug, Clone, Default)]
pub struct PropertyParser {
    merge_lines: bool,
    coerce: bool,
}

impl PropertyParser {
    /// 创建解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并跨行换行的值
    ///
    /// `Property` 单元格为空的行视为上一个属性值的延续，
    /// 以单个空格连接。
    pub fn merge_lines(mut self, enabled: bool) -> Self {
        self.merge_lines = enabled;
        self
    }

    /// 开启值类型收敛（整数 / 浮点 / 布尔 / None）
    pub fn coerce(mut self, enabled: bool) -> Self {
        self.coerce = enabled;
        self
    }

    /// 解析 show 命令输出
    pub fn parse(&self, lines: &[String]) -> Result<PropertyTable> {
        // 去掉表格边框：纯分隔线行丢弃，竖线替换为空格保持列对齐
        let prepared = crate::table::strip_borders(lines);

        let table = TableParser::new(["Property", "Value"]).parse(&prepared)?;

        let mut entries: Vec<(String, PropertyValue)> = Vec::new();
        for record in table.records() {
            let name = record.get_or_empty("Property");
            let value = record.get_or_empty("Value");

            if name.is_empty() {
                if self.merge_lines {
                    if let Some((_, last)) = entries.last_mut() {
                        merge_wrapped(last, value);
                    }
                } else {
                    debug!("丢弃无属性名的换行值: {:?}", value);
                }
                continue;
            }

            let value = if self.coerce {
                PropertyValue::coerced(value)
            } else {
                PropertyValue::Str(value.to_string())
            };
            entries.push((name.to_string(), value));
        }

        debug!("属性表解析完成: {} 个属性", entries.len());
        Ok(PropertyTable { entries })
    }
}

/// 将换行延续的片段接到既有值之后
fn merge_wrapped(last: &mut PropertyValue, extra: &str) {
    if extra.is_empty() {
        return;
    }
    if let PropertyValue::Str(s) = last {
        if s.is_empty() {
            *s = extra.to_string();
        } else {
            s.push(' ');
            s.push_str(extra);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .skip_while(|l| l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }

    const DNS_SHOW: &str = r#"
+--------------------+--------------------------------------+
| Property           | Value                                |
+--------------------+--------------------------------------+
| uuid               | 0dd0a2d3-a3d6-4a8e-b0fc-7efc17f56a9e |
| nameservers        | 8.8.8.8,1.1.1.1                      |
| created_at         | 2026-01-12T14:03:22.000000           |
| updated_at         | None                                 |
+--------------------+--------------------------------------+
"#;

    #[test]
    fn test_parse_show_output() {
        let props = PropertyParser::new().parse(&lines(DNS_SHOW)).unwrap();

        assert_eq!(props.len(), 4);
        assert_eq!(props.get_str("nameservers"), Some("8.8.8.8,1.1.1.1"));
        assert_eq!(props.get_str("updated_at"), Some("None"));
    }

    #[test]
    fn test_split_csv_helper() {
        let props = PropertyParser::new().parse(&lines(DNS_SHOW)).unwrap();
        let servers = split_csv(props.get_str("nameservers").unwrap());
        assert_eq!(servers, vec!["8.8.8.8", "1.1.1.1"]);
    }

    #[test]
    fn test_coercion() {
        let output = lines(
            r#"
| Property    | Value   |
| retries     | 3       |
| ratio       | 0.75    |
| enabled     | True    |
| parent      | None    |
| name        | oamnet  |
"#,
        );
        let props = PropertyParser::new().coerce(true).parse(&output).unwrap();

        assert_eq!(props.get("retries"), Some(&PropertyValue::Int(3)));
        assert_eq!(props.get("ratio"), Some(&PropertyValue::Float(0.75)));
        assert_eq!(props.get("enabled"), Some(&PropertyValue::Bool(true)));
        assert!(props.get("parent").unwrap().is_none());
        assert_eq!(props.get_str("name"), Some("oamnet"));
    }

    #[test]
    fn test_merge_wrapped_lines() {
        let output = lines(
            r#"
| Property    | Value                          |
| capabilities| region_config: False           |
|             | sdn_enabled: False             |
|             | shared_services: []            |
| uuid        | abc-123                        |
"#,
        );
        let props = PropertyParser::new()
            .merge_lines(true)
            .parse(&output)
            .unwrap();

        assert_eq!(props.len(), 2);
        assert_eq!(
            props.get_str("capabilities"),
            Some("region_config: False sdn_enabled: False shared_services: []")
        );
        assert_eq!(props.get_str("uuid"), Some("abc-123"));
    }

    #[test]
    fn test_wrapped_lines_dropped_without_merge() {
        let output = lines(
            r#"
| Property    | Value        |
| a           | one          |
|             | two          |
"#,
        );
        let props = PropertyParser::new().parse(&output).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get_str("a"), Some("one"));
    }
}
