//! 解析记录类型
//!
//! `Record` 是表头名到裁剪后字符串值的有序映射。
//! 插入顺序即表头行上的列顺序，同一张表中所有记录的键集合完全一致。

use serde::{Deserialize, Serialize};

/// 一行解析结果
///
/// 按约定记录在构造完成后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// 创建空记录
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// 追加一个字段（仅在解析期间使用）
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// 按表头名取值
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// 按表头名取值，字段缺失时返回空字符串
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// 是否包含某字段
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// 将某字段的值与前一次取值合并（续行模式使用）
    ///
    /// 新值非空时以单个空格连接到现有值之后。
    pub(crate) fn append_value(&mut self, name: &str, extra: &str) {
        if extra.is_empty() {
            return;
        }
        if let Some((_, v)) = self.fields.iter_mut().find(|(n, _)| n == name) {
            if v.is_empty() {
                *v = extra.to_string();
            } else {
                v.push(' ');
                v.push_str(extra);
            }
        }
    }

    /// 按插入顺序返回所有键
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// 按插入顺序迭代所有键值对
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// 字段数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空记录
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ordered_keys() {
        let mut record = Record::new();
        record.push("NAME", "controller-0");
        record.push("STATUS", "Active");
        record.push("AGE", "18d");

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["NAME", "STATUS", "AGE"]);
        assert_eq!(record.get("STATUS"), Some("Active"));
        assert_eq!(record.get("MISSING"), None);
        assert_eq!(record.get_or_empty("MISSING"), "");
    }

    #[test]
    fn test_record_append_value() {
        let mut record = Record::new();
        record.push("VALUE", "first");
        record.append_value("VALUE", "second");
        assert_eq!(record.get("VALUE"), Some("first second"));

        record.append_value("VALUE", "");
        assert_eq!(record.get("VALUE"), Some("first second"));
    }

    #[test]
    fn test_record_append_into_empty() {
        let mut record = Record::new();
        record.push("VALUE", "");
        record.append_value("VALUE", "late");
        assert_eq!(record.get("VALUE"), Some("late"));
    }
}
