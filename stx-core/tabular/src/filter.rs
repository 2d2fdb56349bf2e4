//! 记录过滤与投影
//!
//! 过滤条件是显式的值对象：字段名到匹配器的有序列表，外加三个
//! 正交修饰（`strict`、`regex`、`exclude`）。匹配语义：
//!
//! | regex | strict | 语义 |
//! |---|---|---|
//! | 否 | 是 | 忽略大小写全等 |
//! | 否 | 否 | 忽略大小写子串 |
//! | 是 | 是 | 锚定正则（全匹配） |
//! | 是 | 否 | 非锚定正则（搜索） |
//!
//! 集合匹配器在同一规则下对元素取或。记录缺失被匹配字段时视为
//! 不匹配，不会被静默忽略。过滤保持记录顺序。

use regex::RegexBuilder;
use tracing::debug;

use crate::error::{Result, TableError};
use crate::record::Record;

/// 单个字段的匹配器
#[derive(Debug, Clone)]
pub enum Matcher {
    /// 标量匹配
    Scalar(String),
    /// 集合匹配（任一元素命中即命中）
    OneOf(Vec<String>),
}

impl Matcher {
    /// 展开为候选值列表
    fn candidates(&self) -> &[String] {
        match self {
            Matcher::Scalar(v) => std::slice::from_ref(v),
            Matcher::OneOf(vs) => vs.as_slice(),
        }
    }
}

impl From<&str> for Matcher {
    fn from(value: &str) -> Self {
        Matcher::Scalar(value.to_string())
    }
}

impl From<String> for Matcher {
    fn from(value: String) -> Self {
        Matcher::Scalar(value)
    }
}

impl From<Vec<String>> for Matcher {
    fn from(values: Vec<String>) -> Self {
        Matcher::OneOf(values)
    }
}

impl From<Vec<&str>> for Matcher {
    fn from(values: Vec<&str>) -> Self {
        Matcher::OneOf(values.into_iter().map(str::to_string).collect())
    }
}

/// 过滤条件
///
/// 所有字段条件同时成立记录才算命中（逻辑与）。
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    fields: Vec<(String, Matcher)>,
    strict: bool,
    regex: bool,
    exclude: bool,
}

impl FilterSpec {
    /// 创建空条件（匹配所有记录）
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            strict: true,
            regex: false,
            exclude: false,
        }
    }

    /// 追加一个字段条件
    pub fn field(mut self, name: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.fields.push((name.into(), matcher.into()));
        self
    }

    /// 设置严格模式（标量全等 / 正则全匹配）
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 将匹配器按正则表达式处理
    pub fn regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    /// 反选：保留不命中的记录
    pub fn exclude(mut self, exclude: bool) -> Self {
        self.exclude = exclude;
        self
    }

    /// 应用过滤，保持记录顺序
    ///
    /// # Errors
    /// 正则模式下匹配器无法编译时返回 [`TableError::InvalidRegex`]。
    pub fn apply(&self, records: &[Record]) -> Result<Vec<Record>> {
        let mut kept = Vec::new();

        for record in records {
            let mut matched = true;
            for (field, matcher) in &self.fields {
                let value = match record.get(field) {
                    Some(v) => v,
                    // 字段缺失视为不匹配
                    None => {
                        matched = false;
                        break;
                    }
                };
                if !self.value_matches(value, matcher)? {
                    matched = false;
                    break;
                }
            }

            if matched != self.exclude {
                kept.push(record.clone());
            }
        }

        debug!(
            "过滤完成: 输入 {} 条, 保留 {} 条 (exclude={})",
            records.len(),
            kept.len(),
            self.exclude
        );
        Ok(kept)
    }

    /// 单值匹配判定
    fn value_matches(&self, value: &str, matcher: &Matcher) -> Result<bool> {
        for candidate in matcher.candidates() {
            let hit = if self.regex {
                let pattern = if self.strict {
                    format!("^(?:{})$", candidate)
                } else {
                    candidate.clone()
                };
                let re = RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| TableError::InvalidRegex(format!("{}: {}", candidate, e)))?;
                re.is_match(value)
            } else {
                let value_lower = value.to_lowercase();
                let candidate_lower = candidate.to_lowercase();
                if self.strict {
                    value_lower == candidate_lower
                } else {
                    value_lower.contains(&candidate_lower)
                }
            };
            if hit {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// 投影单个字段
///
/// # Errors
/// 任一记录缺失该字段时返回 [`TableError::NotFound`]。
pub fn project_one(records: &[Record], field: &str) -> Result<Vec<String>> {
    records
        .iter()
        .map(|r| {
            r.get(field)
                .map(str::to_string)
                .ok_or_else(|| TableError::NotFound(format!("字段 {} 不存在", field)))
        })
        .collect()
}

/// 投影多个字段，每条记录产出一个值元组（按字段顺序）
pub fn project(records: &[Record], fields: &[&str]) -> Result<Vec<Vec<String>>> {
    records
        .iter()
        .map(|r| {
            fields
                .iter()
                .map(|f| {
                    r.get(f)
                        .map(str::to_string)
                        .ok_or_else(|| TableError::NotFound(format!("字段 {} 不存在", f)))
                })
                .collect()
        })
        .collect()
}

/// 按列投影：字段名到该列所有值的映射（保持字段顺序）
pub fn columns(records: &[Record], fields: &[&str]) -> Result<Vec<(String, Vec<String>)>> {
    fields
        .iter()
        .map(|f| Ok(((*f).to_string(), project_one(records, f)?)))
        .collect()
}

/// 单值查询
///
/// # Errors
/// 记录数不为 1 时返回 [`TableError::NotUnique`]。
pub fn single(records: &[Record], field: &str) -> Result<String> {
    if records.len() != 1 {
        return Err(TableError::NotUnique {
            field: field.to_string(),
            matched: records.len(),
        });
    }
    records[0]
        .get(field)
        .map(str::to_string)
        .ok_or_else(|| TableError::NotFound(format!("字段 {} 不存在", field)))
}
