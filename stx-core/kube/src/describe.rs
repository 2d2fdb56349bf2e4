//! describe node 分段解析器
//!
//! `kubectl describe node` 是行式分段文本：顶层 `Key:` 行起新段，
//! 后续缩进行归属当前段。按固定的段头集合扫描，逐段用各自的
//! 子解析器收敛成 [`NodeDescription`]。

use serde::{Deserialize, Serialize};
use tracing::debug;

use stx_tabular::TableParser;

use crate::error::{KubeError, Result};

/// 认识的段头集合；不在集合内的顶层行并入当前段
const SECTION_HEADERS: [&str; 18] = [
    "Name:",
    "Roles:",
    "Labels:",
    "Annotations:",
    "CreationTimestamp:",
    "Taints:",
    "Unschedulable:",
    "Lease:",
    "Conditions:",
    "Addresses:",
    "Capacity:",
    "Allocatable:",
    "System Info:",
    "PodCIDR:",
    "PodCIDRs:",
    "Non-terminated Pods:",
    "Allocated resources:",
    "Events:",
];

/// Allocated resources 子表的允许表头集合
const ALLOCATED_HEADERS: [&str; 3] = ["Resource", "Requests", "Limits"];

/// Capacity / Allocatable 段的资源集合
///
/// cpu 与 pods 是整数；memory / 存储 / 大页保持 kubectl 的
/// 量纲文本；带 `/` 的扩展资源（isolcpus、SR-IOV 池）是整数。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSet {
    /// CPU 个数
    pub cpu: Option<u64>,
    /// Pod 容量
    pub pods: Option<u64>,
    /// 内存量（如 `191721324Ki`）
    pub memory: Option<String>,
    /// 临时存储量
    pub ephemeral_storage: Option<String>,
    /// 大页条目（`hugepages-1Gi` 等，值保持原文）
    pub hugepages: Vec<(String, String)>,
    /// 扩展资源条目（键带 `/`，值为整数）
    pub extended: Vec<(String, u64)>,
}

impl ResourceSet {
    /// 按名取扩展资源数量
    pub fn extended_count(&self, name: &str) -> Option<u64> {
        self.extended
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    fn parse(lines: &[String]) -> Result<Self> {
        let mut set = ResourceSet::default();
        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let (key, value) = trimmed.split_once(':').ok_or_else(|| {
                KubeError::Describe(format!("资源行缺少冒号: {trimmed:?}"))
            })?;
            let key = key.trim();
            let value = value.trim();
            match key {
                "cpu" => set.cpu = Some(parse_count(key, value)?),
                "pods" => set.pods = Some(parse_count(key, value)?),
                "memory" => set.memory = Some(value.to_string()),
                "ephemeral-storage" => set.ephemeral_storage = Some(value.to_string()),
                k if k.starts_with("hugepages-") => {
                    set.hugepages.push((k.to_string(), value.to_string()));
                }
                k if k.contains('/') => {
                    set.extended.push((k.to_string(), parse_count(k, value)?));
                }
                k => {
                    debug!("资源段未认识的键, 按大页条目保留: {}", k);
                    set.hugepages.push((k.to_string(), value.to_string()));
                }
            }
        }
        Ok(set)
    }
}

fn parse_count(key: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|_| KubeError::Describe(format!(
        "资源 {key} 的值不是整数: {value:?}"
    )))
}

/// Allocated resources 子表的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatedResource {
    /// 资源名
    pub resource: String,
    /// 已请求量（含百分比注记的原始文本）
    pub requests: String,
    /// 限制量
    pub limits: String,
}

/// `kubectl describe node` 的类型化视图
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// 节点名
    pub name: String,
    /// 角色
    pub roles: String,
    /// 标签列表
    pub labels: Vec<String>,
    /// 注解列表
    pub annotations: Vec<String>,
    /// 创建时间原始文本
    pub creation_timestamp: Option<String>,
    /// 物理容量
    pub capacity: ResourceSet,
    /// 可分配容量
    pub allocatable: ResourceSet,
    /// 已分配资源子表
    pub allocated_resources: Vec<AllocatedResource>,
}

impl NodeDescription {
    /// 解析 `kubectl describe node` 输出
    pub fn parse(lines: &[String]) -> Result<Self> {
        let sections = split_sections(lines);
        if sections.is_empty() {
            return Err(KubeError::Describe("输出不含任何已知段头".to_string()));
        }

        let mut desc = NodeDescription::default();
        for (header, body) in &sections {
            match header.as_str() {
                "Name:" => desc.name = single_value(body),
                "Roles:" => desc.roles = single_value(body),
                "CreationTimestamp:" => desc.creation_timestamp = Some(single_value(body)),
                "Labels:" => desc.labels = list_values(body),
                "Annotations:" => desc.annotations = list_values(body),
                "Capacity:" => desc.capacity = ResourceSet::parse(&body[1..])?,
                "Allocatable:" => desc.allocatable = ResourceSet::parse(&body[1..])?,
                "Allocated resources:" => {
                    desc.allocated_resources = parse_allocated(&body[1..])?;
                }
                _ => {}
            }
        }

        if desc.name.is_empty() {
            return Err(KubeError::Describe("缺少 Name 段".to_string()));
        }
        Ok(desc)
    }

    /// 按资源名查已分配条目
    pub fn allocated(&self, resource: &str) -> Option<&AllocatedResource> {
        self.allocated_resources
            .iter()
            .find(|r| r.resource == resource)
    }
}

/// 按段头切分：返回 (段头, 段内行) 序列，段内行含段头行自身
fn split_sections(lines: &[String]) -> Vec<(String, Vec<String>)> {
    let mut sections: Vec<(String, Vec<String>)> = Vec::new();
    for line in lines {
        let header = SECTION_HEADERS
            .iter()
            .find(|h| !line.starts_with(' ') && line.starts_with(**h));
        match header {
            Some(h) => sections.push((h.to_string(), vec![line.clone()])),
            None => {
                if let Some((_, body)) = sections.last_mut() {
                    body.push(line.clone());
                }
                // 首个段头之前的行丢弃
            }
        }
    }
    sections
}

/// 单值段：剥掉段头前缀后裁剪
fn single_value(body: &[String]) -> String {
    let first = &body[0];
    match first.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => String::new(),
    }
}

/// 列表段（Labels / Annotations）：首行剥前缀，续行缩进，每行一项
fn list_values(body: &[String]) -> Vec<String> {
    let mut values = Vec::new();
    let first = single_value(body);
    if !first.is_empty() && first != "<none>" {
        values.push(first);
    }
    for line in &body[1..] {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            values.push(trimmed.to_string());
        }
    }
    values
}

/// Allocated resources 段：去掉前言行和 `----` 分隔行后回灌表格解析器
fn parse_allocated(body: &[String]) -> Result<Vec<AllocatedResource>> {
    let table_lines: Vec<String> = body
        .iter()
        .map(|l| l.trim_end().to_string())
        .filter(|l| {
            let t = l.trim();
            !t.is_empty()
                && !t.starts_with('(')
                && !t.chars().all(|c| c == '-' || c.is_whitespace())
        })
        .collect();

    if table_lines.is_empty() {
        return Ok(Vec::new());
    }

    // 段内行带统一缩进，对齐列切片不受影响
    let table = TableParser::new(ALLOCATED_HEADERS).parse(&table_lines)?;
    Ok(table
        .records()
        .iter()
        .map(|r| AllocatedResource {
            resource: r.get_or_empty("Resource").to_string(),
            requests: r.get_or_empty("Requests").to_string(),
            limits: r.get_or_empty("Limits").to_string(),
        })
        .collect())
}
