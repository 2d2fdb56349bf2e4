//! 表格解析错误定义

use thiserror::Error;

/// 表格解析操作结果类型
pub type Result<T> = std::result::Result<T, TableError>;

/// 表格解析错误类型
#[derive(Error, Debug)]
pub enum TableError {
    /// 输出中出现了 TOA 允许列表之外的表头（命令新增了列）
    #[error("未知表头: {0}")]
    UnknownHeader(String),

    /// 表头检测失败或行列错位
    #[error("解析错误: {0}")]
    Parse(String),

    /// 查询未匹配到任何记录
    #[error("未找到匹配记录: {0}")]
    NotFound(String),

    /// 单值查询匹配到零条或多条记录
    #[error("字段 {field} 匹配记录数不唯一: {matched} 条")]
    NotUnique {
        /// 查询的字段名
        field: String,
        /// 实际匹配的记录数
        matched: usize,
    },

    /// 过滤条件中的正则表达式无法编译
    #[error("无效的正则表达式: {0}")]
    InvalidRegex(String),
}
