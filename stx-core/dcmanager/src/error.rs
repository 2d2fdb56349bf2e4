//! 分布式云适配器错误定义

use thiserror::Error;

/// 分布式云适配器结果类型
pub type Result<T> = std::result::Result<T, DcManagerError>;

/// 分布式云适配器错误类型
#[derive(Error, Debug)]
pub enum DcManagerError {
    /// 表格解析错误
    #[error("表格解析错误: {0}")]
    Table(#[from] stx_tabular::TableError),

    /// 命令调用错误
    #[error("命令调用错误: {0}")]
    Cli(#[from] stx_cloud_cli::CliError),

    /// 领域对象必需的列在输出中缺失
    #[error("{entity} 缺少必需字段: {field}")]
    MissingField {
        /// 领域对象名
        entity: &'static str,
        /// 缺失的字段
        field: &'static str,
    },

    /// 字段值无法转换为期望类型
    #[error("{entity} 字段 {field} 的值无法解析: {value}")]
    InvalidField {
        /// 领域对象名
        entity: &'static str,
        /// 字段名
        field: &'static str,
        /// 原始值
        value: String,
    },

    /// 目标部署状态不是合法的成功终态
    #[error("非法的部署目标状态: {0}")]
    InvalidTargetState(String),

    /// 查询未找到目标实体
    #[error("未找到: {0}")]
    NotFound(String),
}

/// 从记录中取出必需字段
pub(crate) fn required<'a>(
    record: &'a stx_tabular::Record,
    entity: &'static str,
    field: &'static str,
) -> Result<&'a str> {
    record
        .get(field)
        .ok_or(DcManagerError::MissingField { entity, field })
}
