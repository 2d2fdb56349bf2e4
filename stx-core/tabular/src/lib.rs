//! STX 表格解析器
//!
//! 将平台工具（`system`、`fm`、`kubectl`、`dcmanager` 等）的
//! 异构对齐列文本输出解析为结构化记录，提供：
//! - 对齐列表格解析（表头检测、列边界切片、续行合并）
//! - 两列属性表解析（show 命令输出，可选类型收敛）
//! - 记录过滤与投影（全等 / 子串 / 正则，集合匹配，反选）
//!
//! # 示例
//!
//! ```ignore
//! use stx_tabular::{TableParser, FilterSpec, project_one};
//!
//! let table = TableParser::new(["NAME", "STATUS", "AGE"]).parse(&lines)?;
//! let active = FilterSpec::new()
//!     .field("STATUS", "Active")
//!     .apply(table.records())?;
//! let names = project_one(&active, "NAME")?;
//! ```

mod error;
mod filter;
mod header;
mod properties;
mod record;
mod table;

pub use error::{Result, TableError};
pub use filter::{columns, project, project_one, single, FilterSpec, Matcher};
pub use header::Header;
pub use properties::{split_csv, PropertyParser, PropertyTable, PropertyValue};
pub use record::Record;
pub use table::{strip_borders, Table, TableParser};
