//! 网络领域对象
//!
//! `system addrpool-list` / `system network-list` 输出的类型化视图。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::error::{required, Result};

/// `system addrpool-list` 的允许表头集合
pub const ADDRPOOL_LIST_HEADERS: [&str; 5] = ["uuid", "name", "network", "prefix", "ranges"];

/// `system network-list` 的允许表头集合
pub const NETWORK_LIST_HEADERS: [&str; 6] =
    ["id", "uuid", "name", "type", "dynamic", "pool_uuid"];

/// 地址池
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddrPool {
    /// 池 uuid
    pub uuid: String,
    /// 池名
    pub name: String,
    /// 网段地址
    pub network: String,
    /// 前缀长度
    pub prefix: String,
    /// 可分配地址段
    pub ranges: String,
}

impl AddrPool {
    /// 从 `system addrpool-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            uuid: required(record, "AddrPool", "uuid")?.to_string(),
            name: required(record, "AddrPool", "name")?.to_string(),
            network: required(record, "AddrPool", "network")?.to_string(),
            prefix: required(record, "AddrPool", "prefix")?.to_string(),
            ranges: required(record, "AddrPool", "ranges")?.to_string(),
        })
    }
}

/// 平台网络
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// 网络 id
    pub id: String,
    /// 网络 uuid
    pub uuid: String,
    /// 网络名
    pub name: String,
    /// 网络类型（mgmt / oam / cluster-host ...）
    pub net_type: String,
    /// 是否动态分配地址
    pub dynamic: bool,
    /// 关联地址池 uuid
    pub pool_uuid: String,
}

impl Network {
    /// 从 `system network-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: required(record, "Network", "id")?.to_string(),
            uuid: required(record, "Network", "uuid")?.to_string(),
            name: required(record, "Network", "name")?.to_string(),
            net_type: required(record, "Network", "type")?.to_string(),
            dynamic: required(record, "Network", "dynamic")? == "True",
            pool_uuid: required(record, "Network", "pool_uuid")?.to_string(),
        })
    }
}
