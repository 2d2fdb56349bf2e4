//! PTP 实例领域对象
//!
//! `system ptp-instance-list` / `ptp-interface-list` /
//! `ptp-instance-parameter-list` / `ptp-instance-host-list` 输出的
//! 类型化视图。PTP 对象全部保持字符串字段，结构与 CLI 输出一致。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::error::{required, Result};

/// `system ptp-instance-list` 的允许表头集合
pub const PTP_INSTANCE_HEADERS: [&str; 4] = ["uuid", "name", "service", "hostnames"];

/// `system ptp-interface-list` 的允许表头集合
pub const PTP_INTERFACE_HEADERS: [&str; 4] =
    ["uuid", "name", "ptp_instance_name", "interface_names"];

/// `system ptp-instance-parameter-list` 的允许表头集合
pub const PTP_PARAMETER_HEADERS: [&str; 3] = ["uuid", "name", "value"];

/// `system ptp-instance-host-list` 的允许表头集合
pub const PTP_HOST_ASSIGNMENT_HEADERS: [&str; 3] = ["uuid", "name", "hostname"];

/// PTP 实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtpInstance {
    /// 实例 uuid
    pub uuid: String,
    /// 实例名
    pub name: String,
    /// 服务类型（ptp4l / phc2sys / ts2phc）
    pub service: String,
    /// 已分配的主机名（原始文本）
    pub hostnames: String,
}

impl PtpInstance {
    /// 从 `system ptp-instance-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            uuid: required(record, "PtpInstance", "uuid")?.to_string(),
            name: required(record, "PtpInstance", "name")?.to_string(),
            service: required(record, "PtpInstance", "service")?.to_string(),
            hostnames: required(record, "PtpInstance", "hostnames")?.to_string(),
        })
    }
}

/// PTP 接口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtpInterface {
    /// 接口 uuid
    pub uuid: String,
    /// 接口名
    pub name: String,
    /// 所属实例名
    pub instance_name: String,
    /// 绑定的底层接口名（原始文本）
    pub interface_names: String,
}

impl PtpInterface {
    /// 从 `system ptp-interface-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            uuid: required(record, "PtpInterface", "uuid")?.to_string(),
            name: required(record, "PtpInterface", "name")?.to_string(),
            instance_name: required(record, "PtpInterface", "ptp_instance_name")?.to_string(),
            interface_names: required(record, "PtpInterface", "interface_names")?.to_string(),
        })
    }
}

/// PTP 实例参数（`name=value` 对）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtpParameter {
    /// 参数 uuid
    pub uuid: String,
    /// 参数名
    pub name: String,
    /// 参数值
    pub value: String,
}

impl PtpParameter {
    /// 从 `system ptp-instance-parameter-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            uuid: required(record, "PtpParameter", "uuid")?.to_string(),
            name: required(record, "PtpParameter", "name")?.to_string(),
            value: required(record, "PtpParameter", "value")?.to_string(),
        })
    }
}

/// PTP 实例到主机的分配关系
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtpHostAssignment {
    /// 分配 uuid
    pub uuid: String,
    /// 实例名
    pub instance_name: String,
    /// 主机名
    pub hostname: String,
}

impl PtpHostAssignment {
    /// 从 `system ptp-instance-host-list` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            uuid: required(record, "PtpHostAssignment", "uuid")?.to_string(),
            instance_name: required(record, "PtpHostAssignment", "name")?.to_string(),
            hostname: required(record, "PtpHostAssignment", "hostname")?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stx_tabular::{strip_borders, TableParser};

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .skip_while(|l| l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_ptp_instance_list() {
        let output = lines(
            r#"
+--------------------------------------+----------+---------+----------------+
| uuid                                 | name     | service | hostnames      |
+--------------------------------------+----------+---------+----------------+
| 51a2f811-7c3e-4d8b-8f11-3b5c00aa1001 | ptp1     | ptp4l   | ['compute-0']  |
| 8c4be921-11aa-42d3-9e41-77f2cc331002 | phc-inst | phc2sys | []             |
+--------------------------------------+----------+---------+----------------+
"#,
        );
        let prepared = strip_borders(&output);
        let table = TableParser::new(PTP_INSTANCE_HEADERS).parse(&prepared).unwrap();
        let instances: Vec<PtpInstance> = table
            .records()
            .iter()
            .map(|r| PtpInstance::from_record(r).unwrap())
            .collect();

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].service, "ptp4l");
        assert_eq!(instances[1].hostnames, "[]");
    }

    #[test]
    fn test_ptp_parameter_list() {
        let output = lines(
            r#"
+--------------------------------------+--------------+-------+
| uuid                                 | name         | value |
+--------------------------------------+--------------+-------+
| 0b1a4411-9f2c-4f0e-8e21-6cc3dd441001 | domainNumber | 24    |
| 4e2cb522-3a1d-44bb-9f32-8dd4ee551002 | tx_timestamp | 1     |
+--------------------------------------+--------------+-------+
"#,
        );
        let prepared = strip_borders(&output);
        let table = TableParser::new(PTP_PARAMETER_HEADERS).parse(&prepared).unwrap();
        let params: Vec<PtpParameter> = table
            .records()
            .iter()
            .map(|r| PtpParameter::from_record(r).unwrap())
            .collect();

        assert_eq!(params[0].name, "domainNumber");
        assert_eq!(params[0].value, "24");
    }

    #[test]
    fn test_ptp_host_assignment_list() {
        let output = lines(
            r#"
+--------------------------------------+------+-----------+
| uuid                                 | name | hostname  |
+--------------------------------------+------+-----------+
| 7f3dc633-5b2e-4e11-a043-9ee5ff661001 | ptp1 | compute-0 |
+--------------------------------------+------+-----------+
"#,
        );
        let prepared = strip_borders(&output);
        let table = TableParser::new(PTP_HOST_ASSIGNMENT_HEADERS)
            .parse(&prepared)
            .unwrap();
        let assignments: Vec<PtpHostAssignment> = table
            .records()
            .iter()
            .map(|r| PtpHostAssignment::from_record(r).unwrap())
            .collect();

        assert_eq!(assignments[0].instance_name, "ptp1");
        assert_eq!(assignments[0].hostname, "compute-0");
    }
}
