//! 其余 kubectl 资源行对象
//!
//! Secret、Service、GlobalNetworkPolicy 的类型化行视图。
//! 这些对象只做存在性与字段断言，保持字符串字段。

use serde::{Deserialize, Serialize};

use stx_tabular::Record;

use crate::error::{required, Result};

/// `kubectl get secrets` 的允许表头集合
pub const SECRET_HEADERS: [&str; 4] = ["NAME", "TYPE", "DATA", "AGE"];

/// `kubectl get services` 的允许表头集合
pub const SERVICE_HEADERS: [&str; 6] = [
    "NAME",
    "TYPE",
    "CLUSTER-IP",
    "EXTERNAL-IP",
    "PORT(S)",
    "AGE",
];

/// `kubectl get globalnetworkpolicies` 的允许表头集合
pub const GLOBAL_NETWORK_POLICY_HEADERS: [&str; 2] = ["NAME", "AGE"];

/// Secret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    /// 名称
    pub name: String,
    /// 类型（Opaque / kubernetes.io/tls ...）
    pub secret_type: String,
    /// 数据项数量原始文本
    pub data: String,
    /// 年龄原始文本
    pub age: String,
}

impl Secret {
    /// 从 `kubectl get secrets` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: required(record, "Secret", "NAME")?.to_string(),
            secret_type: required(record, "Secret", "TYPE")?.to_string(),
            data: required(record, "Secret", "DATA")?.to_string(),
            age: required(record, "Secret", "AGE")?.to_string(),
        })
    }
}

/// Service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KubeService {
    /// 名称
    pub name: String,
    /// 类型（ClusterIP / NodePort / LoadBalancer）
    pub service_type: String,
    /// 集群内地址
    pub cluster_ip: String,
    /// 对外地址（无则为 `<none>` 原文）
    pub external_ip: String,
    /// 端口列表原始文本
    pub ports: String,
    /// 年龄原始文本
    pub age: String,
}

impl KubeService {
    /// 从 `kubectl get services` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: required(record, "Service", "NAME")?.to_string(),
            service_type: required(record, "Service", "TYPE")?.to_string(),
            cluster_ip: required(record, "Service", "CLUSTER-IP")?.to_string(),
            external_ip: required(record, "Service", "EXTERNAL-IP")?.to_string(),
            ports: required(record, "Service", "PORT(S)")?.to_string(),
            age: required(record, "Service", "AGE")?.to_string(),
        })
    }
}

/// Calico 全局网络策略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalNetworkPolicy {
    /// 名称
    pub name: String,
    /// 年龄原始文本
    pub age: String,
}

impl GlobalNetworkPolicy {
    /// 从 `kubectl get globalnetworkpolicies` 的一行记录构造
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: required(record, "GlobalNetworkPolicy", "NAME")?.to_string(),
            age: required(record, "GlobalNetworkPolicy", "AGE")?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stx_tabular::TableParser;

    fn lines(text: &str) -> Vec<String> {
        text.lines()
            .skip_while(|l| l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_secret_from_list() {
        let output = lines(
            r#"
NAME                  TYPE                DATA   AGE
default-registry-key  kubernetes.io/tls   2      18d
"#,
        );
        let table = TableParser::new(SECRET_HEADERS).parse(&output).unwrap();
        let secret = Secret::from_record(&table.records()[0]).unwrap();
        assert_eq!(secret.secret_type, "kubernetes.io/tls");
        assert_eq!(secret.data, "2");
    }

    #[test]
    fn test_service_from_list() {
        let output = lines(
            r#"
NAME         TYPE        CLUSTER-IP     EXTERNAL-IP   PORT(S)          AGE
kubernetes   ClusterIP   10.96.0.1      <none>        443/TCP          18d
oidc-auth    NodePort    10.101.4.22    <none>        8080:30555/TCP   3d
"#,
        );
        let table = TableParser::new(SERVICE_HEADERS).parse(&output).unwrap();
        let services: Vec<KubeService> = table
            .records()
            .iter()
            .map(|r| KubeService::from_record(r).unwrap())
            .collect();

        assert_eq!(services.len(), 2);
        assert_eq!(services[1].ports, "8080:30555/TCP");
        assert_eq!(services[0].external_ip, "<none>");
    }

    #[test]
    fn test_global_network_policy_from_list() {
        let output = lines(
            r#"
NAME            AGE
default-deny    3d
"#,
        );
        let table = TableParser::new(GLOBAL_NETWORK_POLICY_HEADERS)
            .parse(&output)
            .unwrap();
        let policy = GlobalNetworkPolicy::from_record(&table.records()[0]).unwrap();
        assert_eq!(policy.name, "default-deny");
    }
}
