//! kubectl 年龄字符串换算
//!
//! kubectl 把资源年龄压缩成 `45s`、`10m`、`3h`、`18d`、`2w` 或
//! 复合形式 `2d3h`。统一换算为分钟做阈值比较；不足一分钟按 0 计。

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{KubeError, Result};

fn age_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)([smhdw])").expect("固定模式"))
}

/// 将 kubectl 年龄字符串换算为分钟
///
/// 支持的后缀：`s`（秒）、`m`（分）、`h`（时）、`d`（天）、`w`（周），
/// 以及任意组合的复合形式（`2d3h`、`1h30m`）。
pub fn age_to_minutes(age: &str) -> Result<u64> {
    let age = age.trim();

    let mut total_seconds: u64 = 0;
    let mut covered = 0;
    for caps in age_token_re().captures_iter(age) {
        let whole = caps.get(0).unwrap();
        // 数字-单位对必须首尾相接，拒绝 "3x5m" 一类的混入
        if whole.start() != covered {
            return Err(invalid(age));
        }
        covered = whole.end();

        let value: u64 = caps[1].parse().map_err(|_| invalid(age))?;
        let unit_seconds = match &caps[2] {
            "s" => 1,
            "m" => 60,
            "h" => 3600,
            "d" => 86400,
            "w" => 604800,
            _ => unreachable!(),
        };
        total_seconds += value * unit_seconds;
    }

    if covered == 0 || covered != age.len() {
        return Err(invalid(age));
    }

    Ok(total_seconds / 60)
}

fn invalid(age: &str) -> KubeError {
    KubeError::InvalidField {
        entity: "Age",
        field: "age",
        value: age.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_suffixes() {
        assert_eq!(age_to_minutes("45s").unwrap(), 0);
        assert_eq!(age_to_minutes("90s").unwrap(), 1);
        assert_eq!(age_to_minutes("10m").unwrap(), 10);
        assert_eq!(age_to_minutes("3h").unwrap(), 180);
        assert_eq!(age_to_minutes("18d").unwrap(), 25920);
        assert_eq!(age_to_minutes("2w").unwrap(), 20160);
    }

    #[test]
    fn test_composite_forms() {
        assert_eq!(age_to_minutes("2d3h").unwrap(), 2 * 1440 + 180);
        assert_eq!(age_to_minutes("1h30m").unwrap(), 90);
        assert_eq!(age_to_minutes("5m30s").unwrap(), 5);
    }

    #[test]
    fn test_invalid_forms() {
        assert!(age_to_minutes("").is_err());
        assert!(age_to_minutes("abc").is_err());
        assert!(age_to_minutes("12").is_err());
        assert!(age_to_minutes("3x").is_err());
        assert!(age_to_minutes("3x5m").is_err());
        assert!(age_to_minutes("<unknown>").is_err());
    }
}
