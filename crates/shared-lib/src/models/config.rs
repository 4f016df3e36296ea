use color_eyre::eyre::eyre;
use color_eyre::{Help, Result};
use std::sync::Arc;
use tracing::debug;

/// 数据库连接池配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// postgresql数据库链接字符串
    pub postgresql_conn_str: String,

    /// 启动时预留的连接数，可通过环境变量 `DB_MIN_CONNECTIONS` 调整
    pub min_connections: u32,

    /// 最大连接数，可通过环境变量 `DB_MAX_CONNECTIONS` 调整
    pub max_connections: u32,
}

/// 程序配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,

    /// Web服务监听地址
    pub bind_addr: String,

    /// 日志级别，`RUST_LOG` 存在时以 `RUST_LOG` 为准
    pub log_level: String,

    /// 密码哈希的工作因子（Argon2 迭代次数）
    pub password_hash_cost: u32,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn load() -> Result<Arc<AppConfig>> {
        // 加载.env文件中的数据注入到环境变量中，方便本地测试
        // 线上环境部署时会直接使用环境变量，不需要.env文件
        if let Ok(path) = dotenvy::dotenv() {
            debug!("📄 已加载环境变量文件 {}", path.display());
        }

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Arc::new(config))
    }

    /// 根据给定的查找函数构造配置
    ///
    /// 数值类配置解析失败时回退到默认值
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 读取数据库地址信息（仅支持postgresql）
        let db_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| eyre!("Can not load DATABASE_URL in environment"))
            .suggestion("设置 DATABASE_URL 环境变量")?;

        let parse_or = |key: &str, default: u32| lookup(key).map_or(default, |s| s.trim().parse().unwrap_or(default));

        Ok(AppConfig {
            database: DatabaseConfig {
                postgresql_conn_str: db_url,
                min_connections: parse_or("DB_MIN_CONNECTIONS", 1),
                max_connections: parse_or("DB_MAX_CONNECTIONS", 20),
            },
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            password_hash_cost: parse_or("PASSWORD_HASH_COST", 2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/agile")])).unwrap();

        assert_eq!(config.database.postgresql_conn_str, "postgres://localhost/agile");
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.password_hash_cost, 2);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(AppConfig::from_lookup(lookup_from(&[])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).is_err());
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("DB_MAX_CONNECTIONS", "many"),
            ("PASSWORD_HASH_COST", "4"),
            ("BIND_ADDR", "127.0.0.1:3000"),
        ]))
        .unwrap();

        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.password_hash_cost, 4);
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
    }
}
