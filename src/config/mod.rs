//! 上传节点的配置模块。
//!
//! 所有环境变量读取都经过 [`EnvLookup`]，这样凭据回退逻辑可以在测试中注入。

use std::collections::HashMap;
use std::path::PathBuf;

/// 存储区名称的回退环境变量
pub const STORAGE_ZONE_NAME_VAR: &str = "BUNNY_STORAGE_ZONE_NAME";

/// 访问密钥的回退环境变量
pub const ACCESS_KEY_VAR: &str = "BUNNY_ACCESS_KEY";

/// 监听地址
pub const BIND_ADDR_VAR: &str = "BUNNY_NODE_ADDR";

/// 宿主临时目录
pub const TEMP_DIR_VAR: &str = "BUNNY_NODE_TEMP_DIR";

/// ffmpeg 可执行文件
pub const FFMPEG_VAR: &str = "BUNNY_NODE_FFMPEG";

/// 覆盖存储 API 的基础 URL（仅用于本地联调）
pub const STORAGE_ENDPOINT_VAR: &str = "BUNNY_STORAGE_ENDPOINT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FFMPEG: &str = "ffmpeg";

/// 环境变量查询能力
#[cfg_attr(test, mockall::automock)]
pub trait EnvLookup: Send + Sync {
    /// 返回变量值，未设置时返回 `None`
    fn var(&self, key: &str) -> Option<String>;
}

/// 读取当前进程环境变量
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// 解析单个设置项：参数非空时使用参数，否则回退到环境变量。
///
/// # 参数
///
/// * `param` - 节点参数值。
/// * `env` - 环境变量查询能力。
/// * `var` - 回退的环境变量名。
///
/// # 返回值
///
/// 有效值；参数和环境变量都为空时返回 `None`。
pub fn resolve_setting(param: &str, env: &dyn EnvLookup, var: &str) -> Option<String> {
    if !param.is_empty() {
        return Some(param.to_string());
    }
    env.var(var).filter(|value| !value.is_empty())
}

/// 存储区凭据
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub storage_zone_name: String,
    pub access_key: String,
}

// 访问密钥不能出现在日志里
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("storage_zone_name", &self.storage_zone_name)
            .field("access_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// 解析存储区名称和访问密钥。
    ///
    /// # 返回值
    ///
    /// 两者都有效时返回凭据，否则返回缺失字段的名称。
    pub fn resolve(
        storage_zone_name: &str,
        access_key: &str,
        env: &dyn EnvLookup,
    ) -> Result<Self, &'static str> {
        let zone = resolve_setting(storage_zone_name, env, STORAGE_ZONE_NAME_VAR);
        let key = resolve_setting(access_key, env, ACCESS_KEY_VAR);

        match (zone, key) {
            (Some(storage_zone_name), Some(access_key)) => Ok(Self {
                storage_zone_name,
                access_key,
            }),
            (None, None) => Err("storage_zone_name, access_key"),
            (None, Some(_)) => Err("storage_zone_name"),
            (Some(_), None) => Err("access_key"),
        }
    }
}

/// 进程级设置
#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP 服务监听地址
    pub bind_addr: String,
    /// 宿主提供的临时目录
    pub temp_dir: PathBuf,
    /// ffmpeg 可执行文件
    pub ffmpeg: String,
    /// 替换 `https://{区域主机名}` 的基础 URL
    pub storage_endpoint: Option<String>,
}

impl Settings {
    /// 从环境变量加载设置，未设置的项使用默认值。
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        let non_empty = |key: &str| env.var(key).filter(|value| !value.is_empty());

        Self {
            bind_addr: non_empty(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            temp_dir: non_empty(TEMP_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            ffmpeg: non_empty(FFMPEG_VAR).unwrap_or_else(|| DEFAULT_FFMPEG.to_string()),
            storage_endpoint: non_empty(STORAGE_ENDPOINT_VAR)
                .map(|endpoint| endpoint.trim_end_matches('/').to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_param_takes_precedence_over_env() {
        let mut env = MockEnvLookup::new();
        env.expect_var().never();

        let value = resolve_setting("from-param", &env, ACCESS_KEY_VAR);
        assert_eq!(value.as_deref(), Some("from-param"));
    }

    #[test]
    fn test_empty_param_falls_back_to_env() {
        let mut env = MockEnvLookup::new();
        env.expect_var()
            .times(1)
            .returning(|key| (key == STORAGE_ZONE_NAME_VAR).then(|| "env-zone".to_string()));

        let value = resolve_setting("", &env, STORAGE_ZONE_NAME_VAR);
        assert_eq!(value.as_deref(), Some("env-zone"));
    }

    #[test]
    fn test_empty_env_value_counts_as_missing() {
        let env = env_with(&[(ACCESS_KEY_VAR, "")]);
        assert_eq!(resolve_setting("", &env, ACCESS_KEY_VAR), None);
    }

    #[test]
    fn test_credentials_report_missing_field() {
        let env = env_with(&[(STORAGE_ZONE_NAME_VAR, "zone")]);
        assert_eq!(Credentials::resolve("", "", &env), Err("access_key"));

        let env = env_with(&[(ACCESS_KEY_VAR, "key")]);
        assert_eq!(Credentials::resolve("", "", &env), Err("storage_zone_name"));

        let env = env_with(&[]);
        assert_eq!(
            Credentials::resolve("", "", &env),
            Err("storage_zone_name, access_key")
        );
    }

    #[test]
    fn test_credentials_mix_param_and_env() {
        let env = env_with(&[(ACCESS_KEY_VAR, "env-key")]);
        let credentials = Credentials::resolve("zone", "", &env).unwrap();
        assert_eq!(credentials.storage_zone_name, "zone");
        assert_eq!(credentials.access_key, "env-key");
        assert!(!format!("{credentials:?}").contains("env-key"));
    }

    #[test]
    fn test_settings_defaults_and_overrides() {
        let settings = Settings::from_env(&env_with(&[]));
        assert_eq!(settings.bind_addr, "0.0.0.0:3000");
        assert_eq!(settings.ffmpeg, "ffmpeg");
        assert!(settings.storage_endpoint.is_none());

        let settings = Settings::from_env(&env_with(&[
            (BIND_ADDR_VAR, "127.0.0.1:8188"),
            (TEMP_DIR_VAR, "/var/tmp/node"),
            (STORAGE_ENDPOINT_VAR, "http://127.0.0.1:9000/"),
        ]));
        assert_eq!(settings.bind_addr, "127.0.0.1:8188");
        assert_eq!(settings.temp_dir, PathBuf::from("/var/tmp/node"));
        assert_eq!(
            settings.storage_endpoint.as_deref(),
            Some("http://127.0.0.1:9000")
        );
    }
}
