//! 注册配置
//!
//! 配置按以下顺序分层，后者覆盖前者：
//! 内置默认值 → 配置文件 → 环境变量 → 代码中的构建器调用。

use crate::conventions::{MarkerConfiguration, MarkerConfigurationBuilder};
use crate::errors::{ConfigError, ConfigResult};
use crate::lifecycle::Lifetime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// 类型加载失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailurePolicy {
    /// 立即终止整个扫描
    #[default]
    FailFast,
    /// 记录警告并跳过该类型
    Skip,
}

/// 一个类型带有多个生命周期标记时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// 按 [`Lifetime::PRECEDENCE`] 取第一个匹配的生命周期
    #[default]
    FirstMatch,
    /// 视为配置错误，终止扫描
    Reject,
}

/// 标记名称配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub transient_marker: Option<String>,
    pub scoped_marker: Option<String>,
    pub singleton_marker: Option<String>,
}

impl MarkerSettings {
    /// 将已设置的标记应用到构建器，未设置的保持不变
    pub fn apply_to(&self, builder: &mut MarkerConfigurationBuilder) {
        let overrides = [
            (Lifetime::Transient, &self.transient_marker),
            (Lifetime::Scoped, &self.scoped_marker),
            (Lifetime::Singleton, &self.singleton_marker),
        ];
        for (lifetime, marker) in overrides {
            if let Some(marker) = marker {
                builder.use_marker(lifetime, marker.clone());
            }
        }
    }

    /// 生成标记配置
    pub fn to_configuration(&self) -> MarkerConfiguration {
        let mut builder = MarkerConfigurationBuilder::new();
        self.apply_to(&mut builder);
        builder.build()
    }

    fn validate(&self) -> ConfigResult<()> {
        let markers = [
            ("transient_marker", &self.transient_marker),
            ("scoped_marker", &self.scoped_marker),
            ("singleton_marker", &self.singleton_marker),
        ];
        for (key, marker) in markers {
            if matches!(marker, Some(value) if value.trim().is_empty()) {
                return Err(ConfigError::ValidationError {
                    message: format!("markers.{key} 不能为空"),
                });
            }
        }
        Ok(())
    }
}

/// 服务自动注册配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationSettings {
    /// 生命周期标记
    pub markers: MarkerSettings,
    /// 类型加载失败策略
    pub load_failure: LoadFailurePolicy,
    /// 多标记冲突策略
    pub ambiguity: AmbiguityPolicy,
}

impl RegistrationSettings {
    /// 分层加载配置
    ///
    /// - `path`: 可选配置文件（toml / json / yaml，按扩展名识别），指定时必须存在
    /// - `env_prefix`: 可选环境变量前缀，例如 `AUTOREG` 对应
    ///   `AUTOREG_MARKERS__TRANSIENT_MARKER`、`AUTOREG_LOAD_FAILURE`
    pub fn load(path: Option<&Path>, env_prefix: Option<&str>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载注册配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        if let Some(prefix) = env_prefix {
            debug!("加载注册配置环境变量，前缀: {}", prefix);
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.markers.validate()?;

        info!(
            load_failure = ?settings.load_failure,
            ambiguity = ?settings.ambiguity,
            "注册配置加载完成"
        );
        Ok(settings)
    }

    /// 生成标记配置
    pub fn marker_configuration(&self) -> MarkerConfiguration {
        self.markers.to_configuration()
    }
}
