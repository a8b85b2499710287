//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置加载失败: {source}")]
    LoadError {
        #[from]
        source: config::ConfigError,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },
}

impl DependencyError {
    /// 创建组件创建失败错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 组件扫描与注册错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("类型加载失败: {universe}::{type_name}, 原因: {message}")]
    TypeLoad {
        universe: String,
        type_name: String,
        message: String,
    },

    #[error("生命周期标记冲突: {type_name} 同时标记为 {lifetimes:?}")]
    AmbiguousLifetime {
        type_name: String,
        lifetimes: Vec<crate::lifecycle::Lifetime>,
    },

    #[error("描述符注册被拒绝: {source}")]
    Registration {
        #[from]
        source: DependencyError,
    },
}

impl ComponentError {
    /// 创建类型加载错误
    pub fn type_load(
        universe: impl Into<String>,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TypeLoad {
            universe: universe.into(),
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
