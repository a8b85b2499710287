//! # Infrastructure Common
//!
//! 这个 crate 提供了服务自动注册所需的公共类型。
//!
//! ## 核心类型
//!
//! - [`Lifetime`] - 服务生命周期（瞬时 / 作用域 / 单例）
//! - [`MarkerTag`] - 生命周期标记标识
//! - [`MarkerConfiguration`] - 生命周期与标记之间的映射
//! - [`MarkerConfigurationBuilder`] - 标记映射的流式构建器
//! - [`RegistrationSettings`] - 分层加载的注册配置
//!
//! ## 设计原则
//!
//! - 扫描开始前完成配置，扫描期间配置只读
//! - 约定优于配置
//! - 显式传入类型集合，不依赖进程级全局状态

pub mod configuration;
pub mod conventions;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use conventions::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
