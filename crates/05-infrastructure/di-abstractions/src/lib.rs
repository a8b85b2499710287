//! # Dependency Injection Abstractions
//! 
//! 依赖注入抽象层，定义服务发现、注册和解析的核心接口。
//! 
//! ## 核心接口
//! 
//! - [`Discoverable`] - 可被扫描发现的实现类型
//! - [`TypeUniverse`] - 可枚举的类型集合
//! - [`RegistrationSink`] - 接收服务描述符的注册入口
//! - [`ServiceResolver`] - 按能力解析服务实例

pub mod factory;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use factory::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
