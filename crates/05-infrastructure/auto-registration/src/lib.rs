//! # 服务自动注册
//!
//! 按约定扫描类型集合，根据生命周期标记把实现类型注册到依赖注入容器。
//!
//! ## 流程
//!
//! 1. 通过 [`MarkerConfigurationBuilder`](infrastructure_common::MarkerConfigurationBuilder)
//!    确定每个生命周期使用的标记
//! 2. [`TypeScanner`] 遍历显式传入的类型集合
//! 3. [`DescriptorBuilder`] 确定生命周期，为每个声明的能力生成一个描述符
//! 4. 描述符逐个交给 [`RegistrationSink`](di_abstractions::RegistrationSink)
//!
//! ## 基本使用
//!
//! ```rust,ignore
//! use auto_registration::{AutoRegistration, ModuleUniverse};
//! use di_impl::ServiceCollection;
//!
//! let universe = ModuleUniverse::new("orders")
//!     .with::<OrderRepository>()
//!     .with::<OrderService>();
//!
//! let mut services = ServiceCollection::new();
//! services.add_services_from_universes(&[&universe])?;
//! let provider = services.build_provider();
//! ```

pub mod descriptor_builder;
pub mod extensions;
pub mod options;
pub mod scanner;
pub mod universe;

pub use descriptor_builder::{Classification, DescriptorBuilder};
pub use extensions::{register_services, AutoRegistration};
pub use options::{RegistrationSummary, ScanOptions};
pub use scanner::{Candidates, TypeScanner};
pub use universe::ModuleUniverse;
