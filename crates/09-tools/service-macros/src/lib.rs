//! # Service Macros
//!
//! 这个 crate 提供了声明服务生命周期标记和能力的过程宏。
//!
//! ## 核心宏
//!
//! - [`service`] - 为结构体生成 `Discoverable` 实现
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use service_macros::service;
//!
//! pub trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! #[service(singleton, provides(dyn Clock))]
//! #[derive(Default)]
//! pub struct SystemClock;
//! ```

use proc_macro::TokenStream;

mod service;
mod utils;

/// 服务声明宏
///
/// 为结构体实现 `di_abstractions::Discoverable`。使用方需要依赖
/// `di-abstractions` 和 `infrastructure-common`。
///
/// # 参数
///
/// - `transient` / `scoped` / `singleton` - 添加对应的默认生命周期标记
/// - `markers(M1, M2)` - 添加任意实现了 `LifecycleMarker` 的标记类型
/// - `provides(dyn Trait, ...)` - 声明的能力
/// - `construct = path` - 构造函数 `fn(&dyn ServiceResolver) -> DependencyResult<Self>`，
///   缺省时使用 `Default::default()`
///
/// # 示例
///
/// ```rust,ignore
/// #[service(transient, provides(dyn OperationLogger), construct = OperationLoggerImpl::create)]
/// pub struct OperationLoggerImpl {
///     transient: Arc<dyn TransientOperation>,
/// }
/// ```
#[proc_macro_attribute]
pub fn service(args: TokenStream, input: TokenStream) -> TokenStream {
    service::service_impl(args, input)
}
