//! 注册入口扩展
//!
//! 为所有 [`RegistrationSink`] 提供按约定自动注册服务的方法。

use crate::descriptor_builder::DescriptorBuilder;
use crate::options::{RegistrationSummary, ScanOptions};
use crate::scanner::TypeScanner;
use di_abstractions::{RegistrationSink, TypeUniverse};
use infrastructure_common::{ComponentResult, MarkerConfigurationBuilder};
use tracing::info;

/// 扫描类型集合并把描述符注册到 `sink`
///
/// 任何未恢复的错误都会立即终止注册，已注册的描述符不会回滚。
pub fn register_services<S>(
    sink: &mut S,
    universes: &[&dyn TypeUniverse],
    options: &ScanOptions,
) -> ComponentResult<RegistrationSummary>
where
    S: RegistrationSink + ?Sized,
{
    info!(
        universes = universes.len(),
        load_failure = ?options.load_failure,
        ambiguity = ?options.ambiguity,
        "开始自动注册服务"
    );

    let scanner = TypeScanner::new(universes, options.load_failure);
    let builder = DescriptorBuilder::new(options.markers.clone(), options.ambiguity);
    let mut summary = RegistrationSummary {
        universes: scanner.universe_count(),
        ..RegistrationSummary::default()
    };

    let mut candidates = scanner.candidates();
    for candidate in candidates.by_ref() {
        let candidate = candidate?;
        summary.candidates += 1;
        builder.register_candidate(&candidate, sink, &mut summary)?;
    }
    summary.skipped = candidates.skipped();

    info!(
        candidates = summary.candidates,
        descriptors = summary.descriptors(),
        excluded = summary.excluded,
        skipped = summary.skipped,
        "自动注册服务完成"
    );
    Ok(summary)
}

/// 按约定自动注册服务的扩展 trait
///
/// ```rust,ignore
/// let mut services = ServiceCollection::new();
/// services
///     .add_services_from_universes_with(
///         |markers| {
///             markers.use_transient_marker::<RequestBound>();
///         },
///         &[&app_universe],
///     )?
///     .add_singleton::<Clock, _>(|_| Ok(Clock::system()));
/// ```
pub trait AutoRegistration: RegistrationSink {
    /// 使用默认标记注册类型集合中的服务
    fn add_services_from_universes(
        &mut self,
        universes: &[&dyn TypeUniverse],
    ) -> ComponentResult<&mut Self> {
        register_services(self, universes, &ScanOptions::default())?;
        Ok(self)
    }

    /// 先通过构建器调整标记，再注册类型集合中的服务
    fn add_services_from_universes_with<F>(
        &mut self,
        configure: F,
        universes: &[&dyn TypeUniverse],
    ) -> ComponentResult<&mut Self>
    where
        F: FnOnce(&mut MarkerConfigurationBuilder),
    {
        let options = ScanOptions::default().configure_markers(configure);
        register_services(self, universes, &options)?;
        Ok(self)
    }

    /// 使用完整选项注册，返回统计结果
    fn add_services_with_options(
        &mut self,
        universes: &[&dyn TypeUniverse],
        options: &ScanOptions,
    ) -> ComponentResult<RegistrationSummary> {
        register_services(self, universes, options)
    }
}

impl<S: RegistrationSink + ?Sized> AutoRegistration for S {}
