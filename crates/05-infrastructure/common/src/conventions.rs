//! 约定规范定义
//!
//! 提供生命周期与标记之间的约定映射

use crate::lifecycle::{
    Lifetime, LifecycleMarker, ScopedMarker, SingletonMarker, TransientMarker,
};
use crate::metadata::MarkerTag;

/// 标记配置
///
/// 每个生命周期始终对应一个标记。只能通过 [`MarkerConfigurationBuilder`] 修改，
/// 构建完成后按值传入扫描过程，扫描期间不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerConfiguration {
    transient: MarkerTag,
    scoped: MarkerTag,
    singleton: MarkerTag,
}

impl MarkerConfiguration {
    /// 创建构建器
    pub fn builder() -> MarkerConfigurationBuilder {
        MarkerConfigurationBuilder::new()
    }

    /// 获取指定生命周期对应的标记
    pub fn marker_for(&self, lifetime: Lifetime) -> &MarkerTag {
        match lifetime {
            Lifetime::Transient => &self.transient,
            Lifetime::Scoped => &self.scoped,
            Lifetime::Singleton => &self.singleton,
        }
    }

    /// 按优先顺序返回与给定标记匹配的所有生命周期
    pub fn matching_lifetimes(&self, markers: &[MarkerTag]) -> Vec<Lifetime> {
        Lifetime::PRECEDENCE
            .into_iter()
            .filter(|lifetime| markers.contains(self.marker_for(*lifetime)))
            .collect()
    }
}

impl Default for MarkerConfiguration {
    fn default() -> Self {
        Self {
            transient: TransientMarker::tag(),
            scoped: ScopedMarker::tag(),
            singleton: SingletonMarker::tag(),
        }
    }
}

/// 标记配置构建器
///
/// 每个生命周期可以多次覆盖，最后一次调用生效；未覆盖的生命周期保留默认标记。
/// 不校验标记是否与其他生命周期重复，重复时按 [`Lifetime::PRECEDENCE`] 取第一个。
#[derive(Debug, Clone, Default)]
pub struct MarkerConfigurationBuilder {
    configuration: MarkerConfiguration,
}

impl MarkerConfigurationBuilder {
    /// 创建带默认标记的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 基于已有配置继续覆盖
    pub fn from_configuration(configuration: MarkerConfiguration) -> Self {
        Self { configuration }
    }

    /// 使用指定标记类型作为瞬时标记
    pub fn use_transient_marker<M: LifecycleMarker>(&mut self) -> &mut Self {
        self.use_transient_marker_tag(M::tag())
    }

    /// 使用指定标记标识作为瞬时标记
    pub fn use_transient_marker_tag(&mut self, tag: impl Into<MarkerTag>) -> &mut Self {
        self.use_marker(Lifetime::Transient, tag)
    }

    /// 使用指定标记类型作为作用域标记
    pub fn use_scoped_marker<M: LifecycleMarker>(&mut self) -> &mut Self {
        self.use_scoped_marker_tag(M::tag())
    }

    /// 使用指定标记标识作为作用域标记
    pub fn use_scoped_marker_tag(&mut self, tag: impl Into<MarkerTag>) -> &mut Self {
        self.use_marker(Lifetime::Scoped, tag)
    }

    /// 使用指定标记类型作为单例标记
    pub fn use_singleton_marker<M: LifecycleMarker>(&mut self) -> &mut Self {
        self.use_singleton_marker_tag(M::tag())
    }

    /// 使用指定标记标识作为单例标记
    pub fn use_singleton_marker_tag(&mut self, tag: impl Into<MarkerTag>) -> &mut Self {
        self.use_marker(Lifetime::Singleton, tag)
    }

    /// 替换某个生命周期的标记，其余生命周期不受影响
    pub fn use_marker(&mut self, lifetime: Lifetime, tag: impl Into<MarkerTag>) -> &mut Self {
        let tag = tag.into();
        tracing::debug!(lifetime = %lifetime, marker = %tag, "覆盖生命周期标记");
        match lifetime {
            Lifetime::Transient => self.configuration.transient = tag,
            Lifetime::Scoped => self.configuration.scoped = tag,
            Lifetime::Singleton => self.configuration.singleton = tag,
        }
        self
    }

    /// 构建不可变的标记配置
    pub fn build(&self) -> MarkerConfiguration {
        self.configuration.clone()
    }
}
