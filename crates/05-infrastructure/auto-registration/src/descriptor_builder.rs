//! 描述符生成
//!
//! 根据标记配置确定候选类型的生命周期，并为每个声明的能力生成一个描述符。

use crate::options::RegistrationSummary;
use di_abstractions::{CandidateType, RegistrationSink, ServiceDescriptor};
use infrastructure_common::{
    AmbiguityPolicy, ComponentError, ComponentResult, Lifetime, MarkerConfiguration,
};
use tracing::{debug, error, warn};

/// 候选类型的分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 匹配到生命周期
    Included(Lifetime),
    /// 没有匹配的标记
    Excluded,
}

/// 描述符生成器
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    markers: MarkerConfiguration,
    ambiguity: AmbiguityPolicy,
}

impl DescriptorBuilder {
    /// 创建描述符生成器
    pub fn new(markers: MarkerConfiguration, ambiguity: AmbiguityPolicy) -> Self {
        Self { markers, ambiguity }
    }

    /// 使用中的标记配置
    pub fn markers(&self) -> &MarkerConfiguration {
        &self.markers
    }

    /// 确定候选类型的生命周期
    ///
    /// 按 [`Lifetime::PRECEDENCE`] 匹配标记。匹配到多个生命周期时，
    /// `FirstMatch` 取第一个并记录警告，`Reject` 返回
    /// [`ComponentError::AmbiguousLifetime`]。
    pub fn classify(&self, candidate: &CandidateType) -> ComponentResult<Classification> {
        let lifetimes = self.markers.matching_lifetimes(candidate.markers());

        match lifetimes.as_slice() {
            [] => Ok(Classification::Excluded),
            [lifetime] => Ok(Classification::Included(*lifetime)),
            [first, ..] => match self.ambiguity {
                AmbiguityPolicy::FirstMatch => {
                    warn!(
                        implementation = %candidate.implementation(),
                        lifetimes = ?lifetimes,
                        chosen = %first,
                        "类型带有多个生命周期标记，按优先顺序选择"
                    );
                    Ok(Classification::Included(*first))
                }
                AmbiguityPolicy::Reject => Err(ComponentError::AmbiguousLifetime {
                    type_name: candidate.implementation().module_path.clone(),
                    lifetimes: lifetimes.clone(),
                }),
            },
        }
    }

    /// 为候选类型生成描述符
    ///
    /// 被排除的类型以及没有声明能力的类型返回空列表。
    pub fn build(&self, candidate: &CandidateType) -> ComponentResult<Vec<ServiceDescriptor>> {
        Ok(match self.classify(candidate)? {
            Classification::Included(lifetime) => expand(candidate, lifetime),
            Classification::Excluded => Vec::new(),
        })
    }

    /// 生成描述符并逐个注册
    pub fn register_candidate<S>(
        &self,
        candidate: &CandidateType,
        sink: &mut S,
        summary: &mut RegistrationSummary,
    ) -> ComponentResult<()>
    where
        S: RegistrationSink + ?Sized,
    {
        let lifetime = match self.classify(candidate)? {
            Classification::Included(lifetime) => lifetime,
            Classification::Excluded => {
                debug!(implementation = %candidate.implementation(), "没有生命周期标记，排除");
                summary.excluded += 1;
                return Ok(());
            }
        };

        if candidate.capabilities().is_empty() {
            debug!(
                implementation = %candidate.implementation(),
                lifetime = %lifetime,
                "没有声明能力，不生成描述符"
            );
            summary.without_capabilities += 1;
            return Ok(());
        }

        for descriptor in expand(candidate, lifetime) {
            debug!(
                capability = %descriptor.capability(),
                implementation = %descriptor.implementation(),
                lifetime = %lifetime,
                "注册服务描述符"
            );
            let capability = descriptor.capability().clone();
            if let Err(source) = sink.register(descriptor) {
                error!(
                    capability = %capability,
                    implementation = %candidate.implementation(),
                    error = %source,
                    "注册入口拒绝描述符"
                );
                return Err(ComponentError::Registration { source });
            }
            summary.record_descriptor(lifetime);
        }

        Ok(())
    }
}

impl Default for DescriptorBuilder {
    fn default() -> Self {
        Self::new(MarkerConfiguration::default(), AmbiguityPolicy::default())
    }
}

fn expand(candidate: &CandidateType, lifetime: Lifetime) -> Vec<ServiceDescriptor> {
    candidate
        .capabilities()
        .iter()
        .map(|binding| {
            ServiceDescriptor::from_binding(binding, candidate.implementation().clone(), lifetime)
        })
        .collect()
}
