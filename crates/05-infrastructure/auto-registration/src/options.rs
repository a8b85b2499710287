//! 扫描选项与注册结果统计

use infrastructure_common::{
    AmbiguityPolicy, Lifetime, LoadFailurePolicy, MarkerConfiguration,
    MarkerConfigurationBuilder, RegistrationSettings,
};
use std::fmt;

/// 单次扫描使用的选项
///
/// 扫描开始时按值复制，扫描过程中不再变化。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// 生命周期标记
    pub markers: MarkerConfiguration,
    /// 类型加载失败策略
    pub load_failure: LoadFailurePolicy,
    /// 多标记冲突策略
    pub ambiguity: AmbiguityPolicy,
}

impl ScanOptions {
    /// 由配置生成选项
    pub fn from_settings(settings: &RegistrationSettings) -> Self {
        Self {
            markers: settings.marker_configuration(),
            load_failure: settings.load_failure,
            ambiguity: settings.ambiguity,
        }
    }

    /// 在当前标记配置之上应用构建器调用
    pub fn configure_markers<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut MarkerConfigurationBuilder),
    {
        let mut builder = MarkerConfigurationBuilder::from_configuration(self.markers);
        configure(&mut builder);
        self.markers = builder.build();
        self
    }

    /// 设置类型加载失败策略
    pub fn with_load_failure(mut self, policy: LoadFailurePolicy) -> Self {
        self.load_failure = policy;
        self
    }

    /// 设置多标记冲突策略
    pub fn with_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }
}

/// 注册结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// 扫描的类型集合数量
    pub universes: usize,
    /// 枚举到的候选类型数量
    pub candidates: usize,
    /// 没有匹配标记而被排除的类型数量
    pub excluded: usize,
    /// 带有标记但没有声明能力的类型数量
    pub without_capabilities: usize,
    /// 因加载失败被跳过的类型数量
    pub skipped: usize,
    /// 瞬时描述符数量
    pub transient: usize,
    /// 作用域描述符数量
    pub scoped: usize,
    /// 单例描述符数量
    pub singleton: usize,
}

impl RegistrationSummary {
    /// 注册的描述符总数
    pub fn descriptors(&self) -> usize {
        self.transient + self.scoped + self.singleton
    }

    /// 指定生命周期的描述符数量
    pub fn descriptors_for(&self, lifetime: Lifetime) -> usize {
        match lifetime {
            Lifetime::Transient => self.transient,
            Lifetime::Scoped => self.scoped,
            Lifetime::Singleton => self.singleton,
        }
    }

    pub(crate) fn record_descriptor(&mut self, lifetime: Lifetime) {
        match lifetime {
            Lifetime::Transient => self.transient += 1,
            Lifetime::Scoped => self.scoped += 1,
            Lifetime::Singleton => self.singleton += 1,
        }
    }
}

impl fmt::Display for RegistrationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} 个类型集合, {} 个候选类型, {} 个描述符 (瞬时 {}, 作用域 {}, 单例 {}), 排除 {}, 无能力 {}, 跳过 {}",
            self.universes,
            self.candidates,
            self.descriptors(),
            self.transient,
            self.scoped,
            self.singleton,
            self.excluded,
            self.without_capabilities,
            self.skipped
        )
    }
}
