//! 类型扫描抽象接口
//!
//! 提供候选实现类型及其所在类型集合的抽象

use crate::factory::CapabilityBinding;
use crate::resolver::ServiceResolver;
use infrastructure_common::{ComponentResult, DependencyResult, MarkerTag, TypeInfo};

/// 可被扫描发现的实现类型
///
/// 通常由 `#[service(...)]` 宏生成，也可以手动实现。
pub trait Discoverable: Send + Sync + Sized + 'static {
    /// 类型上附加的原始标记（尚未解析为生命周期）
    fn markers() -> Vec<MarkerTag>;

    /// 类型声明的能力列表
    fn capabilities() -> Vec<CapabilityBinding>;

    /// 构造实例，可通过 `resolver` 获取依赖
    fn construct(resolver: &dyn ServiceResolver) -> DependencyResult<Self>;
}

/// 候选类型
///
/// 扫描过程中临时产生，描述符生成后即丢弃。
#[derive(Clone)]
pub struct CandidateType {
    implementation: TypeInfo,
    markers: Vec<MarkerTag>,
    capabilities: Vec<CapabilityBinding>,
}

impl CandidateType {
    /// 由可发现类型创建候选类型
    pub fn of<T: Discoverable>() -> Self {
        Self {
            implementation: TypeInfo::of::<T>(),
            markers: T::markers(),
            capabilities: T::capabilities(),
        }
    }

    /// 手动创建候选类型
    pub fn new(
        implementation: TypeInfo,
        markers: Vec<MarkerTag>,
        capabilities: Vec<CapabilityBinding>,
    ) -> Self {
        Self {
            implementation,
            markers,
            capabilities,
        }
    }

    /// 实现类型信息
    pub fn implementation(&self) -> &TypeInfo {
        &self.implementation
    }

    /// 原始标记
    pub fn markers(&self) -> &[MarkerTag] {
        &self.markers
    }

    /// 声明的能力
    pub fn capabilities(&self) -> &[CapabilityBinding] {
        &self.capabilities
    }
}

impl std::fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateType")
            .field("implementation", &self.implementation.name)
            .field("markers", &self.markers)
            .field(
                "capabilities",
                &self
                    .capabilities
                    .iter()
                    .map(|binding| binding.capability().name.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// 类型集合 trait
///
/// 相当于一个模块或程序集。每次调用 [`TypeUniverse::types`] 都从头枚举，
/// 不保留任何缓存；单个类型无法加载时以 `Err` 形式出现在序列中。
pub trait TypeUniverse {
    /// 类型集合名称
    fn name(&self) -> &str;

    /// 惰性枚举集合中的类型
    fn types(&self) -> Box<dyn Iterator<Item = ComponentResult<CandidateType>> + '_>;
}
