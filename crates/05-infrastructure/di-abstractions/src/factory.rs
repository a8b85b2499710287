//! 实例工厂抽象
//!
//! 将“实现类型以某个能力的形式被创建”擦除为统一的工厂函数

use crate::resolver::{ErasedInstance, ServiceResolver};
use crate::scanner::Discoverable;
use infrastructure_common::{DependencyResult, TypeInfo};
use std::sync::Arc;

/// 类型擦除的实例工厂
///
/// 工厂接收当前的解析上下文，用于构造函数注入。
pub type InstanceFactory =
    Arc<dyn Fn(&dyn ServiceResolver) -> DependencyResult<ErasedInstance> + Send + Sync>;

/// 将返回 `Arc<C>` 的工厂擦除为 [`InstanceFactory`]
pub fn erase_factory<C, F>(factory: F) -> InstanceFactory
where
    C: ?Sized + Send + Sync + 'static,
    F: Fn(&dyn ServiceResolver) -> DependencyResult<Arc<C>> + Send + Sync + 'static,
{
    Arc::new(move |resolver: &dyn ServiceResolver| {
        let instance = factory(resolver)?;
        Ok(Arc::new(instance) as ErasedInstance)
    })
}

/// 能力绑定
///
/// 描述实现类型声明的一个能力，以及把实现实例转换为该能力的工厂。
#[derive(Clone)]
pub struct CapabilityBinding {
    capability: TypeInfo,
    factory: InstanceFactory,
}

impl CapabilityBinding {
    /// 将可发现类型 `T` 绑定到能力 `C`
    ///
    /// `upcast` 负责把 `Arc<T>` 转为 `Arc<C>`，通常写作 `|this| this`。
    pub fn of<C, T>(upcast: fn(Arc<T>) -> Arc<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        T: Discoverable,
    {
        Self::from_fn::<C, _>(move |resolver| Ok(upcast(Arc::new(T::construct(resolver)?))))
    }

    /// 使用自定义工厂绑定能力 `C`
    pub fn from_fn<C, F>(factory: F) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> DependencyResult<Arc<C>> + Send + Sync + 'static,
    {
        Self {
            capability: TypeInfo::of::<C>(),
            factory: erase_factory(factory),
        }
    }

    /// 能力类型信息
    pub fn capability(&self) -> &TypeInfo {
        &self.capability
    }

    /// 实例工厂
    pub fn factory(&self) -> &InstanceFactory {
        &self.factory
    }
}

impl std::fmt::Debug for CapabilityBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityBinding")
            .field("capability", &self.capability.name)
            .field("factory", &"<function>")
            .finish()
    }
}
