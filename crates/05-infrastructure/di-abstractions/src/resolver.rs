//! 服务解析器抽象接口
//!
//! 按能力（通常是 `dyn Trait`）解析服务实例

use infrastructure_common::{DependencyError, DependencyResult, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除后的服务实例
///
/// 内部保存的是 `Arc<C>`，其中 `C` 为注册时的能力类型。
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// 服务解析器 trait
///
/// 容器、作用域以及传给工厂函数的解析上下文都实现此 trait。
pub trait ServiceResolver: Send + Sync {
    /// 解析能力的最后一个注册实现
    fn resolve_erased(&self, capability: &TypeInfo) -> DependencyResult<ErasedInstance>;

    /// 按注册顺序解析能力的所有实现
    fn resolve_all_erased(&self, capability: &TypeInfo) -> DependencyResult<Vec<ErasedInstance>>;

    /// 检查能力是否已注册
    fn can_resolve(&self, capability: &TypeInfo) -> bool;
}

/// 类型化解析扩展
pub trait ServiceResolverExt: ServiceResolver {
    /// 解析必需的服务，未注册时返回错误
    fn get_required<C>(&self) -> DependencyResult<Arc<C>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let capability = TypeInfo::of::<C>();
        let instance = self.resolve_erased(&capability)?;
        downcast_instance::<C>(&capability, &instance)
    }

    /// 解析可选的服务，未注册时返回 `None`
    fn get<C>(&self) -> DependencyResult<Option<Arc<C>>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        if self.can_resolve(&TypeInfo::of::<C>()) {
            self.get_required::<C>().map(Some)
        } else {
            Ok(None)
        }
    }

    /// 解析能力的所有实现
    fn get_all<C>(&self) -> DependencyResult<Vec<Arc<C>>>
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let capability = TypeInfo::of::<C>();
        self.resolve_all_erased(&capability)?
            .iter()
            .map(|instance| downcast_instance::<C>(&capability, instance))
            .collect()
    }

    /// 检查能力是否已注册
    fn is_registered<C>(&self) -> bool
    where
        C: ?Sized + 'static,
    {
        self.can_resolve(&TypeInfo::of::<C>())
    }
}

impl<R: ServiceResolver + ?Sized> ServiceResolverExt for R {}

/// 将类型擦除的实例还原为 `Arc<C>`
pub fn downcast_instance<C>(capability: &TypeInfo, instance: &ErasedInstance) -> DependencyResult<Arc<C>>
where
    C: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<C>>()
        .cloned()
        .ok_or_else(|| {
            DependencyError::creation_failed(
                capability.module_path.clone(),
                format!("实例类型与能力 {} 不匹配", capability.name),
            )
        })
}
