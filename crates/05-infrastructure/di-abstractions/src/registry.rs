//! 服务描述符与注册入口抽象接口

use crate::factory::{erase_factory, CapabilityBinding, InstanceFactory};
use crate::resolver::{ErasedInstance, ServiceResolver};
use infrastructure_common::{DependencyResult, Lifetime, TypeInfo};
use std::sync::Arc;

/// 服务描述符
///
/// 注册的最小单元：（能力，实现，生命周期），以及容器创建实例所需的工厂。
/// 创建后不可变，所有权随注册转移给 [`RegistrationSink`]。
#[derive(Clone)]
pub struct ServiceDescriptor {
    capability: TypeInfo,
    implementation: TypeInfo,
    lifetime: Lifetime,
    factory: InstanceFactory,
}

impl ServiceDescriptor {
    /// 创建新的服务描述符
    pub fn new(
        capability: TypeInfo,
        implementation: TypeInfo,
        lifetime: Lifetime,
        factory: InstanceFactory,
    ) -> Self {
        Self {
            capability,
            implementation,
            lifetime,
            factory,
        }
    }

    /// 从能力绑定创建描述符
    pub fn from_binding(
        binding: &CapabilityBinding,
        implementation: TypeInfo,
        lifetime: Lifetime,
    ) -> Self {
        Self::new(
            binding.capability().clone(),
            implementation,
            lifetime,
            Arc::clone(binding.factory()),
        )
    }

    /// 使用工厂函数为能力 `C` 创建描述符
    pub fn from_fn<C, F>(implementation: TypeInfo, lifetime: Lifetime, factory: F) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> DependencyResult<Arc<C>> + Send + Sync + 'static,
    {
        Self::new(
            TypeInfo::of::<C>(),
            implementation,
            lifetime,
            erase_factory(factory),
        )
    }

    /// 能力即实现类型本身的描述符
    pub fn for_self<T, F>(lifetime: Lifetime, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> DependencyResult<T> + Send + Sync + 'static,
    {
        Self::from_fn::<T, _>(TypeInfo::of::<T>(), lifetime, move |resolver| {
            factory(resolver).map(Arc::new)
        })
    }

    /// 能力类型信息
    pub fn capability(&self) -> &TypeInfo {
        &self.capability
    }

    /// 实现类型信息
    pub fn implementation(&self) -> &TypeInfo {
        &self.implementation
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 使用给定的解析上下文创建实例
    pub fn create_instance(&self, resolver: &dyn ServiceResolver) -> DependencyResult<ErasedInstance> {
        (self.factory)(resolver)
    }
}

/// 描述符按（能力，实现，生命周期）比较，不比较工厂
impl PartialEq for ServiceDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.capability == other.capability
            && self.implementation == other.implementation
            && self.lifetime == other.lifetime
    }
}

impl std::fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("capability", &self.capability.name)
            .field("implementation", &self.implementation.name)
            .field("lifetime", &self.lifetime)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 注册入口 trait
///
/// 容器的注册 API。必须接受同一能力的重复注册；
/// 返回错误时扫描不会重试，错误直接交给调用方。
pub trait RegistrationSink {
    /// 注册一个服务描述符
    fn register(&mut self, descriptor: ServiceDescriptor) -> DependencyResult<()>;
}

/// 只收集描述符的注册入口
impl RegistrationSink for Vec<ServiceDescriptor> {
    fn register(&mut self, descriptor: ServiceDescriptor) -> DependencyResult<()> {
        self.push(descriptor);
        Ok(())
    }
}

impl<S: RegistrationSink + ?Sized> RegistrationSink for &mut S {
    fn register(&mut self, descriptor: ServiceDescriptor) -> DependencyResult<()> {
        (**self).register(descriptor)
    }
}
