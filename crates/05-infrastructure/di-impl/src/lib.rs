//! # 依赖注入具体实现
//!
//! 提供接收服务描述符的 [`ServiceCollection`]，以及按生命周期缓存实例的
//! [`ServiceProvider`] / [`ServiceScope`]。
//!
//! - 瞬时：每次解析都调用工厂
//! - 作用域：每个作用域对每个描述符最多创建一次
//! - 单例：整个容器对每个描述符最多创建一次，所有作用域共享

use di_abstractions::{ErasedInstance, RegistrationSink, ServiceDescriptor, ServiceResolver};
use infrastructure_common::{DependencyError, DependencyResult, Lifetime, Scope, TypeInfo};
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// 服务描述符集合
///
/// 保留所有注册，包括同一能力的重复注册。
#[derive(Debug, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加描述符
    pub fn add(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        debug!(
            capability = %descriptor.capability(),
            implementation = %descriptor.implementation(),
            lifetime = %descriptor.lifetime(),
            "添加服务描述符"
        );
        self.descriptors.push(descriptor);
        self
    }

    /// 以自身类型注册瞬时服务
    pub fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> DependencyResult<T> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::for_self::<T, _>(Lifetime::Transient, factory))
    }

    /// 以自身类型注册作用域服务
    pub fn add_scoped<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> DependencyResult<T> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::for_self::<T, _>(Lifetime::Scoped, factory))
    }

    /// 以自身类型注册单例服务
    pub fn add_singleton<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn ServiceResolver) -> DependencyResult<T> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::for_self::<T, _>(Lifetime::Singleton, factory))
    }

    /// 所有描述符（按注册顺序）
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// 指定能力的所有描述符
    pub fn descriptors_for<C: ?Sized + 'static>(&self) -> Vec<&ServiceDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.capability().is::<C>())
            .collect()
    }

    /// 描述符数量
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// 构建容器
    pub fn build_provider(self) -> ServiceProvider {
        ServiceProvider::new(self.descriptors)
    }
}

impl RegistrationSink for ServiceCollection {
    fn register(&mut self, descriptor: ServiceDescriptor) -> DependencyResult<()> {
        self.add(descriptor);
        Ok(())
    }
}

/// 作用域状态：每个描述符一个缓存槽
struct ScopeState {
    scope: Scope,
    instances: Vec<OnceCell<ErasedInstance>>,
}

impl ScopeState {
    fn new(scope: Scope, slots: usize) -> Self {
        Self {
            scope,
            instances: (0..slots).map(|_| OnceCell::new()).collect(),
        }
    }
}

/// 容器共享数据
struct ProviderCore {
    descriptors: Vec<ServiceDescriptor>,
    /// 能力 → 描述符下标（按注册顺序）
    index: HashMap<TypeId, Vec<usize>>,
    singletons: Vec<OnceCell<ErasedInstance>>,
    /// 从根容器直接解析作用域服务时使用的作用域
    root: ScopeState,
}

impl ProviderCore {
    fn indexes_of(&self, capability: &TypeInfo) -> DependencyResult<&[usize]> {
        self.index
            .get(&capability.id)
            .map(Vec::as_slice)
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: capability.module_path.clone(),
            })
    }
}

/// 单次解析上下文
///
/// 记录当前的解析链，用于检测循环依赖；传给工厂函数作为依赖来源。
struct Resolution<'a> {
    core: &'a ProviderCore,
    scope: &'a ScopeState,
    parent: Option<&'a Resolution<'a>>,
    current: Option<usize>,
}

impl<'a> Resolution<'a> {
    fn root(core: &'a ProviderCore, scope: &'a ScopeState) -> Self {
        Self {
            core,
            scope,
            parent: None,
            current: None,
        }
    }

    fn chain(&self) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut cursor = Some(self);
        while let Some(resolution) = cursor {
            if let Some(index) = resolution.current {
                chain.push(index);
            }
            cursor = resolution.parent;
        }
        chain.reverse();
        chain
    }

    fn resolve_index(&self, index: usize) -> DependencyResult<ErasedInstance> {
        let chain = self.chain();
        if chain.contains(&index) {
            let dependency_chain = chain
                .iter()
                .chain(std::iter::once(&index))
                .map(|i| self.core.descriptors[*i].implementation().name.as_str())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(DependencyError::CircularDependency { dependency_chain });
        }

        let descriptor = &self.core.descriptors[index];
        match descriptor.lifetime() {
            Lifetime::Transient => {
                debug!(implementation = %descriptor.implementation(), "创建瞬时实例");
                descriptor.create_instance(&self.child(self.scope, index))
            }
            Lifetime::Scoped => self.scope.instances[index]
                .get_or_try_init(|| {
                    debug!(
                        implementation = %descriptor.implementation(),
                        scope = %self.scope.scope.name,
                        "创建作用域实例"
                    );
                    descriptor.create_instance(&self.child(self.scope, index))
                })
                .cloned(),
            Lifetime::Singleton => self.core.singletons[index]
                .get_or_try_init(|| {
                    debug!(implementation = %descriptor.implementation(), "创建单例实例");
                    descriptor.create_instance(&self.child(&self.core.root, index))
                })
                .cloned(),
        }
    }

    fn child<'b>(&'b self, scope: &'b ScopeState, index: usize) -> Resolution<'b> {
        Resolution {
            core: self.core,
            scope,
            parent: Some(self),
            current: Some(index),
        }
    }
}

impl ServiceResolver for Resolution<'_> {
    fn resolve_erased(&self, capability: &TypeInfo) -> DependencyResult<ErasedInstance> {
        let indexes = self.core.indexes_of(capability)?;
        // 同一能力多次注册时最后一次注册生效
        match indexes.last() {
            Some(index) => self.resolve_index(*index),
            None => Err(DependencyError::ComponentNotRegistered {
                type_name: capability.module_path.clone(),
            }),
        }
    }

    fn resolve_all_erased(&self, capability: &TypeInfo) -> DependencyResult<Vec<ErasedInstance>> {
        match self.core.index.get(&capability.id) {
            Some(indexes) => indexes.iter().map(|index| self.resolve_index(*index)).collect(),
            None => Ok(Vec::new()),
        }
    }

    fn can_resolve(&self, capability: &TypeInfo) -> bool {
        self.core.index.contains_key(&capability.id)
    }
}

/// 根容器
#[derive(Clone)]
pub struct ServiceProvider {
    core: Arc<ProviderCore>,
}

impl ServiceProvider {
    /// 由描述符创建容器
    pub fn new(descriptors: Vec<ServiceDescriptor>) -> Self {
        let mut index: HashMap<TypeId, Vec<usize>> = HashMap::new();
        for (position, descriptor) in descriptors.iter().enumerate() {
            index.entry(descriptor.capability().id).or_default().push(position);
        }

        let slots = descriptors.len();
        info!(descriptors = slots, capabilities = index.len(), "构建容器完成");

        Self {
            core: Arc::new(ProviderCore {
                singletons: (0..slots).map(|_| OnceCell::new()).collect(),
                root: ScopeState::new(Scope::root(), slots),
                descriptors,
                index,
            }),
        }
    }

    /// 创建新的作用域
    pub fn create_scope(&self, name: impl Into<String>) -> ServiceScope {
        let scope = self.core.root.scope.child(name);
        debug!(
            scope = %scope.name,
            id = %scope.id,
            created_at = %scope.created_at,
            "创建作用域"
        );
        ServiceScope {
            core: Arc::clone(&self.core),
            state: ScopeState::new(scope, self.core.descriptors.len()),
        }
    }

    /// 已注册的描述符
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.core.descriptors
    }
}

impl ServiceResolver for ServiceProvider {
    fn resolve_erased(&self, capability: &TypeInfo) -> DependencyResult<ErasedInstance> {
        Resolution::root(&self.core, &self.core.root).resolve_erased(capability)
    }

    fn resolve_all_erased(&self, capability: &TypeInfo) -> DependencyResult<Vec<ErasedInstance>> {
        Resolution::root(&self.core, &self.core.root).resolve_all_erased(capability)
    }

    fn can_resolve(&self, capability: &TypeInfo) -> bool {
        self.core.index.contains_key(&capability.id)
    }
}

/// 服务作用域
///
/// 作用域服务在同一作用域内共享；单例服务仍由根容器缓存。
pub struct ServiceScope {
    core: Arc<ProviderCore>,
    state: ScopeState,
}

impl ServiceScope {
    /// 作用域信息
    pub fn scope(&self) -> &Scope {
        &self.state.scope
    }
}

impl ServiceResolver for ServiceScope {
    fn resolve_erased(&self, capability: &TypeInfo) -> DependencyResult<ErasedInstance> {
        Resolution::root(&self.core, &self.state).resolve_erased(capability)
    }

    fn resolve_all_erased(&self, capability: &TypeInfo) -> DependencyResult<Vec<ErasedInstance>> {
        Resolution::root(&self.core, &self.state).resolve_all_erased(capability)
    }

    fn can_resolve(&self, capability: &TypeInfo) -> bool {
        self.core.index.contains_key(&capability.id)
    }
}

impl Drop for ServiceScope {
    fn drop(&mut self) {
        debug!(
            scope = %self.state.scope.name,
            age_ms = self.state.scope.age().num_milliseconds(),
            "作用域结束"
        );
    }
}
