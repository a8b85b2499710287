//! Centralized integration tests for service-macros crate

use di_abstractions::{Discoverable, ServiceDescriptor, ServiceResolver, ServiceResolverExt};
use di_impl::ServiceCollection;
use infrastructure_common::{
    DependencyResult, LifecycleMarker, Lifetime, MarkerTag, ScopedMarker, SingletonMarker,
    TransientMarker, TypeInfo,
};
use service_macros::service;
use std::sync::Arc;

pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

pub trait Farewell: Send + Sync {
    fn bye(&self) -> String;
}

#[derive(Debug, Default)]
#[service(singleton, provides(dyn Greeter, dyn Farewell))]
pub struct PoliteGreeter;

impl Greeter for PoliteGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hello, {name}")
    }
}

impl Farewell for PoliteGreeter {
    fn bye(&self) -> String {
        "Goodbye".to_string()
    }
}

pub struct Audited;
impl LifecycleMarker for Audited {}

#[service(scoped, transient, markers(Audited))]
#[derive(Default)]
pub struct MultiMarked;

/// 通过构造函数注入依赖
#[service(transient, provides(dyn Greeter), construct = LoudGreeter::create)]
pub struct LoudGreeter {
    inner: Arc<dyn Farewell>,
}

impl LoudGreeter {
    fn create(resolver: &dyn ServiceResolver) -> DependencyResult<Self> {
        Ok(Self {
            inner: resolver.get_required()?,
        })
    }
}

impl Greeter for LoudGreeter {
    fn greet(&self, name: &str) -> String {
        format!("HELLO, {}! {}", name.to_uppercase(), self.inner.bye())
    }
}

#[test]
fn test_markers_in_declaration_order() {
    assert_eq!(PoliteGreeter::markers(), vec![SingletonMarker::tag()]);
    assert_eq!(
        MultiMarked::markers(),
        vec![
            ScopedMarker::tag(),
            TransientMarker::tag(),
            MarkerTag::new("Audited"),
        ]
    );
}

#[test]
fn test_capabilities_in_declaration_order() {
    let capabilities: Vec<TypeInfo> = PoliteGreeter::capabilities()
        .iter()
        .map(|binding| binding.capability().clone())
        .collect();

    assert_eq!(
        capabilities,
        vec![TypeInfo::of::<dyn Greeter>(), TypeInfo::of::<dyn Farewell>()]
    );
    assert!(MultiMarked::capabilities().is_empty());
}

#[test]
fn test_generated_bindings_build_instances() -> anyhow::Result<()> {
    let mut services = ServiceCollection::new();
    for binding in PoliteGreeter::capabilities() {
        services.add(ServiceDescriptor::from_binding(
            &binding,
            TypeInfo::of::<PoliteGreeter>(),
            Lifetime::Singleton,
        ));
    }
    let provider = services.build_provider();

    let greeter = provider.get_required::<dyn Greeter>()?;
    assert_eq!(greeter.greet("Lorn"), "Hello, Lorn");
    assert_eq!(provider.get_required::<dyn Farewell>()?.bye(), "Goodbye");
    Ok(())
}

#[test]
fn test_custom_constructor_receives_resolver() -> anyhow::Result<()> {
    let mut services = ServiceCollection::new();
    for binding in PoliteGreeter::capabilities()
        .iter()
        .filter(|binding| binding.capability().is::<dyn Farewell>())
    {
        services.add(ServiceDescriptor::from_binding(
            binding,
            TypeInfo::of::<PoliteGreeter>(),
            Lifetime::Singleton,
        ));
    }
    for binding in LoudGreeter::capabilities() {
        services.add(ServiceDescriptor::from_binding(
            &binding,
            TypeInfo::of::<LoudGreeter>(),
            Lifetime::Transient,
        ));
    }
    let provider = services.build_provider();

    let greeter = provider.get_required::<dyn Greeter>()?;
    assert_eq!(greeter.greet("lorn"), "HELLO, LORN! Goodbye");
    Ok(())
}

macro_rules! declare_counter {
    ($name:ident, $start:expr) => {
        #[service(transient, construct = $name::create)]
        pub struct $name {
            start: u32,
        }

        impl $name {
            fn create(_resolver: &dyn ServiceResolver) -> DependencyResult<Self> {
                Ok(Self { start: $start })
            }
        }
    };
}

declare_counter!(DeclaredCounter, 7);

#[test]
fn test_constructor_path_from_declarative_macro() -> anyhow::Result<()> {
    let mut services = ServiceCollection::new();
    services.add_transient::<DeclaredCounter, _>(|resolver| DeclaredCounter::construct(resolver));
    let provider = services.build_provider();

    assert_eq!(DeclaredCounter::markers(), vec![TransientMarker::tag()]);
    assert_eq!(provider.get_required::<DeclaredCounter>()?.start, 7);
    Ok(())
}
