//! 按约定注册的场景测试

mod common;

use auto_registration::{AutoRegistration, ModuleUniverse, ScanOptions};
use di_abstractions::{ServiceDescriptor, TypeUniverse};
use infrastructure_common::{
    AmbiguityPolicy, ComponentError, LifecycleMarker, Lifetime, ScopedMarker, SingletonMarker,
    TypeInfo,
};
use service_macros::service;

trait Alpha: Send + Sync {}
trait Beta: Send + Sync {}
trait Gamma: Send + Sync {}
trait Delta: Send + Sync {}
trait Epsilon: Send + Sync {}

#[service(transient, provides(dyn Alpha))]
#[derive(Default)]
struct AlphaService;
impl Alpha for AlphaService {}

#[service(scoped, provides(dyn Beta))]
#[derive(Default)]
struct BetaService;
impl Beta for BetaService {}

#[service(singleton, provides(dyn Gamma))]
#[derive(Default)]
struct GammaService;
impl Gamma for GammaService {}

/// 同时带有作用域和瞬时标记
#[service(scoped, transient, provides(dyn Delta, dyn Epsilon))]
#[derive(Default)]
struct DualTagged;
impl Delta for DualTagged {}
impl Epsilon for DualTagged {}

/// 单例但没有声明能力
#[service(singleton)]
#[derive(Default)]
struct Heartbeat;

/// 声明了能力但没有标记
#[service(provides(dyn Alpha))]
#[derive(Default)]
struct Untagged;
impl Alpha for Untagged {}

/// 自定义标记
struct RequestBound;
impl LifecycleMarker for RequestBound {}

#[service(markers(RequestBound), provides(dyn Beta))]
#[derive(Default)]
struct RequestBeta;
impl Beta for RequestBeta {}

type Triple = (TypeInfo, TypeInfo, Lifetime);

fn triple<C: ?Sized + 'static, T: 'static>(lifetime: Lifetime) -> Triple {
    (TypeInfo::of::<C>(), TypeInfo::of::<T>(), lifetime)
}

fn triples(descriptors: &[ServiceDescriptor]) -> Vec<Triple> {
    let mut triples: Vec<Triple> = descriptors
        .iter()
        .map(|descriptor| {
            (
                descriptor.capability().clone(),
                descriptor.implementation().clone(),
                descriptor.lifetime(),
            )
        })
        .collect();
    triples.sort_by(|a, b| (&a.0.module_path, &a.1.module_path).cmp(&(&b.0.module_path, &b.1.module_path)));
    triples
}

fn sorted(mut expected: Vec<Triple>) -> Vec<Triple> {
    expected.sort_by(|a, b| (&a.0.module_path, &a.1.module_path).cmp(&(&b.0.module_path, &b.1.module_path)));
    expected
}

#[test]
fn test_one_descriptor_per_lifetime_kind() -> anyhow::Result<()> {
    common::init_test_logger();
    let universe = ModuleUniverse::new("operations")
        .with::<AlphaService>()
        .with::<BetaService>()
        .with::<GammaService>();
    let mut sink: Vec<ServiceDescriptor> = Vec::new();

    sink.add_services_from_universes(&[&universe])?;

    assert_eq!(
        triples(&sink),
        sorted(vec![
            triple::<dyn Alpha, AlphaService>(Lifetime::Transient),
            triple::<dyn Beta, BetaService>(Lifetime::Scoped),
            triple::<dyn Gamma, GammaService>(Lifetime::Singleton),
        ])
    );
    Ok(())
}

#[test]
fn test_dual_tagged_type_uses_precedence_for_every_capability() -> anyhow::Result<()> {
    common::init_test_logger();
    let universe = ModuleUniverse::new("dual").with::<DualTagged>();
    let mut sink: Vec<ServiceDescriptor> = Vec::new();

    sink.add_services_from_universes(&[&universe])?;

    assert_eq!(
        triples(&sink),
        sorted(vec![
            triple::<dyn Delta, DualTagged>(Lifetime::Transient),
            triple::<dyn Epsilon, DualTagged>(Lifetime::Transient),
        ])
    );
    Ok(())
}

#[test]
fn test_dual_tagged_type_rejected_on_request() {
    let universe = ModuleUniverse::new("dual").with::<DualTagged>();
    let mut sink: Vec<ServiceDescriptor> = Vec::new();
    let options = ScanOptions::default().with_ambiguity(AmbiguityPolicy::Reject);

    let result = sink.add_services_with_options(&[&universe], &options);

    match result {
        Err(ComponentError::AmbiguousLifetime { type_name, lifetimes }) => {
            assert!(type_name.ends_with("DualTagged"));
            assert_eq!(lifetimes, vec![Lifetime::Transient, Lifetime::Scoped]);
        }
        other => panic!("expected ambiguity error, got {other:?}"),
    }
    assert!(sink.is_empty());
}

#[test]
fn test_capability_less_and_untagged_types_produce_nothing() -> anyhow::Result<()> {
    common::init_test_logger();
    let universe = ModuleUniverse::new("quiet")
        .with::<Heartbeat>()
        .with::<Untagged>();
    let mut sink: Vec<ServiceDescriptor> = Vec::new();

    let summary = sink.add_services_with_options(&[&universe], &ScanOptions::default())?;

    assert!(sink.is_empty());
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.without_capabilities, 1);
    assert_eq!(summary.excluded, 1);
    Ok(())
}

#[test]
fn test_custom_marker_is_ignored_until_configured() -> anyhow::Result<()> {
    let universe = ModuleUniverse::new("custom").with::<RequestBeta>();

    let mut defaults: Vec<ServiceDescriptor> = Vec::new();
    defaults.add_services_from_universes(&[&universe])?;
    assert!(defaults.is_empty());

    let mut configured: Vec<ServiceDescriptor> = Vec::new();
    configured.add_services_from_universes_with(
        |markers| {
            markers.use_scoped_marker::<RequestBound>();
        },
        &[&universe],
    )?;
    assert_eq!(
        triples(&configured),
        vec![triple::<dyn Beta, RequestBeta>(Lifetime::Scoped)]
    );
    Ok(())
}

#[test]
fn test_replacing_one_marker_keeps_the_others() -> anyhow::Result<()> {
    let universe = ModuleUniverse::new("mixed")
        .with::<BetaService>()
        .with::<GammaService>()
        .with::<RequestBeta>();
    let mut sink: Vec<ServiceDescriptor> = Vec::new();

    sink.add_services_from_universes_with(
        |markers| {
            markers
                .use_scoped_marker::<SingletonMarker>()
                .use_scoped_marker::<RequestBound>();
        },
        &[&universe],
    )?;

    // 作用域标记最后一次覆盖生效，BetaService 的默认作用域标记不再匹配
    assert_eq!(
        triples(&sink),
        sorted(vec![
            triple::<dyn Gamma, GammaService>(Lifetime::Singleton),
            triple::<dyn Beta, RequestBeta>(Lifetime::Scoped),
        ])
    );
    Ok(())
}

#[test]
fn test_marker_shared_by_two_lifetimes_resolves_by_precedence() -> anyhow::Result<()> {
    let universe = ModuleUniverse::new("collide").with::<GammaService>();
    let mut sink: Vec<ServiceDescriptor> = Vec::new();

    sink.add_services_from_universes_with(
        |markers| {
            markers.use_scoped_marker::<SingletonMarker>();
        },
        &[&universe],
    )?;

    assert_eq!(
        triples(&sink),
        vec![triple::<dyn Gamma, GammaService>(Lifetime::Scoped)]
    );
    Ok(())
}

#[test]
fn test_multiple_universes_are_all_scanned() -> anyhow::Result<()> {
    let first = ModuleUniverse::new("first").with::<AlphaService>();
    let second = ModuleUniverse::new("second")
        .with::<BetaService>()
        .with::<ScopedHolder>();
    let universes: [&dyn TypeUniverse; 2] = [&first, &second];
    let mut sink: Vec<ServiceDescriptor> = Vec::new();

    let summary = sink.add_services_with_options(&universes, &ScanOptions::default())?;

    assert_eq!(summary.universes, 2);
    assert_eq!(summary.candidates, 3);
    assert_eq!(summary.transient, 1);
    assert_eq!(summary.scoped, 2);
    Ok(())
}

/// 手写的 Discoverable 实现，能力为自身类型
struct ScopedHolder;

impl di_abstractions::Discoverable for ScopedHolder {
    fn markers() -> Vec<infrastructure_common::MarkerTag> {
        vec![ScopedMarker::tag()]
    }

    fn capabilities() -> Vec<di_abstractions::CapabilityBinding> {
        vec![di_abstractions::CapabilityBinding::of::<Self, Self>(|this| this)]
    }

    fn construct(
        _resolver: &dyn di_abstractions::ServiceResolver,
    ) -> infrastructure_common::DependencyResult<Self> {
        Ok(Self)
    }
}
