//! 服务生命周期定义

use std::fmt;

/// 服务生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// 瞬时模式 - 每次解析都创建新实例
    Transient,
    /// 作用域模式 - 同一作用域内共享一个实例，不同作用域互不共享
    Scoped,
    /// 单例模式 - 容器生命周期内只创建一个实例
    Singleton,
}

impl Lifetime {
    /// 标记匹配时的优先顺序
    ///
    /// 一个类型同时带有多个生命周期标记时，按此顺序取第一个匹配项。
    pub const PRECEDENCE: [Lifetime; 3] = [Self::Transient, Self::Scoped, Self::Singleton];

    /// 获取生命周期名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transient => "transient",
            Self::Scoped => "scoped",
            Self::Singleton => "singleton",
        }
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::Transient
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生命周期标记 trait
///
/// 任何实现此 trait 的类型都可以作为标记，通过
/// [`MarkerConfigurationBuilder`](crate::MarkerConfigurationBuilder) 绑定到某个生命周期。
pub trait LifecycleMarker: 'static {
    /// 标记标识
    fn tag() -> crate::metadata::MarkerTag {
        crate::metadata::MarkerTag::of::<Self>()
    }
}

/// 默认瞬时标记
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientMarker;

/// 默认作用域标记
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedMarker;

/// 默认单例标记
#[derive(Debug, Clone, Copy, Default)]
pub struct SingletonMarker;

impl LifecycleMarker for TransientMarker {}
impl LifecycleMarker for ScopedMarker {}
impl LifecycleMarker for SingletonMarker {}

/// 服务作用域
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: uuid::Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Scope {
    /// 创建新作用域
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            created_at: chrono::Utc::now(),
        }
    }

    /// 创建根作用域
    pub fn root() -> Self {
        Self::new("root")
    }

    /// 作用域已存在的时长
    pub fn age(&self) -> chrono::Duration {
        chrono::Utc::now() - self.created_at
    }

    /// 创建子作用域
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self::new(format!("{}.{}", self.name, name.into()))
    }
}

impl PartialEq for Scope {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Scope {}
