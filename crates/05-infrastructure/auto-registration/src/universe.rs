//! 显式类型集合
//!
//! 用显式列出的类型代替“当前进程中所有已加载模块”。

use di_abstractions::{CandidateType, Discoverable, TypeUniverse};
use infrastructure_common::ComponentResult;

/// 候选类型加载函数
type CandidateLoader = Box<dyn Fn() -> ComponentResult<CandidateType> + Send + Sync>;

/// 模块类型集合
///
/// 按加入顺序枚举类型，每次枚举都重新调用加载函数。
///
/// ```rust,ignore
/// let universe = ModuleUniverse::new("billing")
///     .with::<InvoiceService>()
///     .with::<PaymentGateway>();
/// ```
pub struct ModuleUniverse {
    name: String,
    loaders: Vec<CandidateLoader>,
}

impl ModuleUniverse {
    /// 创建空的类型集合
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loaders: Vec::new(),
        }
    }

    /// 加入可发现类型
    pub fn with<T: Discoverable>(mut self) -> Self {
        self.loaders.push(Box::new(|| Ok(CandidateType::of::<T>())));
        self
    }

    /// 加入手动构造的候选类型
    pub fn with_candidate(mut self, candidate: CandidateType) -> Self {
        self.loaders.push(Box::new(move || Ok(candidate.clone())));
        self
    }

    /// 加入可能失败的加载函数
    ///
    /// 用于候选类型需要在运行时检查的场景，失败按扫描时的加载失败策略处理。
    pub fn with_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> ComponentResult<CandidateType> + Send + Sync + 'static,
    {
        self.loaders.push(Box::new(loader));
        self
    }

    /// 类型数量
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl TypeUniverse for ModuleUniverse {
    fn name(&self) -> &str {
        &self.name
    }

    fn types(&self) -> Box<dyn Iterator<Item = ComponentResult<CandidateType>> + '_> {
        Box::new(self.loaders.iter().map(|load| load()))
    }
}

impl std::fmt::Debug for ModuleUniverse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleUniverse")
            .field("name", &self.name)
            .field("types", &self.loaders.len())
            .finish()
    }
}
