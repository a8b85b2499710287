//! 类型扫描器
//!
//! 依次遍历各个类型集合，惰性产出候选类型。

use di_abstractions::{CandidateType, TypeUniverse};
use infrastructure_common::{ComponentResult, LoadFailurePolicy};
use tracing::{debug, warn};

/// 类型扫描器
///
/// 只读；不缓存任何结果，每次调用 [`TypeScanner::candidates`] 都从头枚举。
#[derive(Clone, Copy)]
pub struct TypeScanner<'a> {
    universes: &'a [&'a dyn TypeUniverse],
    load_failure: LoadFailurePolicy,
}

impl<'a> TypeScanner<'a> {
    /// 创建扫描器
    pub fn new(universes: &'a [&'a dyn TypeUniverse], load_failure: LoadFailurePolicy) -> Self {
        Self {
            universes,
            load_failure,
        }
    }

    /// 类型集合数量
    pub fn universe_count(&self) -> usize {
        self.universes.len()
    }

    /// 枚举所有候选类型
    pub fn candidates(&self) -> Candidates<'a> {
        Candidates {
            universes: self.universes.iter(),
            current: None,
            load_failure: self.load_failure,
            skipped: 0,
            failed: false,
        }
    }
}

/// 候选类型迭代器
///
/// `FailFast` 策略下遇到第一个加载错误时产出该错误并结束；
/// `Skip` 策略下记录警告并继续。
pub struct Candidates<'a> {
    universes: std::slice::Iter<'a, &'a dyn TypeUniverse>,
    current: Option<ActiveUniverse<'a>>,
    load_failure: LoadFailurePolicy,
    skipped: usize,
    failed: bool,
}

struct ActiveUniverse<'a> {
    name: &'a str,
    types: Box<dyn Iterator<Item = ComponentResult<CandidateType>> + 'a>,
}

impl Candidates<'_> {
    /// 已跳过的类型数量
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl Iterator for Candidates<'_> {
    type Item = ComponentResult<CandidateType>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let Some(active) = self.current.as_mut() else {
                let universe = self.universes.next()?;
                debug!(universe = %universe.name(), "开始扫描类型集合");
                self.current = Some(ActiveUniverse {
                    name: universe.name(),
                    types: universe.types(),
                });
                continue;
            };

            match active.types.next() {
                Some(Ok(candidate)) => return Some(Ok(candidate)),
                Some(Err(error)) => match self.load_failure {
                    LoadFailurePolicy::Skip => {
                        warn!(universe = %active.name, error = %error, "跳过无法加载的类型");
                        self.skipped += 1;
                    }
                    LoadFailurePolicy::FailFast => {
                        self.failed = true;
                        return Some(Err(error));
                    }
                },
                None => {
                    debug!(universe = %active.name, "类型集合扫描结束");
                    self.current = None;
                }
            }
        }
    }
}
