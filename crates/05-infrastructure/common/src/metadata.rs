//! 元数据定义
//!
//! 提供类型与生命周期标记的元数据信息

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称（不含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    ///
    /// 支持 trait object，例如 `TypeInfo::of::<dyn MyService>()`。
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: short_type_name(full_name),
            id: TypeId::of::<T>(),
            module_path: full_name.to_string(),
        }
    }

    /// 获取简短的类型名称
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 检查是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// 去掉模块路径，保留泛型参数
fn short_type_name(full_name: &str) -> String {
    let (base, generics) = match full_name.find('<') {
        Some(index) => full_name.split_at(index),
        None => (full_name, ""),
    };
    let base = base.rsplit("::").next().unwrap_or(base);
    format!("{base}{generics}")
}

/// 生命周期标记标识
///
/// 标记按标识比较。由标记类型创建时使用其简短类型名，
/// 因此配置文件里可以直接写 `"TransientMarker"` 这样的名称。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerTag(Cow<'static, str>);

impl MarkerTag {
    /// 从标识创建标记
    pub fn new(identifier: impl Into<Cow<'static, str>>) -> Self {
        Self(identifier.into())
    }

    /// 从标记类型创建标记
    ///
    /// 标识只取简短类型名，不含模块路径：不同模块中同名的标记类型
    /// （例如 `a::Pooled` 与 `b::Pooled`，或自定义的 `TransientMarker`）
    /// 会被视为同一个标记。需要区分时请为标记实现
    /// [`LifecycleMarker::tag`](crate::LifecycleMarker::tag) 返回不同的标识。
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Cow::Owned(TypeInfo::of::<T>().name))
    }

    /// 获取标识字符串
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for MarkerTag {
    fn from(identifier: &'static str) -> Self {
        Self(Cow::Borrowed(identifier))
    }
}

impl From<String> for MarkerTag {
    fn from(identifier: String) -> Self {
        Self(Cow::Owned(identifier))
    }
}

impl fmt::Display for MarkerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
