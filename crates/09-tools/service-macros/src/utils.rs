//! 宏工具函数

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

/// 生命周期简写
pub const LIFETIME_SHORTHANDS: [&str; 3] = ["transient", "scoped", "singleton"];

/// 检查标识符是否为生命周期简写
pub fn is_lifetime_shorthand(ident: &Ident) -> bool {
    LIFETIME_SHORTHANDS.iter().any(|name| ident == name)
}

/// 生命周期简写对应的默认标记类型
pub fn default_marker_type(shorthand: &Ident) -> Option<TokenStream> {
    match shorthand.to_string().as_str() {
        "transient" => Some(quote! { ::infrastructure_common::TransientMarker }),
        "scoped" => Some(quote! { ::infrastructure_common::ScopedMarker }),
        "singleton" => Some(quote! { ::infrastructure_common::SingletonMarker }),
        _ => None,
    }
}
