//! 服务声明宏实现

use crate::utils::{default_marker_type, is_lifetime_shorthand};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::{
    parenthesized,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    spanned::Spanned,
    Error, ExprPath, Ident, ItemStruct, Result, Token, Type,
};

/// 标记来源
#[derive(Debug, Clone)]
pub enum MarkerSpec {
    /// `transient` / `scoped` / `singleton` 简写
    Lifetime(Ident),
    /// `markers(...)` 中的标记类型
    Custom(Type),
}

/// 服务声明参数
#[derive(Debug, Clone, Default)]
pub struct ServiceArgs {
    /// 声明顺序中的标记
    pub markers: Vec<MarkerSpec>,
    /// 声明的能力
    pub provides: Vec<Type>,
    /// 自定义构造函数
    pub construct: Option<ExprPath>,
}

impl Parse for ServiceArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = ServiceArgs::default();

        while !input.is_empty() {
            let key: Ident = input.parse()?;

            if is_lifetime_shorthand(&key) {
                let duplicated = args.markers.iter().any(|marker| {
                    matches!(marker, MarkerSpec::Lifetime(existing) if existing == &key)
                });
                if duplicated {
                    return Err(Error::new(key.span(), format!("重复的生命周期 `{key}`")));
                }
                args.markers.push(MarkerSpec::Lifetime(key));
            } else if key == "markers" {
                let content;
                parenthesized!(content in input);
                let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                args.markers.extend(types.into_iter().map(MarkerSpec::Custom));
            } else if key == "provides" {
                let content;
                parenthesized!(content in input);
                let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                args.provides.extend(types);
            } else if key == "construct" {
                if args.construct.is_some() {
                    return Err(Error::new(key.span(), "重复的 `construct` 参数"));
                }
                input.parse::<Token![=]>()?;
                args.construct = Some(input.parse()?);
            } else {
                return Err(Error::new(
                    key.span(),
                    format!(
                        "未知的 `service` 参数 `{key}`，可用参数: transient, scoped, singleton, markers(..), provides(..), construct = .."
                    ),
                ));
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// 实现 #[service] 宏
pub fn service_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let service_args = match syn::parse::<ServiceArgs>(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    let discoverable_impl = generate_discoverable(&input_struct, &service_args);

    let expanded = quote! {
        #input_struct

        #discoverable_impl
    };

    TokenStream::from(expanded)
}

/// 生成 Discoverable 实现
pub fn generate_discoverable(input_struct: &ItemStruct, args: &ServiceArgs) -> TokenStream2 {
    let struct_name = &input_struct.ident;
    let (impl_generics, ty_generics, where_clause) = input_struct.generics.split_for_impl();

    let markers = args.markers.iter().map(marker_tag);
    let capabilities = args.provides.iter().map(|capability| {
        quote_spanned! { capability.span()=>
            ::di_abstractions::CapabilityBinding::of::<#capability, Self>(
                |instance: ::std::sync::Arc<Self>| -> ::std::sync::Arc<#capability> { instance }
            )
        }
    });
    let construct = match &args.construct {
        Some(path) => quote! { #path(resolver) },
        None => quote! {
            ::std::result::Result::Ok(<Self as ::std::default::Default>::default())
        },
    };

    quote! {
        impl #impl_generics ::di_abstractions::Discoverable for #struct_name #ty_generics #where_clause {
            fn markers() -> ::std::vec::Vec<::infrastructure_common::MarkerTag> {
                ::std::vec![#(#markers),*]
            }

            fn capabilities() -> ::std::vec::Vec<::di_abstractions::CapabilityBinding> {
                ::std::vec![#(#capabilities),*]
            }

            #[allow(unused_variables)]
            fn construct(
                resolver: &dyn ::di_abstractions::ServiceResolver,
            ) -> ::infrastructure_common::DependencyResult<Self> {
                #construct
            }
        }
    }
}

fn marker_tag(marker: &MarkerSpec) -> TokenStream2 {
    match marker {
        MarkerSpec::Lifetime(shorthand) => {
            let marker_type = default_marker_type(shorthand).unwrap_or_else(|| quote! { Self });
            quote_spanned! { shorthand.span()=>
                <#marker_type as ::infrastructure_common::LifecycleMarker>::tag()
            }
        }
        MarkerSpec::Custom(marker_type) => quote_spanned! { marker_type.span()=>
            <#marker_type as ::infrastructure_common::LifecycleMarker>::tag()
        },
    }
}
