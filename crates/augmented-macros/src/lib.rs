//! Procedural macros for augmented agents
//!
//! This crate provides the `#[tool]` attribute that turns a plain Rust
//! function into a tool an `Agent` can register, while leaving the function
//! itself callable as before.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, FnArg, GenericArgument, Ident, ItemFn, LitStr, Pat, PathArguments,
    ReturnType, Type,
};

/// Converts a function into an agent tool.
///
/// The function must take `&RunContext<D>` first, followed by any number of
/// owned, deserializable parameters, and return a `Result<R, E>` where `E`
/// converts into `ToolError` (`anyhow::Error` does). Parameters are decoded
/// from the call's JSON argument object; `Option<T>` parameters may be left
/// out and unknown keys are rejected.
///
/// The tool name is the function name. The description is the attribute
/// string when given, otherwise the doc comment.
///
/// The calling crate needs `augmented-core`, `serde` and `serde_json`.
///
/// # Examples
///
/// ```rust,ignore
/// use augmented_core::RunContext;
/// use augmented_macros::tool;
///
/// /// Looks up a greeting for the given name
/// #[tool]
/// fn greet(ctx: &RunContext<Greeter>, name: String) -> anyhow::Result<String> {
///     Ok(format!("{}, {}!", ctx.deps.salutation, name))
/// }
///
/// let mut agent = Agent::<Greeter, String>::new("test", "");
/// agent.tool(GreetTool::as_tool());
/// ```
#[proc_macro_attribute]
pub fn tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let description = if attr.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attr as LitStr).value())
    };
    let input_fn = parse_macro_input!(item as ItemFn);

    match expand_tool(description, input_fn) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_tool(description: Option<String>, input_fn: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let fn_name = &input_fn.sig.ident;
    let fn_name_str = fn_name.to_string();
    let vis = &input_fn.vis;
    let description = description.unwrap_or_else(|| extract_doc_comment(&input_fn.attrs));

    if input_fn.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            &input_fn.sig,
            "#[tool] functions are called synchronously and cannot be async",
        ));
    }

    let mut inputs = input_fn.sig.inputs.iter();
    let deps_type = match inputs.next() {
        Some(FnArg::Typed(pat_type)) => context_deps_type(&pat_type.ty)?,
        Some(other) => {
            return Err(syn::Error::new_spanned(
                other,
                "#[tool] functions take `&RunContext<D>` as their first parameter",
            ))
        }
        None => {
            return Err(syn::Error::new_spanned(
                &input_fn.sig,
                "#[tool] functions take `&RunContext<D>` as their first parameter",
            ))
        }
    };

    let mut param_idents: Vec<Ident> = Vec::new();
    let mut param_types: Vec<Type> = Vec::new();
    for input in inputs {
        match input {
            FnArg::Typed(pat_type) => match &*pat_type.pat {
                Pat::Ident(pat_ident) => {
                    param_idents.push(pat_ident.ident.clone());
                    param_types.push((*pat_type.ty).clone());
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "#[tool] parameters must be plain identifiers",
                    ))
                }
            },
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "#[tool] cannot be applied to methods",
                ))
            }
        }
    }

    let result_type = ok_type(&input_fn.sig.output)?;
    let tool_struct_name = format_ident!("{}Tool", to_pascal_case(&fn_name_str));

    let expanded = quote! {
        #input_fn

        #vis struct #tool_struct_name;

        impl #tool_struct_name {
            pub fn as_tool() -> ::std::sync::Arc<dyn ::augmented_core::Tool<#deps_type, #result_type>> {
                ::std::sync::Arc::new(#tool_struct_name)
            }
        }

        impl ::augmented_core::Tool<#deps_type, #result_type> for #tool_struct_name {
            fn name(&self) -> &str {
                #fn_name_str
            }

            fn description(&self) -> &str {
                #description
            }

            fn call(
                &self,
                ctx: &::augmented_core::RunContext<#deps_type>,
                args: ::serde_json::Value,
            ) -> ::std::result::Result<#result_type, ::augmented_core::ToolError> {
                #[derive(::serde::Deserialize)]
                #[serde(deny_unknown_fields)]
                struct ToolArgs {
                    #(#param_idents: #param_types,)*
                }

                let ToolArgs { #(#param_idents),* } = ::augmented_core::decode_args(args)?;
                #fn_name(ctx, #(#param_idents),*).map_err(::augmented_core::ToolError::from)
            }
        }
    };

    Ok(expanded)
}

/// `&RunContext<D>` -> `D`
fn context_deps_type(ty: &Type) -> syn::Result<Type> {
    if let Type::Reference(reference) = ty {
        if let Type::Path(type_path) = &*reference.elem {
            if let Some(segment) = type_path.path.segments.last() {
                if segment.ident == "RunContext" {
                    if let Some(inner) = first_type_argument(&segment.arguments) {
                        return Ok(inner.clone());
                    }
                }
            }
        }
    }
    Err(syn::Error::new_spanned(
        ty,
        "expected `&RunContext<D>` as the first parameter",
    ))
}

/// `-> Result<R, ..>` -> `R`
fn ok_type(output: &ReturnType) -> syn::Result<Type> {
    if let ReturnType::Type(_, ty) = output {
        if let Type::Path(type_path) = &**ty {
            if let Some(segment) = type_path.path.segments.last() {
                if segment.ident == "Result" {
                    if let Some(inner) = first_type_argument(&segment.arguments) {
                        return Ok(inner.clone());
                    }
                }
            }
        }
        return Err(syn::Error::new_spanned(ty, "#[tool] functions must return a `Result`"));
    }
    Err(syn::Error::new_spanned(
        output,
        "#[tool] functions must return a `Result`",
    ))
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = arguments {
        args.args.iter().find_map(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        })
    } else {
        None
    }
}

fn extract_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if attr.path().is_ident("doc") {
                if let syn::Meta::NameValue(meta) = &attr.meta {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(s),
                        ..
                    }) = &meta.value
                    {
                        return Some(s.value().trim().to_string());
                    }
                }
            }
            None
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}
