// Type helpers for operation signatures

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type, TypeParamBound};

/// Single generic argument of the last path segment, if any.
fn single_generic(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn last_ident(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) => type_path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    }
}

/// Simple (unqualified) type name of a parameter, as recorded in a
/// symbolic method identity.
///
/// References and smart pointers are transparent, slices and `Vec`s become
/// `T[]`, `str` becomes `String`, trait objects use their trait name.
pub fn simple_type_name(ty: &Type) -> String {
    match ty {
        Type::Reference(reference) => simple_type_name(&reference.elem),
        Type::Paren(paren) => simple_type_name(&paren.elem),
        Type::Group(group) => simple_type_name(&group.elem),
        Type::Slice(slice) => format!("{}[]", simple_type_name(&slice.elem)),
        Type::Array(array) => format!("{}[]", simple_type_name(&array.elem)),
        Type::TraitObject(object) => object
            .bounds
            .iter()
            .find_map(|bound| match bound {
                TypeParamBound::Trait(trait_bound) => {
                    trait_bound.path.segments.last().map(|s| s.ident.to_string())
                }
                _ => None,
            })
            .unwrap_or_else(|| "Object".to_string()),
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return "Object".to_string();
            };
            let ident = segment.ident.to_string();
            match ident.as_str() {
                "Arc" | "Box" | "Rc" | "Option" => single_generic(ty)
                    .map(simple_type_name)
                    .unwrap_or(ident),
                "Vec" => single_generic(ty)
                    .map(|inner| format!("{}[]", simple_type_name(inner)))
                    .unwrap_or(ident),
                "str" => "String".to_string(),
                _ => ident,
            }
        }
        Type::Tuple(tuple) if tuple.elems.is_empty() => "void".to_string(),
        _ => "Object".to_string(),
    }
}

/// Owned type an argument is decoded into before the local call.
///
/// `&str` decodes as `String`, `&[T]` as `Vec<T>`, `&T` as `T`.
pub fn owned_operand(ty: &Type) -> TokenStream {
    match ty {
        Type::Reference(reference) => match &*reference.elem {
            Type::Slice(slice) => {
                let elem = &slice.elem;
                quote!(::std::vec::Vec<#elem>)
            }
            Type::Path(_) if last_ident(&reference.elem).as_deref() == Some("str") => {
                quote!(::std::string::String)
            }
            elem => quote!(#elem),
        },
        other => quote!(#other),
    }
}

/// Payload type `T` of a `CiResult<T>` return type.
pub fn result_payload(ty: &Type) -> Option<&Type> {
    if last_ident(ty).as_deref() == Some("CiResult") {
        single_generic(ty)
    } else {
        None
    }
}
