//! Symbolic method identity
//!
//! A method is identified by its name followed by the simple names of its
//! parameter types, e.g. `["lookup_constant", "i32", "bool"]`. The identity
//! never refers to runtime type information, so it is stable across
//! processes and usable as a record/replay key.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProxyError;
use crate::proxy::InterfaceDescriptor;

#[derive(Clone)]
enum Repr {
    Static {
        name: &'static str,
        params: &'static [&'static str],
    },
    /// Name followed by parameter type names; never empty
    Owned(Arc<[String]>),
}

/// Immutable `(name, parameter type names)` key of a method
#[derive(Clone)]
pub struct SymbolicMethod {
    repr: Repr,
}

impl SymbolicMethod {
    /// Build-time identity
    pub const fn from_static(name: &'static str, params: &'static [&'static str]) -> Self {
        SymbolicMethod {
            repr: Repr::Static { name, params },
        }
    }

    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements: Vec<String> = std::iter::once(name.into())
            .chain(params.into_iter().map(Into::into))
            .collect();
        SymbolicMethod {
            repr: Repr::Owned(elements.into()),
        }
    }

    /// Identity from full type names (as produced by
    /// `std::any::type_name`), each reduced to its simple name
    pub fn synthesize(name: &str, type_names: &[&str]) -> Self {
        Self::new(name, type_names.iter().map(|full| simple_type_name(full)))
    }

    /// Identity that must be declared by one of `receivers`, directly or
    /// through an inherited interface.
    ///
    /// With the `minimal-footprint` feature the surface lookup is skipped
    /// and the identity is built unchecked.
    pub fn verified(name: &str, params: &[&str], receivers: &[&InterfaceDescriptor]) -> Result<Self, ProxyError> {
        let method = Self::new(name, params.iter().copied());
        ensure_declared(&method, receivers)?;
        Ok(method)
    }

    pub fn name(&self) -> &str {
        match &self.repr {
            Repr::Static { name, .. } => name,
            Repr::Owned(elements) => &elements[0],
        }
    }

    pub fn param_count(&self) -> usize {
        match &self.repr {
            Repr::Static { params, .. } => params.len(),
            Repr::Owned(elements) => elements.len() - 1,
        }
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        match &self.repr {
            Repr::Static { params, .. } => params.get(index).copied(),
            Repr::Owned(elements) => elements.get(index + 1).map(String::as_str),
        }
    }

    pub fn params(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.param_count()).filter_map(move |index| self.param(index))
    }

    /// Name followed by parameter type names
    pub fn elements(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.name()).chain(self.params())
    }
}

#[cfg(not(feature = "minimal-footprint"))]
fn ensure_declared(method: &SymbolicMethod, receivers: &[&InterfaceDescriptor]) -> Result<(), ProxyError> {
    if receivers.iter().any(|receiver| receiver.declares(method)) {
        Ok(())
    } else {
        Err(ProxyError::MethodNotFound {
            method: method.to_string(),
            receivers: receivers
                .iter()
                .map(|receiver| receiver.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

#[cfg(feature = "minimal-footprint")]
fn ensure_declared(_method: &SymbolicMethod, _receivers: &[&InterfaceDescriptor]) -> Result<(), ProxyError> {
    Ok(())
}

impl PartialEq for SymbolicMethod {
    fn eq(&self, other: &Self) -> bool {
        self.param_count() == other.param_count() && self.elements().eq(other.elements())
    }
}

impl Eq for SymbolicMethod {}

impl Hash for SymbolicMethod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.param_count() + 1);
        for element in self.elements() {
            element.hash(state);
        }
    }
}

impl fmt::Display for SymbolicMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (index, param) in self.params().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for SymbolicMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolicMethod({})", self)
    }
}

impl Serialize for SymbolicMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.elements())
    }
}

impl<'de> Deserialize<'de> for SymbolicMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut elements = Vec::<String>::deserialize(deserializer)?.into_iter();
        let name = elements
            .next()
            .ok_or_else(|| D::Error::custom("symbolic method without a name"))?;
        Ok(SymbolicMethod::new(name, elements))
    }
}

/// Simple name of a full type name: paths, references, smart pointers and
/// generic arguments are dropped, sequences become `T[]` and `str` becomes
/// `String`. Trait objects use their first bound.
pub fn simple_type_name(full: &str) -> String {
    let ty = full.trim();
    let ty = ty.strip_prefix('&').map(str::trim_start).unwrap_or(ty);
    let ty = ty.strip_prefix("mut ").unwrap_or(ty).trim();
    let ty = ty.strip_prefix("dyn ").unwrap_or(ty);

    if let Some(inner) = ty.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let element = inner.split(';').next().unwrap_or(inner);
        return format!("{}[]", simple_type_name(element));
    }

    let base = first_bound(ty);
    if let Some(open) = base.find('<') {
        let outer = last_segment(&base[..open]);
        let close = base.rfind('>').filter(|&close| close > open).unwrap_or(base.len());
        let inner = &base[open + 1..close];
        return match outer {
            "Arc" | "Box" | "Rc" | "Option" => simple_type_name(inner),
            "Vec" => format!("{}[]", simple_type_name(inner)),
            other => other.to_string(),
        };
    }

    match last_segment(base) {
        "str" => "String".to_string(),
        "()" => "void".to_string(),
        other => other.to_string(),
    }
}

/// Type up to its first top-level `+`
fn first_bound(ty: &str) -> &str {
    let mut depth = 0usize;
    let mut previous = ' ';
    for (index, c) in ty.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            // `->` of a function signature
            '>' if previous == '-' => {}
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            '+' if depth == 0 => return ty[..index].trim(),
            _ => {}
        }
        previous = c;
    }
    ty.trim()
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::sync::Arc;

    use crate::meta::{JavaConstant, ResolvedJavaMethod};
    use crate::proxy::MethodSignature;

    fn hash_of(method: &SymbolicMethod) -> u64 {
        let mut hasher = DefaultHasher::new();
        method.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_structural_equality() {
        let a = SymbolicMethod::from_static("lookup_constant", &["i32", "bool"]);
        let b = SymbolicMethod::new("lookup_constant", ["i32", "bool"]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let other_name = SymbolicMethod::new("lookup_type", ["i32", "bool"]);
        let other_param = SymbolicMethod::new("lookup_constant", ["i32", "i32"]);
        let fewer = SymbolicMethod::new("lookup_constant", ["i32"]);
        assert_ne!(a, other_name);
        assert_ne!(a, other_param);
        assert_ne!(a, fewer);
    }

    #[test]
    fn test_accessors_and_display() {
        let method = SymbolicMethod::from_static("get_field_offset", &["String"]);
        assert_eq!(method.name(), "get_field_offset");
        assert_eq!(method.param_count(), 1);
        assert_eq!(method.param(0), Some("String"));
        assert_eq!(method.param(1), None);
        assert_eq!(method.elements().collect::<Vec<_>>(), vec!["get_field_offset", "String"]);
        assert_eq!(method.to_string(), "get_field_offset(String)");
        assert_eq!(SymbolicMethod::new("get_name", Vec::<String>::new()).to_string(), "get_name()");
    }

    #[test]
    fn test_synthesize_from_type_names() {
        let method = SymbolicMethod::synthesize(
            "read_field_value",
            &[
                std::any::type_name::<&Arc<dyn ResolvedJavaMethod>>(),
                std::any::type_name::<&JavaConstant>(),
            ],
        );
        assert_eq!(
            method,
            SymbolicMethod::from_static("read_field_value", &["ResolvedJavaMethod", "JavaConstant"])
        );

        assert_eq!(simple_type_name(std::any::type_name::<&str>()), "String");
        assert_eq!(simple_type_name(std::any::type_name::<Vec<i64>>()), "i64[]");
        assert_eq!(simple_type_name(std::any::type_name::<&[u8]>()), "u8[]");
        assert_eq!(simple_type_name(std::any::type_name::<Option<String>>()), "String");
        assert_eq!(simple_type_name("dyn crate::meta::Signature + Send"), "Signature");
    }

    #[test]
    fn test_generic_trait_objects_drop_arguments() {
        assert_eq!(simple_type_name("dyn crate::meta::Handler<i32> + Send"), "Handler");
        assert_eq!(simple_type_name("&alloc::sync::Arc<dyn Handler<u8> + Send + Sync>"), "Handler");
        assert_eq!(
            simple_type_name(std::any::type_name::<&dyn Iterator<Item = i32>>()),
            "Iterator"
        );
        assert_eq!(simple_type_name("Vec<Option<Arc<dyn Handler<u8> + Send>>>"), "Handler[]");
    }

    #[test]
    fn test_serde_as_sequence() {
        let method = SymbolicMethod::from_static("get_parameter_count", &["bool"]);
        let json = serde_json::to_string(&method).unwrap();
        assert_eq!(json, r#"["get_parameter_count","bool"]"#);

        let back: SymbolicMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, method);
        assert!(serde_json::from_str::<SymbolicMethod>("[]").is_err());
    }

    const BASE: InterfaceDescriptor = InterfaceDescriptor {
        name: "Base",
        methods: &[MethodSignature {
            name: "get_name",
            params: &[],
            proxied: true,
        }],
        supers: &[],
        symbols: &[],
    };

    const DERIVED: InterfaceDescriptor = InterfaceDescriptor {
        name: "Derived",
        methods: &[MethodSignature {
            name: "get_offset",
            params: &["i32"],
            proxied: true,
        }],
        supers: &[&BASE],
        symbols: &[],
    };

    #[test]
    fn test_verified_declared_and_inherited() {
        assert!(SymbolicMethod::verified("get_offset", &["i32"], &[&DERIVED]).is_ok());
        assert!(SymbolicMethod::verified("get_name", &[], &[&DERIVED]).is_ok());
        assert!(SymbolicMethod::verified("get_name", &[], &[&DERIVED, &BASE]).is_ok());
    }

    #[cfg(not(feature = "minimal-footprint"))]
    #[test]
    fn test_verified_rejects_drift() {
        let err = SymbolicMethod::verified("get_offset", &["i64"], &[&DERIVED, &BASE]).unwrap_err();
        assert_eq!(
            err,
            ProxyError::MethodNotFound {
                method: "get_offset(i64)".to_string(),
                receivers: "Derived, Base".to_string(),
            }
        );
    }

    #[cfg(feature = "minimal-footprint")]
    #[test]
    fn test_verified_skips_lookup() {
        assert!(SymbolicMethod::verified("missing", &[], &[&BASE]).is_ok());
    }
}
