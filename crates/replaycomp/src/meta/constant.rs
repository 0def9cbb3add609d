//! Constants
//!
//! Constants that denote runtime objects are compiler-interface objects of
//! exactly two kinds, object constants and metaspace constants, sharing the
//! `Constant` base. Primitive and null constants are plain values.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{
    CompilerObject, CompilerObjectMethods, JavaKind, JavaTypeRef, MetaObject, ResolvedJavaMethod, ResolvedObjectType,
};
use crate::proxy::{ConstantProxy, MetaspaceConstantProxy, ObjectConstantProxy};

#[compilation_proxy(receiver = as_constant, proxies(ObjectConstantProxy, MetaspaceConstantProxy))]
pub trait Constant: CompilerObject {
    fn to_value_string(&self) -> CiResult<String>;
    fn is_compressible(&self) -> CiResult<bool>;
    fn is_compressed(&self) -> CiResult<bool>;
    fn compress(&self) -> CiResult<JavaConstant>;
    fn uncompress(&self) -> CiResult<JavaConstant>;
    fn is_default_for_kind(&self) -> CiResult<bool>;
}

#[compilation_proxy(receiver = as_object_constant, proxies(ObjectConstantProxy))]
pub trait ObjectConstant: Constant {
    fn get_type(&self) -> CiResult<Arc<dyn ResolvedObjectType>>;
    fn get_identity_hash_code(&self) -> CiResult<i32>;
    fn get_java_kind(&self) -> CiResult<JavaKind>;
    fn is_null(&self) -> CiResult<bool>;
    fn get_call_site_target(&self) -> CiResult<Option<JavaConstant>>;
    fn as_boxed_primitive(&self) -> CiResult<Option<JavaConstant>>;
}

#[compilation_proxy(receiver = as_metaspace_constant, proxies(MetaspaceConstantProxy))]
pub trait MetaspaceConstant: Constant {
    fn as_resolved_java_type(&self) -> CiResult<Option<JavaTypeRef>>;
    fn as_resolved_java_method(&self) -> CiResult<Option<Arc<dyn ResolvedJavaMethod>>>;
    fn raw_value(&self) -> CiResult<i64>;

    fn is_type_constant(&self) -> CiResult<bool> {
        Ok(self.as_resolved_java_type()?.is_some())
    }
}

/// A primitive constant: kind plus raw bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveConstant {
    pub kind: JavaKind,
    pub raw: i64,
}

impl PrimitiveConstant {
    pub fn as_int(&self) -> i32 {
        self.raw as i32
    }

    pub fn as_long(&self) -> i64 {
        self.raw
    }

    pub fn as_boolean(&self) -> bool {
        self.raw != 0
    }

    pub fn as_double(&self) -> f64 {
        f64::from_bits(self.raw as u64)
    }

    pub fn is_default_for_kind(&self) -> bool {
        self.raw == 0
    }
}

/// A constant operand or result
#[derive(Clone)]
pub enum JavaConstant {
    /// The null reference
    Null,
    Primitive(PrimitiveConstant),
    Object(Arc<dyn ObjectConstant>),
    Metaspace(Arc<dyn MetaspaceConstant>),
}

impl JavaConstant {
    pub fn for_int(value: i32) -> Self {
        JavaConstant::Primitive(PrimitiveConstant {
            kind: JavaKind::Int,
            raw: value as i64,
        })
    }

    pub fn for_long(value: i64) -> Self {
        JavaConstant::Primitive(PrimitiveConstant {
            kind: JavaKind::Long,
            raw: value,
        })
    }

    pub fn for_boolean(value: bool) -> Self {
        JavaConstant::Primitive(PrimitiveConstant {
            kind: JavaKind::Boolean,
            raw: value as i64,
        })
    }

    pub fn for_double(value: f64) -> Self {
        JavaConstant::Primitive(PrimitiveConstant {
            kind: JavaKind::Double,
            raw: value.to_bits() as i64,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JavaConstant::Null)
    }

    pub fn as_primitive(&self) -> Option<PrimitiveConstant> {
        match self {
            JavaConstant::Primitive(primitive) => Some(*primitive),
            _ => None,
        }
    }

    /// Compiler-object view of object and metaspace constants
    pub fn as_constant(&self) -> Option<&dyn Constant> {
        match self {
            JavaConstant::Object(object) => Some(&**object as &dyn Constant),
            JavaConstant::Metaspace(metaspace) => Some(&**metaspace as &dyn Constant),
            _ => None,
        }
    }

    /// Proxy view of an object or metaspace constant, `None` otherwise
    pub fn as_proxy(&self) -> Option<&dyn ConstantProxy> {
        self.as_constant()?.as_compilation_proxy()?.as_constant_proxy()
    }

    fn as_meta_object(&self) -> Option<MetaObject> {
        match self {
            JavaConstant::Object(object) => Some(MetaObject::ObjectConstant(object.clone())),
            JavaConstant::Metaspace(metaspace) => Some(MetaObject::MetaspaceConstant(metaspace.clone())),
            _ => None,
        }
    }
}

impl PartialEq for JavaConstant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JavaConstant::Null, JavaConstant::Null) => true,
            (JavaConstant::Primitive(a), JavaConstant::Primitive(b)) => a == b,
            _ => match (self.as_meta_object(), other.as_meta_object()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Debug for JavaConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaConstant::Null => f.write_str("null"),
            JavaConstant::Primitive(primitive) => write!(f, "{}[{}]", primitive.kind.java_name(), primitive.raw),
            _ => match self.as_meta_object() {
                Some(object) => fmt::Debug::fmt(&object, f),
                None => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_constants() {
        let int = JavaConstant::for_int(-3);
        assert_eq!(int.as_primitive().map(|p| p.as_int()), Some(-3));
        assert_eq!(JavaConstant::for_double(1.5).as_primitive().map(|p| p.as_double()), Some(1.5));
        assert!(JavaConstant::for_boolean(false).as_primitive().unwrap().is_default_for_kind());
        assert_ne!(JavaConstant::for_int(1), JavaConstant::for_long(1));
        assert_eq!(JavaConstant::Null, JavaConstant::Null);
        assert!(JavaConstant::Null.as_constant().is_none());
        assert_eq!(format!("{:?}", JavaConstant::for_int(7)), "int[7]");
    }
}
