//! Boxed arguments and results
//!
//! Proxies pack the arguments of an operation into a `Vec<Value>` and the
//! handler answers with a single `Value`, which the proxy unpacks back to the
//! operation's declared result type. `Null` is the absent value: `None`,
//! unit results and the empty argument list.

use crate::error::{CiError, CiResult};
use crate::meta::{
    CompiledCode, DeoptimizationAction, DeoptimizationReason, ExceptionHandler, JavaConstant, JavaKind,
    JavaMethodProfile, JavaTypeProfile, JavaTypeRef, LineNumberTable, MetaObject, MethodHandleIntrinsic,
    PrimitiveConstant, Speculation, SpeculationReason, StackTraceElement, TriState,
};

// ============================================================================
// Value
// ============================================================================

/// A boxed argument or result of a compiler-interface operation
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(u8),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    /// A compiler-interface object, real or proxy
    Object(MetaObject),
    /// A primitive constant
    Primitive(PrimitiveConstant),
    /// The null constant (distinct from an absent constant)
    NullConstant,
    Kind(JavaKind),
    TriState(TriState),
    DeoptAction(DeoptimizationAction),
    DeoptReason(DeoptimizationReason),
    Intrinsic(MethodHandleIntrinsic),
    StackTrace(StackTraceElement),
    ExceptionHandler(ExceptionHandler),
    LineNumbers(LineNumberTable),
    TypeProfile(JavaTypeProfile),
    MethodProfile(JavaMethodProfile),
    SpeculationReason(SpeculationReason),
    Speculation(Speculation),
    CompiledCode(CompiledCode),
}

impl Value {
    /// Short name of the carried kind, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Byte(_) => "u8",
            Value::Int(_) => "i32",
            Value::Long(_) => "i64",
            Value::Double(_) => "f64",
            Value::String(_) => "String",
            Value::Array(_) => "array",
            Value::Object(object) => object.kind().name(),
            Value::Primitive(_) => "PrimitiveConstant",
            Value::NullConstant => "NullConstant",
            Value::Kind(_) => "JavaKind",
            Value::TriState(_) => "TriState",
            Value::DeoptAction(_) => "DeoptimizationAction",
            Value::DeoptReason(_) => "DeoptimizationReason",
            Value::Intrinsic(_) => "MethodHandleIntrinsic",
            Value::StackTrace(_) => "StackTraceElement",
            Value::ExceptionHandler(_) => "ExceptionHandler",
            Value::LineNumbers(_) => "LineNumberTable",
            Value::TypeProfile(_) => "JavaTypeProfile",
            Value::MethodProfile(_) => "JavaMethodProfile",
            Value::SpeculationReason(_) => "SpeculationReason",
            Value::Speculation(_) => "Speculation",
            Value::CompiledCode(_) => "CompiledCode",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&MetaObject> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Class cast failure for a value of the wrong kind
pub(crate) fn mismatch(expected: &str, got: &Value) -> CiError {
    CiError::class_cast(format!("expected {}, got {}", expected, got.type_name()))
}

// ============================================================================
// Conversion traits
// ============================================================================

/// Boxes an operand or result
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Unboxes an operand or result; a value of the wrong kind is a class cast
/// failure
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> CiResult<Self>;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> CiResult<Self> {
        Ok(value.clone())
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> CiResult<Self> {
        match value {
            Value::Null => Ok(()),
            other => Err(mismatch("void", other)),
        }
    }
}

macro_rules! boxed_values {
    ($($ty:ty => $variant:ident;)*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }
            }

            impl FromValue for $ty {
                fn from_value(value: &Value) -> CiResult<Self> {
                    match value {
                        Value::$variant(inner) => Ok(inner.clone()),
                        other => Err(mismatch(stringify!($ty), other)),
                    }
                }
            }
        )*
    };
}

boxed_values! {
    bool => Bool;
    u8 => Byte;
    i32 => Int;
    i64 => Long;
    f64 => Double;
    String => String;
    MetaObject => Object;
    JavaKind => Kind;
    TriState => TriState;
    DeoptimizationAction => DeoptAction;
    DeoptimizationReason => DeoptReason;
    MethodHandleIntrinsic => Intrinsic;
    StackTraceElement => StackTrace;
    ExceptionHandler => ExceptionHandler;
    LineNumberTable => LineNumbers;
    JavaTypeProfile => TypeProfile;
    JavaMethodProfile => MethodProfile;
    SpeculationReason => SpeculationReason;
    Speculation => Speculation;
    CompiledCode => CompiledCode;
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> CiResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> CiResult<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            other => Err(mismatch("array", other)),
        }
    }
}

// ============================================================================
// Type and constant families
// ============================================================================

impl ToValue for JavaTypeRef {
    fn to_value(&self) -> Value {
        Value::Object(MetaObject::from(self.clone()))
    }
}

impl FromValue for JavaTypeRef {
    fn from_value(value: &Value) -> CiResult<Self> {
        value
            .as_object()
            .and_then(MetaObject::java_type)
            .ok_or_else(|| mismatch("ResolvedJavaType", value))
    }
}

impl ToValue for JavaConstant {
    fn to_value(&self) -> Value {
        match self {
            JavaConstant::Null => Value::NullConstant,
            JavaConstant::Primitive(primitive) => Value::Primitive(*primitive),
            JavaConstant::Object(object) => Value::Object(MetaObject::ObjectConstant(object.clone())),
            JavaConstant::Metaspace(metaspace) => Value::Object(MetaObject::MetaspaceConstant(metaspace.clone())),
        }
    }
}

impl FromValue for JavaConstant {
    fn from_value(value: &Value) -> CiResult<Self> {
        match value {
            Value::NullConstant => Ok(JavaConstant::Null),
            Value::Primitive(primitive) => Ok(JavaConstant::Primitive(*primitive)),
            Value::Object(MetaObject::ObjectConstant(object)) => Ok(JavaConstant::Object(object.clone())),
            Value::Object(MetaObject::MetaspaceConstant(metaspace)) => Ok(JavaConstant::Metaspace(metaspace.clone())),
            other => Err(mismatch("JavaConstant", other)),
        }
    }
}
