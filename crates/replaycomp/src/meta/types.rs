//! Resolved types
//!
//! `ResolvedJavaType` is the shared base of exactly two kinds, object types
//! and primitive types. Type-valued operands and results are carried as
//! [`JavaTypeRef`].

use std::fmt;
use std::sync::Arc;

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::data::{modifiers, to_java_name};
use crate::meta::{
    CompilerObject, CompilerObjectMethods, JavaConstant, JavaKind, MetaObject, ResolvedJavaField, ResolvedJavaMethod,
};
use crate::proxy::{ResolvedJavaTypeProxy, ResolvedObjectTypeProxy, ResolvedPrimitiveTypeProxy};

#[compilation_proxy(
    receiver = as_resolved_java_type,
    proxies(ResolvedObjectTypeProxy, ResolvedPrimitiveTypeProxy)
)]
pub trait ResolvedJavaType: CompilerObject {
    /// Internal name, e.g. `Ljava/lang/String;` or `I`
    fn get_name(&self) -> CiResult<String>;
    fn get_java_kind(&self) -> CiResult<JavaKind>;
    fn get_modifiers(&self) -> CiResult<i32>;
    fn is_primitive(&self) -> CiResult<bool>;
    fn is_interface(&self) -> CiResult<bool>;
    fn is_initialized(&self) -> CiResult<bool>;
    fn is_linked(&self) -> CiResult<bool>;
    fn is_assignable_from(&self, other: &JavaTypeRef) -> CiResult<bool>;
    fn get_component_type(&self) -> CiResult<Option<JavaTypeRef>>;
    fn get_array_class(&self) -> CiResult<JavaTypeRef>;
    fn get_java_mirror(&self) -> CiResult<JavaConstant>;

    fn is_array(&self) -> CiResult<bool> {
        Ok(self.get_component_type()?.is_some())
    }

    fn is_final_flag_set(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::FINAL))
    }

    fn is_abstract(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::ABSTRACT))
    }

    /// Source-level name, e.g. `java.lang.String` or `int`
    fn to_java_name(&self) -> CiResult<String> {
        Ok(to_java_name(&self.get_name()?))
    }
}

#[compilation_proxy(receiver = as_resolved_object_type, proxies(ResolvedObjectTypeProxy))]
pub trait ResolvedObjectType: ResolvedJavaType {
    fn get_superclass(&self) -> CiResult<Option<Arc<dyn ResolvedObjectType>>>;
    fn get_interfaces(&self) -> CiResult<Vec<Arc<dyn ResolvedObjectType>>>;
    fn find_least_common_ancestor(&self, other: &Arc<dyn ResolvedObjectType>) -> CiResult<Arc<dyn ResolvedObjectType>>;
    fn get_instance_fields(&self, include_superclasses: bool) -> CiResult<Vec<Arc<dyn ResolvedJavaField>>>;
    fn get_static_fields(&self) -> CiResult<Vec<Arc<dyn ResolvedJavaField>>>;
    fn get_declared_methods(&self) -> CiResult<Vec<Arc<dyn ResolvedJavaMethod>>>;
    fn get_declared_constructors(&self) -> CiResult<Vec<Arc<dyn ResolvedJavaMethod>>>;
    fn get_class_initializer(&self) -> CiResult<Option<Arc<dyn ResolvedJavaMethod>>>;
    fn resolve_method(
        &self,
        method: &Arc<dyn ResolvedJavaMethod>,
        calling_class: &JavaTypeRef,
    ) -> CiResult<Option<Arc<dyn ResolvedJavaMethod>>>;
    fn is_instance(&self, constant: &JavaConstant) -> CiResult<bool>;
    fn is_primary_type(&self) -> CiResult<bool>;
    fn instance_size(&self) -> CiResult<i32>;
    fn super_check_offset(&self) -> CiResult<i32>;
    fn klass(&self) -> CiResult<JavaConstant>;
    fn get_source_file_name(&self) -> CiResult<Option<String>>;

    fn is_enum(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::ENUM))
    }
}

/// Primitive types add nothing to the base surface.
#[compilation_proxy(receiver = as_resolved_primitive_type, proxies(ResolvedPrimitiveTypeProxy))]
pub trait ResolvedPrimitiveType: ResolvedJavaType {}

/// A resolved type: one of the two type kinds
#[derive(Clone)]
pub enum JavaTypeRef {
    Object(Arc<dyn ResolvedObjectType>),
    Primitive(Arc<dyn ResolvedPrimitiveType>),
}

impl JavaTypeRef {
    pub fn as_type(&self) -> &dyn ResolvedJavaType {
        match self {
            JavaTypeRef::Object(object) => &**object as &dyn ResolvedJavaType,
            JavaTypeRef::Primitive(primitive) => &**primitive as &dyn ResolvedJavaType,
        }
    }

    pub fn as_object_type(&self) -> Option<&Arc<dyn ResolvedObjectType>> {
        match self {
            JavaTypeRef::Object(object) => Some(object),
            JavaTypeRef::Primitive(_) => None,
        }
    }

    /// Proxy view of this type, `None` for real types
    pub fn as_proxy(&self) -> Option<&dyn ResolvedJavaTypeProxy> {
        self.as_type().as_compilation_proxy()?.as_resolved_java_type_proxy()
    }
}

impl From<JavaTypeRef> for MetaObject {
    fn from(ty: JavaTypeRef) -> Self {
        match ty {
            JavaTypeRef::Object(object) => MetaObject::ResolvedObjectType(object),
            JavaTypeRef::Primitive(primitive) => MetaObject::ResolvedPrimitiveType(primitive),
        }
    }
}

impl PartialEq for JavaTypeRef {
    fn eq(&self, other: &Self) -> bool {
        MetaObject::from(self.clone()) == MetaObject::from(other.clone())
    }
}

impl fmt::Debug for JavaTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&MetaObject::from(self.clone()), f)
    }
}
