//! Replaycomp
//!
//! Interception layer over compiler-interface objects. A compiler talks to
//! its host VM through a closed set of interfaces (types, methods, fields,
//! constants, profiles, providers). This crate lets every such object be
//! replaced by a proxy whose operations are answered by an
//! [`InvocationHandler`], so a compilation can be recorded against a live VM
//! and replayed later without one.
//!
//! - **meta**: the interface traits, the data records they exchange and the
//!   boxed [`Value`] model (`meta` module)
//! - **proxy**: symbolic method identities, invokables, dispatch and the
//!   proxy factory (`proxy` module)
//! - **handlers**: forwarding and recording handlers (`handlers` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use replaycomp::{create_proxy, InterfaceKind, RecordingHandler, ForwardingHandler};
//!
//! let real: MetaObject = MetaObject::ResolvedJavaField(Arc::new(MyField));
//! let recorder = Arc::new(RecordingHandler::new(ForwardingHandler::new(real)));
//! let field = create_proxy(InterfaceKind::ResolvedJavaField, recorder.clone());
//!
//! let name = field.as_resolved_java_field().unwrap().get_name()?;
//! println!("{}", recorder.summary_json());
//! ```

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod meta;
pub mod proxy;

pub use error::{CiError, CiResult, ProxyError, RuntimeErrorKind};
pub use handlers::{CallOutcome, CallRecord, ForwardingHandler, RecordingConfig, RecordingHandler};
pub use meta::{CompilerObject, FromValue, JavaConstant, JavaTypeRef, MetaObject, ToValue, Value};
pub use proxy::{
    create_proxy, create_proxy_by_name, verify_declarations, CompilationProxy, InterfaceKind, InvocationHandler,
    InvokableMethod, NormalizedInvokable, SymbolicMethod,
};
