//! Recording handler
//!
//! Decorates another handler and keeps an in-memory log of every call that
//! passes through it: which interface, which symbolic method, the boxed
//! arguments and the outcome. The log lock is never held while the inner
//! handler runs, so reentrant calls from within the inner handler (or from
//! the real object behind it) are logged like any other call.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::json;
use tracing::{debug, trace};

use crate::error::{CiError, CiResult};
use crate::meta::Value;
use crate::proxy::{CompilationProxy, InterfaceKind, InvocationHandler, NormalizedInvokable, SymbolicMethod};

/// Recording options
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Keep the boxed arguments of each call
    pub record_arguments: bool,
    /// Calls beyond this many are passed through without being logged
    pub max_calls: usize,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            record_arguments: true,
            max_calls: usize::MAX,
        }
    }
}

/// How a logged call ended
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The inner handler has not returned yet
    Pending,
    Returned(Value),
    Failed(CiError),
}

/// One logged call
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// Order in which calls entered the handler
    pub seq: u64,
    pub interface: InterfaceKind,
    pub method: SymbolicMethod,
    /// Empty when arguments are not recorded
    pub args: Vec<Value>,
    pub outcome: CallOutcome,
}

/// Handler decorator logging every call around `inner`
pub struct RecordingHandler<H> {
    inner: H,
    config: RecordingConfig,
    next_seq: AtomicU64,
    log: Mutex<Vec<CallRecord>>,
}

impl<H: InvocationHandler> RecordingHandler<H> {
    pub fn new(inner: H) -> Self {
        Self::with_config(inner, RecordingConfig::default())
    }

    pub fn with_config(inner: H, config: RecordingConfig) -> Self {
        RecordingHandler {
            inner,
            config,
            next_seq: AtomicU64::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn config(&self) -> &RecordingConfig {
        &self.config
    }

    /// Snapshot of the log, in entry order
    pub fn calls(&self) -> Vec<CallRecord> {
        self.log.lock().clone()
    }

    /// Drains the log
    pub fn take_calls(&self) -> Vec<CallRecord> {
        std::mem::take(&mut *self.log.lock())
    }

    /// Number of logged calls per `(interface, method)`
    pub fn call_counts(&self) -> FxHashMap<(InterfaceKind, SymbolicMethod), usize> {
        let mut counts = FxHashMap::default();
        for record in self.log.lock().iter() {
            *counts.entry((record.interface, record.method.clone())).or_insert(0) += 1;
        }
        counts
    }

    /// Diagnostic summary of the log
    pub fn summary_json(&self) -> serde_json::Value {
        let log = self.log.lock();
        let failed = log
            .iter()
            .filter(|record| matches!(record.outcome, CallOutcome::Failed(_)))
            .count();
        let pending = log
            .iter()
            .filter(|record| matches!(record.outcome, CallOutcome::Pending))
            .count();

        let mut methods: FxHashMap<String, usize> = FxHashMap::default();
        for record in log.iter() {
            *methods
                .entry(format!("{}.{}", record.interface, record.method))
                .or_insert(0) += 1;
        }
        let mut methods: Vec<_> = methods.into_iter().collect();
        methods.sort();

        json!({
            "calls": log.len(),
            "failed": failed,
            "pending": pending,
            "methods": methods
                .into_iter()
                .map(|(method, count)| json!({ "method": method, "count": count }))
                .collect::<Vec<_>>(),
        })
    }

    fn begin(&self, interface: InterfaceKind, method: &SymbolicMethod, args: Option<&[Value]>) -> Option<u64> {
        let mut log = self.log.lock();
        // Allocated under the log lock so log order is seq order
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        if log.len() >= self.config.max_calls {
            trace!(seq, %method, "call log full");
            return None;
        }
        let args = match args {
            Some(args) if self.config.record_arguments => args.to_vec(),
            _ => Vec::new(),
        };
        log.push(CallRecord {
            seq,
            interface,
            method: method.clone(),
            args,
            outcome: CallOutcome::Pending,
        });
        Some(seq)
    }

    fn finish(&self, seq: u64, result: &CiResult<Value>) {
        let mut log = self.log.lock();
        // Missing when the log was drained while the call was running
        if let Some(record) = log.iter_mut().rev().find(|record| record.seq == seq) {
            record.outcome = match result {
                Ok(value) => CallOutcome::Returned(value.clone()),
                Err(err) => CallOutcome::Failed(err.clone()),
            };
        }
    }
}

impl<H: InvocationHandler> InvocationHandler for RecordingHandler<H> {
    fn handle(
        &self,
        proxy: &dyn CompilationProxy,
        method: &SymbolicMethod,
        invokable: NormalizedInvokable,
        args: Option<&[Value]>,
    ) -> CiResult<Value> {
        let interface = proxy.interface();
        let seq = self.begin(interface, method, args);

        let result = self.inner.handle(proxy, method, invokable, args);

        if let Some(seq) = seq {
            if let Err(err) = &result {
                debug!(seq, %interface, %method, error = %err, "recorded failure");
            }
            self.finish(seq, &result);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::error::RuntimeErrorKind;
    use crate::meta::{MetaObject, Signature};
    use crate::proxy::create_proxy;

    /// Answers `get_parameter_count` with the argument count it was given
    /// and fails everything else
    struct Scripted;

    impl InvocationHandler for Scripted {
        fn handle(
            &self,
            _proxy: &dyn CompilationProxy,
            method: &SymbolicMethod,
            _invokable: NormalizedInvokable,
            args: Option<&[Value]>,
        ) -> CiResult<Value> {
            match method.name() {
                "get_parameter_count" => Ok(Value::Int(args.map_or(0, <[Value]>::len) as i32)),
                _ => Err(CiError::unsupported(method.to_string())),
            }
        }
    }

    fn signature(handler: Arc<RecordingHandler<Scripted>>) -> MetaObject {
        create_proxy(InterfaceKind::Signature, handler)
    }

    #[test]
    fn test_records_calls_in_order() {
        let recorder = Arc::new(RecordingHandler::new(Scripted));
        let object = signature(recorder.clone());
        let sig = object.as_signature().unwrap();

        assert_eq!(sig.get_parameter_count(true).unwrap(), 1);
        assert!(sig.get_return_kind().is_err());

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].seq, 0);
        assert_eq!(calls[0].interface, InterfaceKind::Signature);
        assert_eq!(calls[0].method, SymbolicMethod::from_static("get_parameter_count", &["bool"]));
        assert_eq!(calls[0].args, vec![Value::Bool(true)]);
        assert_eq!(calls[0].outcome, CallOutcome::Returned(Value::Int(1)));

        assert_eq!(calls[1].method.name(), "get_return_kind");
        assert!(calls[1].args.is_empty());
        match &calls[1].outcome {
            CallOutcome::Failed(err) => assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::UnsupportedOperation)),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_config_limits_log() {
        let config = RecordingConfig {
            record_arguments: false,
            max_calls: 2,
        };
        let recorder = Arc::new(RecordingHandler::with_config(Scripted, config));
        let object = signature(recorder.clone());
        let sig = object.as_signature().unwrap();

        for _ in 0..5 {
            assert_eq!(sig.get_parameter_count(false).unwrap(), 1);
        }

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|record| record.args.is_empty()));
    }

    #[test]
    fn test_take_counts_and_summary() {
        let recorder = Arc::new(RecordingHandler::new(Scripted));
        let object = signature(recorder.clone());
        let sig = object.as_signature().unwrap();
        sig.get_parameter_count(true).unwrap();
        sig.get_parameter_count(false).unwrap();
        let _ = sig.get_return_kind();

        let counts = recorder.call_counts();
        let key = (
            InterfaceKind::Signature,
            SymbolicMethod::from_static("get_parameter_count", &["bool"]),
        );
        assert_eq!(counts.get(&key), Some(&2));

        let summary = recorder.summary_json();
        assert_eq!(summary["calls"], 3);
        assert_eq!(summary["failed"], 1);
        assert_eq!(summary["pending"], 0);
        assert_eq!(summary["methods"][0]["method"], "Signature.get_parameter_count(bool)");
        assert_eq!(summary["methods"][0]["count"], 2);

        assert_eq!(recorder.take_calls().len(), 3);
        assert!(recorder.calls().is_empty());
    }
}
