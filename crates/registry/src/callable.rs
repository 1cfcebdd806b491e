//! Callables: type-erased host functions and methods that can back a
//! contract method.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use rebind_core::{CallError, ObjectRef, TargetResult, Value};

/// Whether a callable is invoked with or without a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverKind {
    /// Free function; any bound receiver is ignored.
    Static,
    /// Method; needs the receiver it was bound against.
    Instance,
}

type Invoke = dyn Fn(Option<&ObjectRef>, &[Value]) -> TargetResult + Send + Sync;

/// A host implementation that a binding can point at.
#[derive(Clone)]
pub struct Callable {
    kind: ReceiverKind,
    invoke: Arc<Invoke>,
}

impl Callable {
    /// Wraps a free function.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> TargetResult + Send + Sync + 'static,
    {
        Self {
            kind: ReceiverKind::Static,
            invoke: Arc::new(move |_receiver: Option<&ObjectRef>, args: &[Value]| f(args)),
        }
    }

    /// Wraps a method of `T`. The receiver is downcast on every call; a
    /// missing or foreign receiver fails the call with a [`CallError`].
    pub fn method<T, F>(f: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T, &[Value]) -> TargetResult + Send + Sync + 'static,
    {
        Self {
            kind: ReceiverKind::Instance,
            invoke: Arc::new(move |receiver: Option<&ObjectRef>, args: &[Value]| -> TargetResult {
                let receiver = receiver.ok_or(CallError::MissingReceiver)?;
                let this = receiver
                    .downcast_ref::<T>()
                    .ok_or_else(|| CallError::ReceiverType {
                        expected: type_name::<T>().to_string(),
                        found: receiver.type_name().to_string(),
                    })?;
                f(this, args)
            }),
        }
    }

    /// Wraps a closure that sees the raw receiver.
    pub fn raw<F>(kind: ReceiverKind, f: F) -> Self
    where
        F: Fn(Option<&ObjectRef>, &[Value]) -> TargetResult + Send + Sync + 'static,
    {
        Self {
            kind,
            invoke: Arc::new(f),
        }
    }

    pub fn receiver_kind(&self) -> ReceiverKind {
        self.kind
    }

    pub fn invoke(&self, receiver: Option<&ObjectRef>, args: &[Value]) -> TargetResult {
        (self.invoke)(receiver, args)
    }

    /// True when both handles share the same implementation.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.invoke, &other.invoke)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
