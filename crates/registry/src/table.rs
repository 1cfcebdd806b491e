//! The binding table: one slot per contract method, each holding either a
//! binding or nothing.

use dashmap::DashMap;
use std::sync::Arc;

use rebind_core::{MethodSignature, ObjectRef, TargetResult, Value};

use crate::callable::Callable;

/// The implementation currently backing a contract method.
#[derive(Debug, Clone)]
pub struct Binding {
    target: Callable,
    receiver: Option<ObjectRef>,
}

impl Binding {
    pub fn new(target: Callable, receiver: Option<ObjectRef>) -> Self {
        Self { target, receiver }
    }

    pub fn target(&self) -> &Callable {
        &self.target
    }

    pub fn receiver(&self) -> Option<&ObjectRef> {
        self.receiver.as_ref()
    }

    pub fn invoke(&self, args: &[Value]) -> TargetResult {
        self.target.invoke(self.receiver.as_ref(), args)
    }
}

/// A slot's state. `None` is the undefined state.
pub type Slot = Option<Arc<Binding>>;

/// Lock-striped table from signature to slot.
///
/// The key set is fixed when the table is built: writes only ever replace
/// the slot of an existing key, so every signature is always either bound or
/// undefined. A binding is swapped as a single `Arc`, which keeps target and
/// receiver consistent for concurrent readers.
pub struct BindingTable {
    slots: DashMap<MethodSignature, Slot>,
}

impl BindingTable {
    /// Builds a table with every signature undefined.
    pub fn new<I>(signatures: I) -> Self
    where
        I: IntoIterator<Item = MethodSignature>,
    {
        let slots = DashMap::new();
        for signature in signatures {
            slots.insert(signature, None);
        }
        Self { slots }
    }

    pub fn contains(&self, signature: &MethodSignature) -> bool {
        self.slots.contains_key(signature)
    }

    /// Current state of `signature`; `None` when it is not in the table.
    ///
    /// The returned slot is a clone; the shard lock is released before this
    /// returns.
    pub fn get(&self, signature: &MethodSignature) -> Option<Slot> {
        self.slots.get(signature).map(|slot| slot.value().clone())
    }

    /// Replaces the slot of `signature`, returning the previous state.
    ///
    /// Returns `None` without touching the table when the signature is unknown.
    pub fn set(&self, signature: &MethodSignature, binding: Option<Binding>) -> Option<Slot> {
        let mut slot = self.slots.get_mut(signature)?;
        Some(std::mem::replace(slot.value_mut(), binding.map(Arc::new)))
    }

    pub fn is_bound(&self, signature: &MethodSignature) -> bool {
        matches!(self.get(signature), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of bound slots. Not atomic across shards.
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|entry| entry.value().is_some()).count()
    }
}
