//! Dispatch proxies: the live objects callers invoke.

use std::fmt;
use std::sync::Arc;

use rebind_core::{DispatchResult, MethodSignature, Value};

use crate::registry::ContractRegistry;

/// A callable stand-in for a contract.
///
/// Every call is routed through the owning registry's binding table at call
/// time. Handles are cheap to clone and all of them share one registry.
#[derive(Clone)]
pub struct DispatchProxy {
    registry: Arc<ContractRegistry>,
}

impl DispatchProxy {
    pub(crate) fn new(registry: Arc<ContractRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this proxy dispatches through.
    ///
    /// Its name is [`rebind_core::RESERVED_ACCESSOR`]; no contract method may
    /// share it.
    pub fn get_owning_registry(&self) -> &Arc<ContractRegistry> {
        &self.registry
    }

    pub fn contract_name(&self) -> &str {
        self.registry.contract_name()
    }

    /// Invokes the contract method `signature` with `args`.
    pub fn dispatch(&self, signature: &MethodSignature, args: &[Value]) -> DispatchResult<Value> {
        self.registry.dispatch(signature, args)
    }

    /// Invokes the overload of `name` that accepts `args`.
    pub fn call(&self, name: &str, args: &[Value]) -> DispatchResult<Value> {
        self.registry.call(name, args)
    }

    /// True when both handles dispatch through the same registry.
    pub fn same_registry(&self, other: &DispatchProxy) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }
}

impl fmt::Debug for DispatchProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchProxy")
            .field("contract", &self.registry.contract_name())
            .finish()
    }
}
