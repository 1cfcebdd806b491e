//! Member catalogs: the injectable replacement for runtime reflection.
//!
//! A registry never inspects types on its own. It asks a [`MemberCatalog`]
//! for contract descriptors (by name) and for the public members of a type
//! (by type name). [`TypeCatalog`] is the bundled in-memory catalog; hosts
//! with their own registration mechanism implement the trait directly.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

use rebind_core::{ContractDescriptor, ObjectRef, ParamKind, TargetResult, Value};

use crate::callable::{Callable, ReceiverKind};

/// A public member of a type, as seen by the registry.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub params: Vec<ParamKind>,
    pub callable: Callable,
}

impl Member {
    pub fn new<S: Into<String>>(name: S, params: Vec<ParamKind>, callable: Callable) -> Self {
        Self {
            name: name.into(),
            params,
            callable,
        }
    }

    pub fn receiver_kind(&self) -> ReceiverKind {
        self.callable.receiver_kind()
    }
}

/// Source of contract descriptors and type members.
pub trait MemberCatalog: Send + Sync {
    /// Looks up a contract by name.
    fn contract(&self, name: &str) -> Option<ContractDescriptor>;

    /// Public members of `type_name`, in a stable order.
    ///
    /// Bulk rebinding walks this list front to back, so when two members
    /// match the same contract method the later one wins.
    fn members(&self, type_name: &str) -> Vec<Member>;
}

/// In-memory catalog filled by explicit registration.
///
/// Members are kept in registration order per type. Registration goes
/// through `&self`, so a shared catalog can keep growing while registries
/// built from it are in use.
#[derive(Default)]
pub struct TypeCatalog {
    contracts: RwLock<IndexMap<String, ContractDescriptor>>,
    members: RwLock<IndexMap<String, Vec<Member>>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shared catalog, ready to hand to registries.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Registers (or replaces) a contract descriptor under its own name.
    pub fn register_contract(&self, contract: ContractDescriptor) -> &Self {
        self.contracts.write().insert(contract.name.clone(), contract);
        self
    }

    /// Appends a member to `type_name`.
    pub fn register_member<S: Into<String>>(&self, type_name: S, member: Member) -> &Self {
        self.members
            .write()
            .entry(type_name.into())
            .or_default()
            .push(member);
        self
    }

    /// Registers a receiver-less member.
    pub fn register_function<T, N, F>(
        &self,
        type_name: T,
        name: N,
        params: Vec<ParamKind>,
        f: F,
    ) -> &Self
    where
        T: Into<String>,
        N: Into<String>,
        F: Fn(&[Value]) -> TargetResult + Send + Sync + 'static,
    {
        self.register_member(type_name, Member::new(name, params, Callable::function(f)))
    }

    /// Registers a member invoked against an instance of `R`.
    pub fn register_method<R, T, N, F>(
        &self,
        type_name: T,
        name: N,
        params: Vec<ParamKind>,
        f: F,
    ) -> &Self
    where
        R: Any + Send + Sync,
        T: Into<String>,
        N: Into<String>,
        F: Fn(&R, &[Value]) -> TargetResult + Send + Sync + 'static,
    {
        self.register_member(type_name, Member::new(name, params, Callable::method(f)))
    }

    /// Number of members registered for `type_name`.
    pub fn member_count(&self, type_name: &str) -> usize {
        self.members.read().get(type_name).map_or(0, Vec::len)
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.members.read().contains_key(type_name)
    }

    /// Wraps `object` as an instance of the catalogued type `type_name`.
    pub fn instance<T, S>(&self, type_name: S, object: T) -> ObjectRef
    where
        T: Any + Send + Sync,
        S: Into<Arc<str>>,
    {
        ObjectRef::new(type_name, object)
    }
}

impl MemberCatalog for TypeCatalog {
    fn contract(&self, name: &str) -> Option<ContractDescriptor> {
        self.contracts.read().get(name).cloned()
    }

    fn members(&self, type_name: &str) -> Vec<Member> {
        self.members
            .read()
            .get(type_name)
            .cloned()
            .unwrap_or_default()
    }
}
