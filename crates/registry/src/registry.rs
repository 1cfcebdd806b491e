//! The contract registry: one binding table per contract instantiation.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use rebind_config::{BindMode, RegistryConfig};
use rebind_core::{
    BindError, BindResult, ContractDescriptor, ContractError, DispatchError, DispatchResult,
    MethodDecl, MethodSignature, ObjectRef, ParamKind, Value,
};

use crate::callable::{Callable, ReceiverKind};
use crate::catalog::MemberCatalog;
use crate::proxy::DispatchProxy;
use crate::rebinder::{self, MassBindReport, Source};
use crate::table::{Binding, BindingTable};

/// Tracks which implementation, if any, currently backs each method of one
/// contract.
///
/// Created through [`ContractRegistry::create`] together with its
/// [`DispatchProxy`]; both share the registry through an `Arc` and it lives
/// as long as either is reachable.
pub struct ContractRegistry {
    contract: ContractDescriptor,
    signatures: Arc<[MethodSignature]>,
    table: BindingTable,
    catalog: Arc<dyn MemberCatalog>,
    config: RegistryConfig,
}

impl ContractRegistry {
    /// Builds a registry for `contract` with the default configuration.
    pub fn create(
        contract: ContractDescriptor,
        catalog: Arc<dyn MemberCatalog>,
    ) -> Result<(Arc<Self>, DispatchProxy), ContractError> {
        Self::with_config(contract, catalog, RegistryConfig::default())
    }

    /// Builds a registry for the contract the catalog knows as `name`.
    pub fn create_named(
        name: &str,
        catalog: Arc<dyn MemberCatalog>,
    ) -> Result<(Arc<Self>, DispatchProxy), ContractError> {
        let contract = catalog
            .contract(name)
            .ok_or_else(|| ContractError::missing(name))?;
        Self::create(contract, catalog)
    }

    /// Builds a registry for `contract` with an explicit configuration.
    ///
    /// Every declared method is recorded and, where its original marker
    /// resolves to a receiver-less member with identical parameter kinds,
    /// bound to that member. All other methods start undefined.
    pub fn with_config(
        contract: ContractDescriptor,
        catalog: Arc<dyn MemberCatalog>,
        config: RegistryConfig,
    ) -> Result<(Arc<Self>, DispatchProxy), ContractError> {
        contract.validate()?;

        let signatures: Arc<[MethodSignature]> = contract.signatures().into();
        let table = BindingTable::new(signatures.iter().cloned());

        // Later duplicate declarations override earlier ones, same as binding.
        for decl in &contract.methods {
            if let Some(callable) = resolve_original(catalog.as_ref(), decl) {
                table.set(
                    &decl.signature(&contract.name),
                    Some(Binding::new(callable, None)),
                );
            }
        }

        let registry = Arc::new(Self {
            contract,
            signatures,
            table,
            catalog,
            config,
        });

        debug!(
            contract = %registry.contract.name,
            methods = registry.signatures.len(),
            defined = registry.table.bound_count(),
            "contract registry created"
        );

        let proxy = DispatchProxy::new(Arc::clone(&registry));
        Ok((registry, proxy))
    }

    /// Another proxy handle over this registry.
    pub fn proxy(self: &Arc<Self>) -> DispatchProxy {
        DispatchProxy::new(Arc::clone(self))
    }

    pub fn contract(&self) -> &ContractDescriptor {
        &self.contract
    }

    pub fn contract_name(&self) -> &str {
        &self.contract.name
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub(crate) fn catalog(&self) -> &dyn MemberCatalog {
        self.catalog.as_ref()
    }

    /// Installs `target` (with `receiver`) for `signature`, or makes the
    /// signature undefined when `target` is `None`.
    ///
    /// Last write wins. Unbinding an undefined signature is a no-op.
    pub fn bind(
        &self,
        signature: &MethodSignature,
        target: Option<Callable>,
        receiver: Option<ObjectRef>,
    ) -> BindResult<()> {
        let defined = target.is_some();
        let binding = target.map(|target| Binding::new(target, receiver));
        if self.table.set(signature, binding).is_none() {
            return Err(BindError::UnknownMethod {
                contract: self.contract.name.clone(),
                signature: signature.clone(),
            });
        }
        trace!(%signature, defined, "binding replaced");
        Ok(())
    }

    /// Makes `signature` undefined.
    pub fn unbind(&self, signature: &MethodSignature) -> BindResult<()> {
        self.bind(signature, None, None)
    }

    /// Binds a receiver-less implementation.
    pub fn bind_static(&self, signature: &MethodSignature, target: Callable) -> BindResult<()> {
        self.bind(signature, Some(target), None)
    }

    /// Binds an implementation invoked against `receiver`.
    pub fn bind_instance(
        &self,
        signature: &MethodSignature,
        target: Callable,
        receiver: ObjectRef,
    ) -> BindResult<()> {
        self.bind(signature, Some(target), Some(receiver))
    }

    /// Best-effort bulk rebind from a type or instance. Never fails; the
    /// report lists what was bound and what was skipped.
    pub fn mass_bind(&self, source: &Source, mode: BindMode) -> MassBindReport {
        rebinder::mass_bind(self, source, mode)
    }

    /// Binds every matching receiver-less member of `type_name`.
    pub fn mass_bind_static(&self, type_name: &str) -> MassBindReport {
        self.mass_bind(&Source::Type(type_name.to_string()), BindMode::Static)
    }

    /// Binds every matching method of `instance`'s type against `instance`.
    pub fn mass_bind_instance(&self, instance: &ObjectRef) -> MassBindReport {
        self.mass_bind(&Source::Instance(instance.clone()), BindMode::Instance)
    }

    /// Every contract signature, in declaration order.
    pub fn all_signatures(&self) -> Vec<MethodSignature> {
        self.signatures.to_vec()
    }

    /// Signatures that currently have a binding.
    pub fn defined_signatures(&self) -> Vec<MethodSignature> {
        self.signatures
            .iter()
            .filter(|signature| self.table.is_bound(signature))
            .cloned()
            .collect()
    }

    /// Signatures that currently have no binding.
    pub fn undefined_signatures(&self) -> Vec<MethodSignature> {
        self.signatures
            .iter()
            .filter(|signature| !self.table.is_bound(signature))
            .cloned()
            .collect()
    }

    pub fn is_defined(&self, signature: &MethodSignature) -> bool {
        self.table.is_bound(signature)
    }

    /// The contract signature named `name` with exactly these parameter kinds.
    pub fn signature(&self, name: &str, params: &[ParamKind]) -> Option<MethodSignature> {
        self.signatures
            .iter()
            .find(|signature| signature.matches(name, params))
            .cloned()
    }

    /// All overloads named `name`, in declaration order.
    pub fn signatures_named(&self, name: &str) -> Vec<MethodSignature> {
        self.signatures
            .iter()
            .filter(|signature| signature.name() == name)
            .cloned()
            .collect()
    }

    /// The binding currently installed for `signature`, if any.
    pub fn binding(&self, signature: &MethodSignature) -> Option<Arc<Binding>> {
        self.table.get(signature).flatten()
    }

    /// Routes one call through the binding table.
    ///
    /// The binding is read fresh on every call and the table is not locked
    /// while the target runs, so targets may rebind methods of this registry.
    pub fn dispatch(&self, signature: &MethodSignature, args: &[Value]) -> DispatchResult<Value> {
        let slot = self
            .table
            .get(signature)
            .ok_or_else(|| DispatchError::unknown_method(&self.contract.name, signature))?;

        let Some(binding) = slot else {
            if self.config.trace_dispatch {
                trace!(%signature, "dispatch to undefined method");
            }
            return Err(DispatchError::UndefinedMethod(signature.clone()));
        };

        binding.invoke(args).map_err(DispatchError::Target)
    }

    /// Resolves the overload of `name` whose parameter kinds accept `args`
    /// and dispatches to it. Exact kind matches are preferred over matches
    /// that go through `Any` or a null object.
    pub fn call(&self, name: &str, args: &[Value]) -> DispatchResult<Value> {
        let signature = self
            .resolve_call(name, args)
            .ok_or_else(|| DispatchError::unknown_method(&self.contract.name, name))?;
        self.dispatch(&signature, args)
    }

    fn resolve_call(&self, name: &str, args: &[Value]) -> Option<MethodSignature> {
        let kinds: Vec<ParamKind> = args.iter().map(Value::kind).collect();
        if let Some(exact) = self.signature(name, &kinds) {
            return Some(exact);
        }
        self.signatures
            .iter()
            .find(|signature| {
                signature.name() == name
                    && signature.arity() == args.len()
                    && signature
                        .params()
                        .iter()
                        .zip(args)
                        .all(|(kind, value)| kind.accepts(value))
            })
            .cloned()
    }
}

/// Looks up the default implementation named by a declaration's marker.
///
/// The last receiver-less member of the owner type with the marker's method
/// name and the declaration's exact parameter kinds wins.
fn resolve_original(catalog: &dyn MemberCatalog, decl: &MethodDecl) -> Option<Callable> {
    let marker = decl.original.as_ref()?;
    let found = catalog
        .members(&marker.owner)
        .into_iter()
        .rev()
        .find(|member| {
            member.name == marker.method
                && member.params == decl.params
                && member.receiver_kind() == ReceiverKind::Static
        })
        .map(|member| member.callable);

    if found.is_none() {
        debug!(
            method = %decl.name,
            owner = %marker.owner,
            target = %marker.method,
            "default implementation not found, method starts undefined"
        );
    }
    found
}

impl fmt::Debug for ContractRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractRegistry")
            .field("contract", &self.contract.name)
            .field("methods", &self.signatures.len())
            .field("defined", &self.table.bound_count())
            .finish()
    }
}
