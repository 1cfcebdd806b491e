//! # Rebind Registry
//!
//! Runtime behavior substitution behind a fixed contract.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            DispatchProxy                 │
//! │  (callable stand-in for the contract)   │
//! └─────────────────────────────────────────┘
//!                    │ every call
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           ContractRegistry               │
//! │  ┌─────────────────────────────────────┐│
//! │  │  BindingTable                       ││
//! │  │  (signature -> binding | undefined) ││
//! │  └─────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────┐│
//! │  │  Bulk rebinder                      ││
//! │  │  (match members by signature)       ││
//! │  └─────────────────────────────────────┘│
//! └─────────────────────────────────────────┘
//!                    │ members, contracts
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │            MemberCatalog                 │
//! │  (injectable stand-in for reflection)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rebind_core::{arg, ContractDescriptor, MethodDecl, ParamKind, Value};
//! use rebind_registry::{Callable, ContractRegistry, TypeCatalog};
//!
//! let contract = ContractDescriptor::interface("Calculator").method(
//!     MethodDecl::new("add", vec![ParamKind::Integer, ParamKind::Integer])
//!         .returns(ParamKind::Integer),
//! );
//! let (registry, proxy) = ContractRegistry::create(contract, TypeCatalog::shared()).unwrap();
//!
//! let add = registry
//!     .signature("add", &[ParamKind::Integer, ParamKind::Integer])
//!     .unwrap();
//! assert!(proxy.dispatch(&add, &[Value::Int(2), Value::Int(3)]).is_err());
//!
//! registry
//!     .bind_static(&add, Callable::function(|args| {
//!         Ok(Value::Int(arg::<i64>(args, 0)? + arg::<i64>(args, 1)?))
//!     }))
//!     .unwrap();
//! assert_eq!(proxy.dispatch(&add, &[Value::Int(2), Value::Int(3)]).unwrap(), Value::Int(5));
//! ```

pub mod callable;
pub mod catalog;
mod macros;
pub mod proxy;
pub mod rebinder;
pub mod registry;
pub mod table;

// Re-exports
pub use callable::{Callable, ReceiverKind};
pub use catalog::{Member, MemberCatalog, TypeCatalog};
pub use proxy::DispatchProxy;
pub use rebind_config::{BindMode, RegistryConfig};
pub use rebinder::{MassBindReport, SkipReason, SkippedMember, Source};
pub use registry::ContractRegistry;
pub use table::{Binding, BindingTable};

#[doc(hidden)]
pub mod __private {
    pub use rebind_config::RegistryConfig;
    pub use rebind_core::{
        ContractDescriptor, ContractError, DispatchResult, FromValue, IntoValue, MethodDecl,
        MethodSignature, ParamKind, ValueType,
    };
}
