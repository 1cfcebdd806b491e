//! # Rebind Core
//!
//! Types shared by every rebind crate: the values that flow through a
//! dispatch, the parameter kinds that make up a method's identity, contract
//! descriptors, and the error taxonomy.
//!
//! ## Core Types
//!
//! - [`ParamKind`]: type tag of a parameter or return value
//! - [`Value`]: a dynamically typed argument or result
//! - [`MethodSignature`]: (contract, name, parameter kinds) identity key
//! - [`ContractDescriptor`]: a purely abstract set of method declarations
//!
//! ## Example
//!
//! ```rust
//! use rebind_core::{ContractDescriptor, MethodDecl, ParamKind};
//!
//! let contract = ContractDescriptor::interface("Calculator").method(
//!     MethodDecl::new("add", vec![ParamKind::Integer, ParamKind::Integer])
//!         .returns(ParamKind::Integer),
//! );
//! let signatures = contract.signatures();
//! assert_eq!(signatures[0].to_string(), "Calculator::add(Integer, Integer)");
//! ```

pub mod contract;
pub mod error;
pub mod kind;
pub mod signature;
pub mod value;

// Re-exports
pub use contract::{
    ContractDescriptor, ContractKind, MethodDecl, OriginalMarker, RESERVED_ACCESSOR,
};
pub use error::{
    BindError, BindResult, CallError, ContractError, ConversionError, DispatchError,
    DispatchResult, TargetError, TargetResult,
};
pub use kind::ParamKind;
pub use signature::MethodSignature;
pub use value::{arg, expect_arity, FromValue, IntoValue, ObjectRef, Value, ValueType};
