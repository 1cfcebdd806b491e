//! # Rebind-RS: runtime-rebindable implementations behind fixed contracts
//!
//! A contract is a fixed set of method signatures. A [`ContractRegistry`]
//! records, per signature, which implementation currently backs it, and a
//! [`DispatchProxy`] routes every call through that record at call time.
//! Implementations can be swapped one at a time or in bulk from a catalogued
//! type or instance while the proxy stays in use.
//!
//! ## Quick Start
//!
//! ```rust
//! use rebind_rs::prelude::*;
//!
//! rebind_contract! {
//!     contract Greeter as GreeterProxy {
//!         fn greet(name: String) -> String;
//!     }
//! }
//!
//! struct English;
//!
//! let catalog = TypeCatalog::shared();
//! catalog.register_method::<English, _, _, _>("English", "greet", vec![ParamKind::String], |_, args| {
//!     Ok(Value::String(format!("Hello, {}!", arg::<String>(args, 0)?)))
//! });
//!
//! let greeter = GreeterProxy::create(catalog.clone()).unwrap();
//! assert!(greeter.greet("Ada".into()).unwrap_err().is_undefined());
//!
//! greeter
//!     .get_owning_registry()
//!     .mass_bind_instance(&catalog.instance("English", English));
//! assert_eq!(greeter.greet("Ada".into()).unwrap(), "Hello, Ada!");
//! ```
//!
//! ## Architecture
//!
//! - [`core`] - Signatures, values, contract descriptors and errors
//! - [`config`] - Registry configuration
//! - [`registry`] - Binding tables, dispatch proxies and bulk rebinding

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Re-export all public APIs from the member crates
pub use rebind_config as config;
pub use rebind_core as core;
pub use rebind_registry as registry;

pub use rebind_registry::{rebind_contract, ContractRegistry, DispatchProxy};

/// Common imports for working with contract registries
pub mod prelude {
    pub use crate::config::{BindMode, RegistryConfig};
    pub use crate::core::{
        arg, expect_arity, ContractDescriptor, ContractError, DispatchError, MethodDecl,
        MethodSignature, ObjectRef, ParamKind, Value,
    };
    pub use crate::registry::{
        rebind_contract, Callable, ContractRegistry, DispatchProxy, MassBindReport,
        MemberCatalog, Source, TypeCatalog,
    };
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
