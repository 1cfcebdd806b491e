//! Error types for contract registration, binding and dispatch.

use std::error::Error as StdError;

use thiserror::Error;

use crate::kind::ParamKind;
use crate::signature::MethodSignature;

/// Failure raised by a bound implementation. Dispatch hands it back untouched.
pub type TargetError = Box<dyn StdError + Send + Sync + 'static>;

/// Result of invoking a bound implementation.
pub type TargetResult = Result<crate::value::Value, TargetError>;

/// Errors raised while turning a contract description into a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The requested contract is not known.
    #[error("Contract not found: {name}")]
    Missing {
        /// Requested contract name.
        name: String,
    },

    /// The contract carries implementation and cannot be proxied.
    #[error("Contract `{name}` is not purely abstract")]
    Concrete {
        /// Contract name.
        name: String,
    },

    /// A contract method uses the proxy's reserved accessor name.
    #[error("Contract `{contract}` declares `{method}`, which is reserved for the proxy accessor")]
    ReservedName {
        /// Contract name.
        contract: String,
        /// Colliding method name.
        method: String,
    },

    /// The contract or one of its methods has no name.
    #[error("Contract `{contract}` has an empty name or method name")]
    EmptyName {
        /// Contract name (possibly empty).
        contract: String,
    },
}

impl ContractError {
    /// Create a missing contract error.
    pub fn missing<S: Into<String>>(name: S) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Create a concrete contract error.
    pub fn concrete<S: Into<String>>(name: S) -> Self {
        Self::Concrete { name: name.into() }
    }

    /// Create a reserved name collision error.
    pub fn reserved_name<C: Into<String>, M: Into<String>>(contract: C, method: M) -> Self {
        Self::ReservedName {
            contract: contract.into(),
            method: method.into(),
        }
    }
}

/// Errors raised by `bind`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The signature does not belong to the registry's contract.
    #[error("Method not found in contract `{contract}`: {signature}")]
    UnknownMethod {
        /// Contract the registry was built for.
        contract: String,
        /// The signature that was referenced.
        signature: MethodSignature,
    },
}

/// Result type for bind operations.
pub type BindResult<T> = Result<T, BindError>;

/// Errors raised by dispatching a call through a proxy.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No contract method matches the requested call.
    #[error("Method not found in contract `{contract}`: {method}")]
    UnknownMethod {
        /// Contract the proxy implements.
        contract: String,
        /// Name or signature of the requested method.
        method: String,
    },

    /// The method exists but currently has no binding.
    #[error("{0} is not defined")]
    UndefinedMethod(MethodSignature),

    /// The result of a typed call could not be converted.
    #[error("Result conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The bound implementation failed.
    #[error(transparent)]
    Target(TargetError),
}

impl DispatchError {
    /// Create an unknown method error.
    pub fn unknown_method<C: Into<String>, M: ToString>(contract: C, method: M) -> Self {
        Self::UnknownMethod {
            contract: contract.into(),
            method: method.to_string(),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::UndefinedMethod(_))
    }

    /// The failure raised by the bound implementation, if that is what this is.
    pub fn target(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Target(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Downcasts the target failure to its concrete type.
    pub fn downcast_target_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.target().and_then(|err| err.downcast_ref::<E>())
    }

    /// Unwraps the target failure, or returns `self` for framework errors.
    pub fn into_target(self) -> Result<TargetError, Self> {
        match self {
            Self::Target(err) => Ok(err),
            other => Err(other),
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failures converting between [`crate::Value`] and Rust types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: ParamKind,
        found: ParamKind,
    },

    #[error("{value} does not fit in {kind}")]
    OutOfRange { kind: ParamKind, value: String },
}

impl ConversionError {
    pub fn mismatch(expected: ParamKind, found: ParamKind) -> Self {
        Self::Mismatch { expected, found }
    }
}

/// Failures raised by the adapters that wrap a host function or method as a
/// callable. They reach the caller as target failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("method requires a receiver but none is bound")]
    MissingReceiver,

    #[error("receiver is a `{found}`, expected `{expected}`")]
    ReceiverType { expected: String, found: String },

    #[error("expected {expected} arguments, found {found}")]
    Arity { expected: usize, found: usize },

    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        #[source]
        source: ConversionError,
    },
}
