//! Bulk rebinding: pairing the members of an external type or instance with
//! contract methods by name and parameter kinds.
//!
//! The operation is best effort. Candidates that do not fit are skipped and
//! recorded in the [`MassBindReport`]; callers verify coverage through
//! [`ContractRegistry::undefined_signatures`] or the report, never through an
//! error.

use std::fmt;

use tracing::{debug, trace};

use rebind_config::BindMode;
use rebind_core::{MethodSignature, ObjectRef};

use crate::callable::ReceiverKind;
use crate::catalog::Member;
use crate::registry::ContractRegistry;

/// Where bulk-rebind candidates come from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A catalogued type; no receiver is available.
    Type(String),
    /// An instance; its members are those of its type name.
    Instance(ObjectRef),
}

impl Source {
    pub fn type_name(&self) -> &str {
        match self {
            Source::Type(name) => name,
            Source::Instance(object) => object.type_name(),
        }
    }

    fn receiver(&self) -> Option<&ObjectRef> {
        match self {
            Source::Type(_) => None,
            Source::Instance(object) => Some(object),
        }
    }
}

/// Why a candidate member was not bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Static member during an instance rebind, or the other way round.
    ReceiverKindMismatch,
    /// No contract method has this name and these parameter kinds.
    NoMatchingSignature,
    /// Instance rebind requested from a type, which has no receiver.
    MissingReceiver,
    /// The matched signature could not be bound. Candidates are matched
    /// against the registry's own signatures, so this does not occur today.
    BindFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ReceiverKindMismatch => write!(f, "receiver kind does not match mode"),
            SkipReason::NoMatchingSignature => write!(f, "no matching contract method"),
            SkipReason::MissingReceiver => write!(f, "instance mode without an instance"),
            SkipReason::BindFailed(message) => write!(f, "bind failed: {message}"),
        }
    }
}

/// A candidate member that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMember {
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of one bulk rebind.
#[derive(Debug, Clone, Default)]
pub struct MassBindReport {
    /// Signatures bound by this call, in first-bound order.
    pub bound: Vec<MethodSignature>,
    /// Skipped candidates; empty when capture is disabled by configuration.
    pub skipped: Vec<SkippedMember>,
    /// Number of skipped candidates, whether captured or not.
    pub skipped_count: usize,
}

impl MassBindReport {
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    pub fn is_bound(&self, signature: &MethodSignature) -> bool {
        self.bound.contains(signature)
    }

    fn record_bound(&mut self, signature: MethodSignature) {
        if !self.bound.contains(&signature) {
            self.bound.push(signature);
        }
    }

    fn record_skip(&mut self, capture: bool, member: &Member, reason: SkipReason) {
        trace!(member = %member.name, %reason, "mass-bind candidate skipped");
        self.skipped_count += 1;
        if capture {
            self.skipped.push(SkippedMember {
                name: member.name.clone(),
                reason,
            });
        }
    }
}

/// Rebinds every contract method that has a matching member in `source`.
///
/// Members are visited in catalog order, so when two members match the same
/// signature the later one ends up bound.
pub(crate) fn mass_bind(
    registry: &ContractRegistry,
    source: &Source,
    mode: BindMode,
) -> MassBindReport {
    let capture = registry.config().capture_skipped;
    let wanted = match mode {
        BindMode::Static => ReceiverKind::Static,
        BindMode::Instance => ReceiverKind::Instance,
    };
    let receiver = match mode {
        BindMode::Static => None,
        BindMode::Instance => source.receiver().cloned(),
    };

    let mut report = MassBindReport::default();
    for member in registry.catalog().members(source.type_name()) {
        if member.receiver_kind() != wanted {
            report.record_skip(capture, &member, SkipReason::ReceiverKindMismatch);
            continue;
        }
        if mode == BindMode::Instance && receiver.is_none() {
            report.record_skip(capture, &member, SkipReason::MissingReceiver);
            continue;
        }
        let Some(signature) = registry.signature(&member.name, &member.params) else {
            report.record_skip(capture, &member, SkipReason::NoMatchingSignature);
            continue;
        };
        match registry.bind(&signature, Some(member.callable.clone()), receiver.clone()) {
            Ok(()) => report.record_bound(signature),
            Err(err) => report.record_skip(capture, &member, SkipReason::BindFailed(err.to_string())),
        }
    }

    debug!(
        contract = %registry.contract_name(),
        source = %source.type_name(),
        %mode,
        bound = report.bound_count(),
        skipped = report.skipped_count,
        "mass bind finished"
    );
    report
}
