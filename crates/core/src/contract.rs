//! Contract descriptors: the declared shape a dispatch proxy satisfies.

use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use crate::kind::ParamKind;
use crate::signature::MethodSignature;

/// Name of the proxy accessor that hands back the owning registry. No
/// contract method may use it, whatever its parameters.
pub const RESERVED_ACCESSOR: &str = "get_owning_registry";

/// Whether a described type is purely abstract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractKind {
    /// Method signatures only; can back a dispatch proxy.
    #[default]
    Interface,
    /// Carries state or bodies; rejected at registry construction.
    Concrete,
}

/// Points at the conventional default implementation of a method:
/// a receiver-less member `method` of the type `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OriginalMarker {
    pub owner: String,
    pub method: String,
}

impl OriginalMarker {
    pub fn new<O: Into<String>, M: Into<String>>(owner: O, method: M) -> Self {
        Self {
            owner: owner.into(),
            method: method.into(),
        }
    }
}

/// A declared contract method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamKind>,
    #[serde(default = "void_kind")]
    pub returns: ParamKind,
    #[serde(default)]
    pub original: Option<OriginalMarker>,
}

fn void_kind() -> ParamKind {
    ParamKind::Void
}

impl MethodDecl {
    pub fn new<S: Into<String>>(name: S, params: Vec<ParamKind>) -> Self {
        Self {
            name: name.into(),
            params,
            returns: ParamKind::Void,
            original: None,
        }
    }

    pub fn returns(mut self, kind: ParamKind) -> Self {
        self.returns = kind;
        self
    }

    /// Marks `owner::method` as the default implementation.
    pub fn original<O: Into<String>, M: Into<String>>(mut self, owner: O, method: M) -> Self {
        self.original = Some(OriginalMarker::new(owner, method));
        self
    }

    /// The signature of this declaration inside `contract`.
    pub fn signature(&self, contract: &str) -> MethodSignature {
        MethodSignature::new(contract, self.name.as_str(), self.params.clone())
    }
}

/// Description of a contract: a named set of method declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: ContractKind,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ContractDescriptor {
    /// Starts an abstract contract description.
    pub fn interface<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: ContractKind::Interface,
            methods: Vec::new(),
        }
    }

    /// Describes a concrete type. Registries refuse these.
    pub fn concrete<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            kind: ContractKind::Concrete,
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, decl: MethodDecl) -> Self {
        self.methods.push(decl);
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.kind == ContractKind::Interface
    }

    pub fn find_method(&self, name: &str, params: &[ParamKind]) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|decl| decl.name == name && decl.params == params)
    }

    /// Signatures of every declaration, in declaration order.
    ///
    /// Declarations with the same name and parameter kinds collapse into the
    /// first position they appear at.
    pub fn signatures(&self) -> Vec<MethodSignature> {
        let mut signatures: Vec<MethodSignature> = Vec::with_capacity(self.methods.len());
        for decl in &self.methods {
            let signature = decl.signature(&self.name);
            if !signatures.contains(&signature) {
                signatures.push(signature);
            }
        }
        signatures
    }

    /// Checks that this contract can back a dispatch proxy.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.name.is_empty() || self.methods.iter().any(|decl| decl.name.is_empty()) {
            return Err(ContractError::EmptyName {
                contract: self.name.clone(),
            });
        }
        if !self.is_abstract() {
            return Err(ContractError::concrete(&self.name));
        }
        if let Some(decl) = self.methods.iter().find(|decl| decl.name == RESERVED_ACCESSOR) {
            return Err(ContractError::reserved_name(&self.name, &decl.name));
        }
        Ok(())
    }
}
