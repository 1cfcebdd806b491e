//! Method signatures: the identity key of every contract method.

use std::fmt;
use std::sync::Arc;

use crate::kind::ParamKind;

/// Identity of a contract method: owning contract, name and ordered
/// parameter kinds. Two signatures are equal iff all three are.
///
/// Signatures are immutable and cheap to clone; the registry hands out
/// clones of the ones it built at construction.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodSignature {
    contract: Arc<str>,
    name: Arc<str>,
    params: Arc<[ParamKind]>,
}

impl MethodSignature {
    pub fn new<C, N, P>(contract: C, name: N, params: P) -> Self
    where
        C: Into<Arc<str>>,
        N: Into<Arc<str>>,
        P: Into<Arc<[ParamKind]>>,
    {
        Self {
            contract: contract.into(),
            name: name.into(),
            params: params.into(),
        }
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Name and parameter kinds match, ignoring the owning contract.
    ///
    /// This is the rule used to pair external members with contract methods.
    pub fn matches(&self, name: &str, params: &[ParamKind]) -> bool {
        &*self.name == name && &*self.params == params
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.contract, self.name)?;
        for (i, kind) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodSignature({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_covers_all_three_parts() {
        let add = MethodSignature::new("Calc", "add", vec![ParamKind::Integer, ParamKind::Integer]);
        let same = MethodSignature::new("Calc", "add", vec![ParamKind::Integer, ParamKind::Integer]);
        let other_contract =
            MethodSignature::new("Math", "add", vec![ParamKind::Integer, ParamKind::Integer]);
        let other_params = MethodSignature::new("Calc", "add", vec![ParamKind::Float, ParamKind::Float]);
        let reordered = MethodSignature::new(
            "Calc",
            "mix",
            vec![ParamKind::Integer, ParamKind::String],
        );
        let swapped = MethodSignature::new(
            "Calc",
            "mix",
            vec![ParamKind::String, ParamKind::Integer],
        );

        assert_eq!(add, same);
        assert_ne!(add, other_contract);
        assert_ne!(add, other_params);
        assert_ne!(reordered, swapped);

        let set: HashSet<_> = [add.clone(), same, other_contract].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_matches_ignores_contract() {
        let greet = MethodSignature::new("Greeter", "greet", Vec::new());
        assert!(greet.matches("greet", &[]));
        assert!(!greet.matches("greet", &[ParamKind::String]));
        assert!(!greet.matches("shout", &[]));
    }

    #[test]
    fn test_display() {
        let sig = MethodSignature::new("Calc", "add", vec![ParamKind::Integer, ParamKind::Integer]);
        assert_eq!(sig.to_string(), "Calc::add(Integer, Integer)");
        assert_eq!(sig.arity(), 2);
    }
}
