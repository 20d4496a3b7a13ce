//! Advisory ambiguity analysis for method families.
//!
//! Ambiguity is decided per call, so registration never rejects two
//! methods just because some call could match both. This module finds those
//! pairs ahead of time so that callers can report them as warnings.
//!
//! Only positional calls are considered. For every argument count that both
//! methods accept, the omitted parameters take their defaults, and the pair
//! is flagged when:
//! 1. Each default used is an instance of its declared type
//! 2. At every supplied position the two declared types share a subtype
//! 3. Neither method is more specific than the other

use std::fmt;

use crate::hierarchy::TypeTag;
use crate::value::Typed;

use super::resolver::DispatchResolver;
use super::types::{Method, MethodFamily};

/// Two methods that some positional call would find ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityWarning {
    /// The method family.
    pub function: String,
    /// Index of the earlier method.
    pub first: usize,
    /// Index of the later method.
    pub second: usize,
    /// Number of positional arguments of the conflicting call.
    pub arg_count: usize,
    /// Declared types of the earlier method.
    pub first_types: Vec<String>,
    /// Declared types of the later method.
    pub second_types: Vec<String>,
}

impl fmt::Display for AmbiguityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}({})` and `{}({})` are ambiguous for some calls with {} argument{}",
            self.function,
            self.first_types.join(", "),
            self.function,
            self.second_types.join(", "),
            self.arg_count,
            if self.arg_count == 1 { "" } else { "s" }
        )
    }
}

/// Result of auditing a method family.
#[derive(Debug, Default)]
pub struct AmbiguityReport {
    /// All detected conflicts, in registration order of the pairs.
    pub warnings: Vec<AmbiguityWarning>,
}

impl AmbiguityReport {
    /// Returns true if no call can be ambiguous.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Checker for potential ambiguities in method families.
pub struct AmbiguityChecker<'a> {
    resolver: DispatchResolver<'a>,
}

impl<'a> AmbiguityChecker<'a> {
    pub fn new(resolver: DispatchResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Check every pair of methods in a family.
    pub fn check_family<V: Typed, R>(&self, family: &MethodFamily<V, R>) -> AmbiguityReport {
        let mut warnings = Vec::new();

        for (i, m1) in family.methods().iter().enumerate() {
            for m2 in family.methods().iter().skip(i + 1) {
                if let Some(arg_count) = self.conflicting_arg_count(m1, m2) {
                    let types = self.resolver.types();
                    warnings.push(AmbiguityWarning {
                        function: family.name().to_string(),
                        first: m1.index(),
                        second: m2.index(),
                        arg_count,
                        first_types: types.describe(m1.param_types()),
                        second_types: types.describe(m2.param_types()),
                    });
                }
            }
        }

        AmbiguityReport { warnings }
    }

    /// Smallest positional argument count for which both methods could be
    /// candidates without either dominating.
    pub fn conflicting_arg_count<V: Typed, R>(
        &self,
        m1: &Method<V, R>,
        m2: &Method<V, R>,
    ) -> Option<usize> {
        let low = m1.required_arity().max(m2.required_arity());
        let high = m1.arity().min(m2.arity());

        (low..=high).find(|&count| {
            self.defaults_fit(m1, count)
                && self.defaults_fit(m2, count)
                && self.positions_overlap(&m1.param_types()[..count], &m2.param_types()[..count])
                && self.resolver.compare_specificity(m1.param_types(), m2.param_types())
                    == std::cmp::Ordering::Equal
        })
    }

    /// Whether every parameter from `count` on has a default of its
    /// declared type.
    fn defaults_fit<V: Typed, R>(&self, method: &Method<V, R>, count: usize) -> bool {
        let types = self.resolver.types();
        method.params()[count..]
            .iter()
            .zip(&method.param_types()[count..])
            .all(|(param, &ty)| {
                param
                    .default
                    .as_ref()
                    .is_some_and(|value| types.is_subtype(value.type_tag(), ty))
            })
    }

    fn positions_overlap(&self, a: &[TypeTag], b: &[TypeTag]) -> bool {
        let types = self.resolver.types();
        a.iter()
            .zip(b)
            .all(|(&ta, &tb)| types.has_common_subtype(ta, tb))
    }
}
