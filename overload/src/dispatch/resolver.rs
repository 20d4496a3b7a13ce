//! Call-time overload resolution.

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::error::DispatchError;
use crate::hierarchy::{TypeHierarchy, TypeTag};
use crate::signature::{bind, BoundArgs, CallArgs};
use crate::value::Typed;

use super::types::{Method, MethodFamily, Resolved};

/// Dispatch resolution context.
///
/// The resolver owns no state beyond a borrow of the type hierarchy, whose
/// subtype relation it applies verbatim.
#[derive(Debug, Clone, Copy)]
pub struct DispatchResolver<'a> {
    types: &'a TypeHierarchy,
}

impl<'a> DispatchResolver<'a> {
    /// Create a new dispatch resolver.
    pub fn new(types: &'a TypeHierarchy) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &'a TypeHierarchy {
        self.types
    }

    /// Resolve a call against a method family.
    ///
    /// Every method is bound and type-checked in registration order. The
    /// survivors are reduced against a running best: a strictly more
    /// specific candidate replaces it, a strictly less specific one is
    /// dropped, and anything else is an ambiguity. Only the candidates of
    /// this call are ever compared.
    pub fn resolve<'m, V: Typed, R>(
        &self,
        family: &'m MethodFamily<V, R>,
        args: &'m CallArgs<V>,
    ) -> Result<Resolved<'m, V, R>, DispatchError> {
        let mut best: Option<(&'m Method<V, R>, Vec<&'m V>)> = None;

        for method in family.methods() {
            let values = match bind(method.params(), args) {
                Ok(values) => values,
                Err(reason) => {
                    trace!(
                        "skipping overload #{} of `{}`: {}",
                        method.index(),
                        family.name(),
                        reason
                    );
                    continue;
                }
            };

            if !self.is_applicable(method, &values) {
                trace!(
                    "skipping overload #{} of `{}`: argument types do not match ({})",
                    method.index(),
                    family.name(),
                    self.types.describe(method.param_types()).join(", ")
                );
                continue;
            }

            best = Some(match best {
                None => (method, values),
                Some((current, current_values)) => {
                    match self.compare_specificity(method.param_types(), current.param_types()) {
                        Ordering::Less => (method, values),
                        Ordering::Greater => (current, current_values),
                        Ordering::Equal => {
                            return Err(DispatchError::AmbiguousOverload {
                                function: family.name().to_string(),
                                arg_types: self.describe_call(args),
                                first: self.types.describe(current.param_types()),
                                second: self.types.describe(method.param_types()),
                            });
                        }
                    }
                }
            });
        }

        match best {
            Some((method, values)) => {
                debug!(
                    "selected overload #{} of `{}` ({})",
                    method.index(),
                    family.name(),
                    self.types.describe(method.param_types()).join(", ")
                );
                Ok(Resolved::new(method, BoundArgs::new(method.params(), values)))
            }
            None => Err(self.no_match(family.name(), args)),
        }
    }

    /// The error for a call that no method accepts.
    pub fn no_match<V: Typed>(&self, function: &str, args: &CallArgs<V>) -> DispatchError {
        DispatchError::NoMatchingOverload {
            function: function.to_string(),
            arg_types: self.describe_call(args),
        }
    }

    /// Renders the observed argument types of a call.
    ///
    /// Positional arguments come first, then keywords as `name=type`.
    pub fn describe_call<V: Typed>(&self, args: &CallArgs<V>) -> Vec<String> {
        let positional: Vec<TypeTag> = args.positional.iter().map(Typed::type_tag).collect();
        let mut described = self.types.describe(&positional);
        for (name, value) in &args.keywords {
            let ty = self.types.describe(&[value.type_tag()]).remove(0);
            described.push(format!("{}={}", name, ty));
        }
        described
    }

    /// Check if a method accepts the bound values.
    ///
    /// A method is applicable if every bound value, defaults included, is an
    /// instance of the declared type at its position.
    pub fn is_applicable<V: Typed, R>(&self, method: &Method<V, R>, values: &[&V]) -> bool {
        method.param_types().len() == values.len()
            && values
                .iter()
                .zip(method.param_types())
                .all(|(value, &ty)| self.types.is_subtype(value.type_tag(), ty))
    }

    /// Check if type sequence `a` is more specific than `b`.
    ///
    /// `a` is more specific than `b` if:
    /// - Both have the same length
    /// - Every type of `a` is a subtype of the type of `b` at that position
    /// - At least one of them is a strict subtype
    pub fn is_more_specific(&self, a: &[TypeTag], b: &[TypeTag]) -> bool {
        if a.len() != b.len() {
            return false;
        }

        let mut some_strictly = false;
        for (&ta, &tb) in a.iter().zip(b) {
            if !self.types.is_subtype(ta, tb) {
                return false;
            }
            if ta != tb {
                some_strictly = true;
            }
        }

        some_strictly
    }

    /// Compare the specificity of two type sequences.
    ///
    /// Returns:
    /// - Ordering::Less if `a` is more specific
    /// - Ordering::Greater if `b` is more specific
    /// - Ordering::Equal if neither dominates (an ambiguity)
    pub fn compare_specificity(&self, a: &[TypeTag], b: &[TypeTag]) -> Ordering {
        match (self.is_more_specific(a, b), self.is_more_specific(b, a)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}
