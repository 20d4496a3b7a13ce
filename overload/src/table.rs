//! The dispatch table: method families keyed by name.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::dispatch::{AmbiguityChecker, AmbiguityReport, DispatchResolver, MethodFamily, Resolved};
use crate::error::DispatchResult;
use crate::hierarchy::{HierarchyError, TypeHierarchy, TypeTag};
use crate::signature::{BoundArgs, CallArgs, Param};
use crate::value::{Typed, Value};

/// Owns the type hierarchy and every method family.
///
/// Registration needs `&mut self` and invocation only `&self`, so a table
/// that is filled during start-up and then shared (for example in an
/// [`Arc`]) is read without any locking.
pub struct DispatchTable<V = Value, R = Value> {
    types: TypeHierarchy,
    families: IndexMap<String, MethodFamily<V, R>>,
}

impl<V, R> Default for DispatchTable<V, R> {
    fn default() -> Self {
        Self::with_types(TypeHierarchy::new())
    }
}

impl<V, R> DispatchTable<V, R> {
    /// Creates an empty table over the builtin types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table over an existing hierarchy.
    pub fn with_types(types: TypeHierarchy) -> Self {
        Self {
            types,
            families: IndexMap::new(),
        }
    }

    pub fn types(&self) -> &TypeHierarchy {
        &self.types
    }

    /// Mutable access to the hierarchy.
    ///
    /// New types only ever extend the hierarchy downwards, so declaring
    /// them never changes how already-registered methods relate.
    pub fn types_mut(&mut self) -> &mut TypeHierarchy {
        &mut self.types
    }

    /// Declares a type in the table's hierarchy.
    pub fn declare_type(
        &mut self,
        name: impl Into<String>,
        parents: &[TypeTag],
    ) -> Result<TypeTag, HierarchyError> {
        self.types.declare(name, parents)
    }

    /// Returns the family registered under `name`.
    pub fn family(&self, name: &str) -> Option<&MethodFamily<V, R>> {
        self.families.get(name)
    }

    /// Names with at least one method, in order of first registration.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.families.keys().map(String::as_str)
    }

    /// Number of method families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Registers a method under `name`.
    ///
    /// Fails without touching the table if a parameter lacks a type, a
    /// parameter name repeats, or the declared type sequence is already
    /// registered under `name`.
    pub fn register<F>(&mut self, name: &str, params: Vec<Param<V>>, body: F) -> DispatchResult<()>
    where
        F: Fn(&BoundArgs<'_, V>) -> R + Send + Sync + 'static,
        V: 'static,
        R: 'static,
    {
        let types = &self.types;
        let index = match self.families.get_index_of(name) {
            Some(index) => {
                self.families[index].add(params, Arc::new(body), types)?;
                index
            }
            None => {
                let mut family = MethodFamily::new(name);
                family.add(params, Arc::new(body), types)?;
                self.families.insert_full(name.to_string(), family).0
            }
        };

        let family = &self.families[index];
        let method = &family.methods()[family.len() - 1];
        debug!(
            "registered overload #{} of `{}` ({})",
            method.index(),
            name,
            types.describe(method.param_types()).join(", ")
        );
        Ok(())
    }

    /// Audits the family registered under `name` for calls that could be
    /// ambiguous.
    pub fn audit(&self, name: &str) -> Option<AmbiguityReport>
    where
        V: Typed,
    {
        let checker = AmbiguityChecker::new(DispatchResolver::new(&self.types));
        self.families
            .get(name)
            .map(|family| checker.check_family(family))
    }
}

impl<V: Typed, R> DispatchTable<V, R> {
    /// Selects the method a call would run, without running it.
    pub fn resolve<'a>(
        &'a self,
        name: &str,
        args: &'a CallArgs<V>,
    ) -> DispatchResult<Resolved<'a, V, R>> {
        let resolver = DispatchResolver::new(&self.types);
        match self.families.get(name) {
            Some(family) => resolver.resolve(family, args),
            None => Err(resolver.no_match(name, args)),
        }
    }

    /// Resolves a call and runs the selected method.
    pub fn invoke(&self, name: &str, args: &CallArgs<V>) -> DispatchResult<R> {
        self.resolve(name, args).map(|resolved| resolved.call())
    }

    /// Invokes `name` with positional arguments only.
    pub fn call(&self, name: &str, positional: Vec<V>) -> DispatchResult<R> {
        self.invoke(name, &CallArgs::from(positional))
    }
}

impl<V, R> fmt::Debug for DispatchTable<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("types", &self.types.len())
            .field("families", &self.families.values().collect::<Vec<_>>())
            .finish()
    }
}

/// A dispatch table that can be registered into from several threads.
///
/// Registration takes the write lock; invocations share the read lock and
/// run concurrently. Bodies run while the read lock is held, so a body must
/// not register into the table that is running it.
pub struct SharedDispatchTable<V = Value, R = Value> {
    inner: Arc<RwLock<DispatchTable<V, R>>>,
}

impl<V, R> Clone for SharedDispatchTable<V, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, R> Default for SharedDispatchTable<V, R> {
    fn default() -> Self {
        Self::new(DispatchTable::new())
    }
}

impl<V, R> SharedDispatchTable<V, R> {
    pub fn new(table: DispatchTable<V, R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, DispatchTable<V, R>> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, DispatchTable<V, R>> {
        self.inner.write()
    }

    pub fn declare_type(
        &self,
        name: impl Into<String>,
        parents: &[TypeTag],
    ) -> Result<TypeTag, HierarchyError> {
        self.inner.write().declare_type(name, parents)
    }

    pub fn register<F>(&self, name: &str, params: Vec<Param<V>>, body: F) -> DispatchResult<()>
    where
        F: Fn(&BoundArgs<'_, V>) -> R + Send + Sync + 'static,
        V: 'static,
        R: 'static,
    {
        self.inner.write().register(name, params, body)
    }
}

impl<V: Typed, R> SharedDispatchTable<V, R> {
    pub fn invoke(&self, name: &str, args: &CallArgs<V>) -> DispatchResult<R> {
        self.inner.read().invoke(name, args)
    }

    pub fn call(&self, name: &str, positional: Vec<V>) -> DispatchResult<R> {
        self.inner.read().call(name, positional)
    }
}

impl<V, R> From<DispatchTable<V, R>> for SharedDispatchTable<V, R> {
    fn from(table: DispatchTable<V, R>) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_first_registration_creates_no_family() {
        let mut table: DispatchTable = DispatchTable::new();
        let err = table
            .register("f", vec![Param::untyped("x")], |_| Value::None)
            .unwrap_err();

        assert!(err.is_registration_error());
        assert!(table.family("f").is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_names_keep_registration_order() {
        let mut table: DispatchTable = DispatchTable::new();
        for name in ["zeta", "alpha", "mid"] {
            table
                .register(name, vec![Param::new("x", TypeTag::INT)], |_| Value::None)
                .unwrap();
        }
        table
            .register("alpha", vec![Param::new("x", TypeTag::STR)], |_| Value::None)
            .unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.family("alpha").map(|f| f.len()), Some(2));
    }

    #[test]
    fn test_declare_through_table() {
        let mut table: DispatchTable = DispatchTable::new();
        let animal = table.declare_type("Animal", &[]).unwrap();
        let dog = table.declare_type("Dog", &[animal]).unwrap();
        assert!(table.types().is_subtype(dog, animal));
    }
}
