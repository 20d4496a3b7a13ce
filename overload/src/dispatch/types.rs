//! Registered methods and method families.

use std::fmt;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::hierarchy::{TypeHierarchy, TypeTag};
use crate::signature::{BoundArgs, Param};

/// The callable body of a registered method.
pub type Body<V, R> = Arc<dyn Fn(&BoundArgs<'_, V>) -> R + Send + Sync>;

/// One implementation registered under a shared name.
pub struct Method<V, R> {
    /// Position in the family, in registration order.
    index: usize,
    /// Formal parameters, including defaults.
    params: Vec<Param<V>>,
    /// Declared type of each parameter.
    param_types: Vec<TypeTag>,
    body: Body<V, R>,
}

impl<V, R> Method<V, R> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn params(&self) -> &[Param<V>] {
        &self.params
    }

    /// The declared type sequence this method dispatches on.
    pub fn param_types(&self) -> &[TypeTag] {
        &self.param_types
    }

    /// Number of leading parameters a positional call must supply.
    pub fn required_arity(&self) -> usize {
        self.params
            .iter()
            .rposition(|p| p.default.is_none())
            .map_or(0, |last| last + 1)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub(crate) fn call(&self, args: &BoundArgs<'_, V>) -> R {
        (self.body)(args)
    }
}

impl<V, R> fmt::Debug for Method<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("index", &self.index)
            .field(
                "params",
                &self.params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            )
            .field("param_types", &self.param_types)
            .finish_non_exhaustive()
    }
}

/// All methods registered under one name.
pub struct MethodFamily<V, R> {
    name: String,
    methods: Vec<Method<V, R>>,
}

impl<V, R> MethodFamily<V, R> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Methods in registration order.
    pub fn methods(&self) -> &[Method<V, R>] {
        &self.methods
    }

    pub fn get(&self, index: usize) -> Option<&Method<V, R>> {
        self.methods.get(index)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Validates and appends a method.
    ///
    /// The family is left unchanged if validation fails.
    pub(crate) fn add(
        &mut self,
        params: Vec<Param<V>>,
        body: Body<V, R>,
        types: &TypeHierarchy,
    ) -> Result<&Method<V, R>, DispatchError> {
        let mut param_types = Vec::with_capacity(params.len());
        for (i, param) in params.iter().enumerate() {
            let Some(ty) = param.ty else {
                return Err(DispatchError::MissingTypeAnnotation {
                    function: self.name.clone(),
                    param: param.name.clone(),
                });
            };
            if params[..i].iter().any(|earlier| earlier.name == param.name) {
                return Err(DispatchError::DuplicateParameter {
                    function: self.name.clone(),
                    param: param.name.clone(),
                });
            }
            param_types.push(ty);
        }

        if self.methods.iter().any(|m| m.param_types == param_types) {
            return Err(DispatchError::DuplicateSignature {
                function: self.name.clone(),
                signature: types.describe(&param_types),
            });
        }

        let index = self.methods.len();
        self.methods.push(Method {
            index,
            params,
            param_types,
            body,
        });
        Ok(&self.methods[index])
    }
}

impl<V, R> fmt::Debug for MethodFamily<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodFamily")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .finish()
    }
}

/// The method selected for a call, together with its bound arguments.
pub struct Resolved<'a, V, R> {
    method: &'a Method<V, R>,
    args: BoundArgs<'a, V>,
}

impl<'a, V, R> Resolved<'a, V, R> {
    pub(crate) fn new(method: &'a Method<V, R>, args: BoundArgs<'a, V>) -> Self {
        Self { method, args }
    }

    pub fn method(&self) -> &'a Method<V, R> {
        self.method
    }

    pub fn args(&self) -> &BoundArgs<'a, V> {
        &self.args
    }

    /// Runs the selected method's body.
    pub fn call(&self) -> R {
        self.method.call(&self.args)
    }
}

impl<V, R> fmt::Debug for Resolved<'_, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("method", &self.method)
            .field("arity", &self.args.len())
            .finish()
    }
}
