//! Formal parameters, call arguments, and binding between the two.
//!
//! Binding follows the usual positional-then-keyword convention: positional
//! arguments fill parameters left to right, keyword arguments fill
//! parameters by name, and any parameter still unfilled takes its declared
//! default.

use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

use crate::hierarchy::TypeTag;

/// A formal parameter of a registered implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct Param<V> {
    /// The parameter name, used for keyword arguments.
    pub name: String,
    /// The declared type. Registration rejects parameters without one.
    pub ty: Option<TypeTag>,
    /// Value used when the call omits this parameter.
    pub default: Option<V>,
}

impl<V> Param<V> {
    /// Creates a typed parameter without a default.
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            default: None,
        }
    }

    /// Creates a parameter with no declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<V>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// The arguments supplied at a call site.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArgs<V> {
    /// Positional arguments, in order.
    pub positional: Vec<V>,
    /// Keyword arguments, in the order they were written.
    pub keywords: IndexMap<String, V>,
}

impl<V> Default for CallArgs<V> {
    fn default() -> Self {
        Self {
            positional: Vec::new(),
            keywords: IndexMap::new(),
        }
    }
}

impl<V> CallArgs<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<V>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument. A repeated keyword keeps the last value.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<V>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Total number of supplied arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }
}

impl<V> From<Vec<V>> for CallArgs<V> {
    fn from(positional: Vec<V>) -> Self {
        Self {
            positional,
            keywords: IndexMap::new(),
        }
    }
}

/// Why a call could not be bound to a parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// More positional arguments than parameters.
    TooManyPositional { expected: usize, found: usize },
    /// A keyword that names no parameter.
    UnexpectedKeyword(String),
    /// A keyword naming a parameter that was already bound positionally.
    MultipleValues(String),
    /// A parameter with no argument and no default.
    MissingArgument(String),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::TooManyPositional { expected, found } => write!(
                f,
                "takes {} positional arguments but {} were given",
                expected, found
            ),
            BindError::UnexpectedKeyword(name) => {
                write!(f, "got an unexpected keyword argument `{}`", name)
            }
            BindError::MultipleValues(name) => {
                write!(f, "got multiple values for argument `{}`", name)
            }
            BindError::MissingArgument(name) => {
                write!(f, "missing required argument `{}`", name)
            }
        }
    }
}

/// Binds call arguments onto a parameter list.
///
/// Returns one value per parameter, in parameter order, borrowing either
/// from the call or from the parameter's default.
pub fn bind<'a, V>(params: &'a [Param<V>], args: &'a CallArgs<V>) -> Result<Vec<&'a V>, BindError> {
    if args.positional.len() > params.len() {
        return Err(BindError::TooManyPositional {
            expected: params.len(),
            found: args.positional.len(),
        });
    }

    let mut slots: Vec<Option<&'a V>> = vec![None; params.len()];
    for (slot, value) in slots.iter_mut().zip(&args.positional) {
        *slot = Some(value);
    }

    for (name, value) in &args.keywords {
        let index = params
            .iter()
            .position(|p| &p.name == name)
            .ok_or_else(|| BindError::UnexpectedKeyword(name.clone()))?;
        if slots[index].is_some() {
            return Err(BindError::MultipleValues(name.clone()));
        }
        slots[index] = Some(value);
    }

    slots
        .into_iter()
        .zip(params)
        .map(|(slot, param)| {
            slot.or(param.default.as_ref())
                .ok_or_else(|| BindError::MissingArgument(param.name.clone()))
        })
        .collect()
}

/// Arguments bound to the selected implementation, in parameter order.
#[derive(Debug)]
pub struct BoundArgs<'a, V> {
    params: &'a [Param<V>],
    values: Vec<&'a V>,
}

impl<'a, V> BoundArgs<'a, V> {
    pub(crate) fn new(params: &'a [Param<V>], values: Vec<&'a V>) -> Self {
        debug_assert_eq!(params.len(), values.len());
        Self { params, values }
    }

    /// Value bound to the parameter at `index`.
    pub fn get(&self, index: usize) -> Option<&'a V> {
        self.values.get(index).copied()
    }

    /// Value bound to the parameter called `name`.
    pub fn named(&self, name: &str) -> Option<&'a V> {
        self.params
            .iter()
            .position(|p| p.name == name)
            .map(|index| self.values[index])
    }

    /// Iterates over `(parameter name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a V)> + '_ {
        self.params
            .iter()
            .zip(&self.values)
            .map(|(param, value)| (param.name.as_str(), *value))
    }

    pub fn values(&self) -> &[&'a V] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V> Index<usize> for BoundArgs<'_, V> {
    type Output = V;

    fn index(&self, index: usize) -> &V {
        self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn params() -> Vec<Param<Value>> {
        vec![
            Param::new("a", TypeTag::INT),
            Param::new("b", TypeTag::INT),
            Param::new("c", TypeTag::INT).with_default(10),
        ]
    }

    fn ints(values: &[&Value]) -> Vec<i64> {
        values.iter().filter_map(|v| v.as_int()).collect()
    }

    #[test]
    fn test_bind_positional_with_default() {
        let params = params();
        let args = CallArgs::new().arg(1).arg(2);
        let bound = bind(&params, &args).unwrap();
        assert_eq!(ints(&bound), vec![1, 2, 10]);
    }

    #[test]
    fn test_bind_keywords_in_any_order() {
        let params = params();
        let args = CallArgs::new().kwarg("c", 3).kwarg("b", 2).kwarg("a", 1);
        let bound = bind(&params, &args).unwrap();
        assert_eq!(ints(&bound), vec![1, 2, 3]);
    }

    #[test]
    fn test_bind_mixed() {
        let params = params();
        let args = CallArgs::new().arg(1).kwarg("b", 5);
        let bound = bind(&params, &args).unwrap();
        assert_eq!(ints(&bound), vec![1, 5, 10]);
    }

    #[test]
    fn test_bind_too_many_positional() {
        let params = params();
        let args = CallArgs::from(vec![Value::from(1); 4]);
        assert_eq!(
            bind(&params, &args).unwrap_err(),
            BindError::TooManyPositional { expected: 3, found: 4 }
        );
    }

    #[test]
    fn test_bind_unexpected_keyword() {
        let params = params();
        let args = CallArgs::new().arg(1).arg(2).kwarg("d", 4);
        assert_eq!(
            bind(&params, &args).unwrap_err(),
            BindError::UnexpectedKeyword("d".to_string())
        );
    }

    #[test]
    fn test_bind_multiple_values() {
        let params = params();
        let args = CallArgs::new().arg(1).arg(2).kwarg("a", 4);
        assert_eq!(
            bind(&params, &args).unwrap_err(),
            BindError::MultipleValues("a".to_string())
        );
    }

    #[test]
    fn test_bind_missing_argument() {
        let params = params();
        let args = CallArgs::new().arg(1);
        assert_eq!(
            bind(&params, &args).unwrap_err(),
            BindError::MissingArgument("b".to_string())
        );
    }

    #[test]
    fn test_bind_empty() {
        let params: Vec<Param<Value>> = vec![];
        let args = CallArgs::new();
        assert!(bind(&params, &args).unwrap().is_empty());
    }

    #[test]
    fn test_bound_args_access() {
        let params = params();
        let args = CallArgs::new().arg(1).kwarg("b", 2);
        let bound = BoundArgs::new(&params, bind(&params, &args).unwrap());

        assert_eq!(bound.len(), 3);
        assert_eq!(bound[0], Value::from(1));
        assert_eq!(bound.named("b"), Some(&Value::from(2)));
        assert_eq!(bound.named("c"), Some(&Value::from(10)));
        assert_eq!(bound.named("z"), None);
        assert_eq!(bound.get(3), None);

        let names: Vec<_> = bound.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
