//! Nominal type hierarchy for dispatch.
//!
//! The registry does not define its own type lattice. Instead, the embedding
//! program describes its types here: every type gets a [`TypeTag`] and a list
//! of declared parents, and subtyping is the reflexive-transitive closure of
//! the parent relation.
//!
//! Every hierarchy starts with the builtin types:
//!
//! ```text
//! object
//! ├── number
//! │   ├── int
//! │   │   └── bool
//! │   └── float
//! ├── str
//! ├── tuple
//! └── none
//! ```
//!
//! A declaration may only name parents that already exist, so the hierarchy
//! is always a DAG and each type's ancestor set can be computed once, when
//! the type is declared.

use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::debug;

/// Handle to a type declared in a [`TypeHierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(u32);

impl TypeTag {
    /// The root of every hierarchy.
    pub const OBJECT: TypeTag = TypeTag(0);
    pub const NUMBER: TypeTag = TypeTag(1);
    pub const INT: TypeTag = TypeTag(2);
    pub const FLOAT: TypeTag = TypeTag(3);
    /// `bool` is an `int`, as in most dynamic languages.
    pub const BOOL: TypeTag = TypeTag(4);
    pub const STR: TypeTag = TypeTag(5);
    pub const TUPLE: TypeTag = TypeTag(6);
    pub const NONE: TypeTag = TypeTag(7);

    /// Position of this tag in its hierarchy's declaration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

const BUILTINS: &[(&str, &[TypeTag])] = &[
    ("object", &[]),
    ("number", &[TypeTag::OBJECT]),
    ("int", &[TypeTag::NUMBER]),
    ("float", &[TypeTag::NUMBER]),
    ("bool", &[TypeTag::INT]),
    ("str", &[TypeTag::OBJECT]),
    ("tuple", &[TypeTag::OBJECT]),
    ("none", &[TypeTag::OBJECT]),
];

/// Errors raised while declaring types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("type `{0}` is already declared")]
    DuplicateType(String),

    #[error("unknown type tag {0}")]
    UnknownType(TypeTag),
}

#[derive(Debug, Clone)]
struct TypeInfo {
    parents: Vec<TypeTag>,
    /// Every supertype, including the type itself.
    ancestors: FxHashSet<TypeTag>,
}

/// A nominal type hierarchy.
#[derive(Debug, Clone)]
pub struct TypeHierarchy {
    types: IndexMap<String, TypeInfo>,
}

impl Default for TypeHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHierarchy {
    /// Creates a hierarchy containing only the builtin types.
    pub fn new() -> Self {
        let mut hierarchy = Self {
            types: IndexMap::with_capacity(BUILTINS.len()),
        };
        for (name, parents) in BUILTINS {
            hierarchy.insert(name, parents.to_vec());
        }
        hierarchy
    }

    /// Declares a new type.
    ///
    /// A type declared without parents derives from `object`. Parents are
    /// deduplicated, keeping their first occurrence.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        parents: &[TypeTag],
    ) -> Result<TypeTag, HierarchyError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(HierarchyError::DuplicateType(name));
        }
        if let Some(&unknown) = parents.iter().find(|p| !self.contains(**p)) {
            return Err(HierarchyError::UnknownType(unknown));
        }

        let mut unique = Vec::with_capacity(parents.len().max(1));
        for &parent in parents {
            if !unique.contains(&parent) {
                unique.push(parent);
            }
        }
        if unique.is_empty() {
            unique.push(TypeTag::OBJECT);
        }

        let tag = self.insert(&name, unique);
        debug!("declared type `{}` as {}", name, tag);
        Ok(tag)
    }

    fn insert(&mut self, name: &str, parents: Vec<TypeTag>) -> TypeTag {
        let tag = TypeTag(self.types.len() as u32);
        let mut ancestors = FxHashSet::default();
        ancestors.insert(tag);
        for parent in &parents {
            ancestors.extend(self.types[parent.index()].ancestors.iter().copied());
        }
        self.types
            .insert(name.to_string(), TypeInfo { parents, ancestors });
        tag
    }

    /// Looks up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeTag> {
        self.types
            .get_index_of(name)
            .map(|index| TypeTag(index as u32))
    }

    /// Returns true if `tag` was declared in this hierarchy.
    pub fn contains(&self, tag: TypeTag) -> bool {
        tag.index() < self.types.len()
    }

    /// Returns the declared name of a type.
    pub fn name(&self, tag: TypeTag) -> Option<&str> {
        self.types.get_index(tag.index()).map(|(name, _)| name.as_str())
    }

    /// Renders a sequence of tags with their names, for diagnostics.
    ///
    /// Tags foreign to this hierarchy render as their raw handle.
    pub fn describe(&self, tags: &[TypeTag]) -> Vec<String> {
        tags.iter()
            .map(|&tag| match self.name(tag) {
                Some(name) => name.to_string(),
                None => tag.to_string(),
            })
            .collect()
    }

    /// Returns the declared parents of a type (empty for `object`).
    pub fn parents(&self, tag: TypeTag) -> &[TypeTag] {
        self.types
            .get_index(tag.index())
            .map(|(_, info)| info.parents.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if `sub` is `sup` or a declared descendant of it.
    pub fn is_subtype(&self, sub: TypeTag, sup: TypeTag) -> bool {
        self.types
            .get_index(sub.index())
            .is_some_and(|(_, info)| info.ancestors.contains(&sup))
    }

    /// Returns true if `sub` is a subtype of `sup` and not `sup` itself.
    pub fn is_strict_subtype(&self, sub: TypeTag, sup: TypeTag) -> bool {
        sub != sup && self.is_subtype(sub, sup)
    }

    /// Returns true if some declared type is a subtype of both `a` and `b`.
    pub fn has_common_subtype(&self, a: TypeTag, b: TypeTag) -> bool {
        self.types
            .values()
            .any(|info| info.ancestors.contains(&a) && info.ancestors.contains(&b))
    }

    /// Number of declared types, builtins included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the builtins are present from construction.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over all types in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeTag, &str)> + '_ {
        self.types
            .keys()
            .enumerate()
            .map(|(index, name)| (TypeTag(index as u32), name.as_str()))
    }
}
