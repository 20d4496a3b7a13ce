//! Runtime multiple dispatch for Unifout.
//!
//! Several implementations can share one name. Each declares the type of
//! every parameter, and at call time the registry picks the single most
//! specific implementation whose parameters accept the runtime types of the
//! arguments.
//!
//! # Example
//!
//! ```
//! use unifout_overload::{DispatchError, DispatchTable, Object, Param, Value};
//!
//! let mut table: DispatchTable = DispatchTable::new();
//! let animal = table.declare_type("Animal", &[]).unwrap();
//! let dog = table.declare_type("Dog", &[animal]).unwrap();
//!
//! table
//!     .register("speak", vec![Param::new("who", animal)], |_| Value::from("..."))
//!     .unwrap();
//! table
//!     .register("speak", vec![Param::new("who", dog)], |_| Value::from("woof"))
//!     .unwrap();
//!
//! let rex = Value::from(Object::new(dog));
//! assert_eq!(table.call("speak", vec![rex]).unwrap(), Value::from("woof"));
//!
//! let err = table.call("speak", vec![Value::from(1)]).unwrap_err();
//! assert!(matches!(err, DispatchError::NoMatchingOverload { .. }));
//! ```
//!
//! # Architecture
//!
//! ```text
//! register ──► DispatchTable ──► MethodFamily (per name) ──► Method
//!                   │
//! invoke ───────────┴──► DispatchResolver: bind → type-check → reduce → call
//! ```
//!
//! The table is an ordinary value: create one per context that needs
//! dispatch and pass it to call sites. [`SharedDispatchTable`] wraps one in a
//! lock for programs that register from several threads.

pub mod dispatch;
pub mod error;
pub mod hierarchy;
pub mod signature;
pub mod table;
pub mod value;

pub use dispatch::{
    AmbiguityChecker, AmbiguityReport, AmbiguityWarning, DispatchResolver, Method, MethodFamily,
    Resolved,
};
pub use error::{DispatchError, DispatchResult};
pub use hierarchy::{HierarchyError, TypeHierarchy, TypeTag};
pub use signature::{BindError, BoundArgs, CallArgs, Param};
pub use table::{DispatchTable, SharedDispatchTable};
pub use value::{Object, Typed, Value};
