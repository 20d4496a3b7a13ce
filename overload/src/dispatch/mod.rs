//! Multiple dispatch resolution.
//!
//! This module implements the resolution algorithm that selects which
//! registered method to run based on the runtime types of all arguments.
//!
//! # Algorithm Overview
//!
//! 1. **Bind**: Match the call's positional and keyword arguments onto each
//!    method's parameters, filling omitted ones from defaults
//! 2. **Filter applicable**: Keep methods where every bound value is an
//!    instance of the declared parameter type
//! 3. **Reduce by specificity**: Keep a running most-specific candidate
//! 4. **Select best**: Run the unique winner, or fail on the first pair that
//!    neither dominates
//!
//! # Module Structure
//!
//! - [`types`] - Registered methods and families
//! - [`resolver`] - Main dispatch resolution algorithm
//! - [`audit`] - Advisory analysis of calls that could be ambiguous

mod audit;
mod resolver;
mod types;


pub use types::{Body, Method, MethodFamily, Resolved};

pub use resolver::DispatchResolver;

pub use audit::{AmbiguityChecker, AmbiguityReport, AmbiguityWarning};
