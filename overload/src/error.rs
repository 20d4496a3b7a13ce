//! Dispatch errors.

use thiserror::Error;

/// Errors raised by registration and invocation.
///
/// Type names are rendered when the error is created, so the error stays
/// meaningful after the table that produced it is gone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("parameter `{param}` of `{function}` has no type annotation")]
    MissingTypeAnnotation { function: String, param: String },

    #[error("parameter `{param}` appears more than once in an overload of `{function}`")]
    DuplicateParameter { function: String, param: String },

    #[error("`{function}` already has an overload for ({})", .signature.join(", "))]
    DuplicateSignature {
        function: String,
        signature: Vec<String>,
    },

    #[error("no overload of `{function}` matches argument types ({})", .arg_types.join(", "))]
    NoMatchingOverload {
        function: String,
        arg_types: Vec<String>,
    },

    #[error(
        "call to `{function}` with argument types ({}) is ambiguous between ({}) and ({})",
        .arg_types.join(", "),
        .first.join(", "),
        .second.join(", ")
    )]
    AmbiguousOverload {
        function: String,
        arg_types: Vec<String>,
        first: Vec<String>,
        second: Vec<String>,
    },
}

impl DispatchError {
    /// The function name the error is about.
    pub fn function(&self) -> &str {
        match self {
            DispatchError::MissingTypeAnnotation { function, .. }
            | DispatchError::DuplicateParameter { function, .. }
            | DispatchError::DuplicateSignature { function, .. }
            | DispatchError::NoMatchingOverload { function, .. }
            | DispatchError::AmbiguousOverload { function, .. } => function,
        }
    }

    /// Returns true for errors raised while registering an overload.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            DispatchError::MissingTypeAnnotation { .. }
                | DispatchError::DuplicateParameter { .. }
                | DispatchError::DuplicateSignature { .. }
        )
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DispatchError::DuplicateSignature {
            function: "add".to_string(),
            signature: vec!["int".to_string(), "int".to_string()],
        };
        assert_eq!(err.to_string(), "`add` already has an overload for (int, int)");
        assert!(err.is_registration_error());

        let err = DispatchError::AmbiguousOverload {
            function: "f".to_string(),
            arg_types: vec!["int".to_string(), "int".to_string()],
            first: vec!["number".to_string(), "object".to_string()],
            second: vec!["object".to_string(), "number".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "call to `f` with argument types (int, int) is ambiguous between \
             (number, object) and (object, number)"
        );
        assert_eq!(err.function(), "f");
        assert!(!err.is_registration_error());
    }

    #[test]
    fn test_no_match_without_arguments() {
        let err = DispatchError::NoMatchingOverload {
            function: "f".to_string(),
            arg_types: vec![],
        };
        assert_eq!(err.to_string(), "no overload of `f` matches argument types ()");
    }
}
