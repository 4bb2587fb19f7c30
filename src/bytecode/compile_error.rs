/// Semantic and consistency errors raised while emitting code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Call to a name that has not been declared before the call site.
    #[error("compile error: call to undefined function '{0}'")]
    UndefinedFunction(String),

    /// A second definition of an already declared function.
    #[error("compile error: function '{0}' is already defined")]
    DuplicateFunction(String),

    /// The function table is full.
    #[error("compile error: cannot define '{name}': function table is full ({limit} slots)")]
    TooManyFunctions { name: String, limit: usize },

    /// A function body outgrew its instruction buffer.
    #[error("compile error: function '{name}' exceeds {limit} instructions")]
    FunctionTooLong { name: String, limit: usize },

    /// Code emitted while no function is being compiled.
    #[error("compile error: internal error: not inside a function")]
    NotInFunction,

    /// A function was registered before any identifier was read.
    #[error("compile error: internal error: function name missing")]
    MissingFunctionName,
}

impl CompileError {
    /// Suggestion shown under the error by the command-line host.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CompileError::UndefinedFunction(_) => {
                Some("functions must be declared before the first call to them")
            }
            CompileError::DuplicateFunction(_) => Some("rename one of the definitions"),
            CompileError::TooManyFunctions { .. } | CompileError::FunctionTooLong { .. } => {
                Some("raise the limit with --limits")
            }
            CompileError::NotInFunction | CompileError::MissingFunctionName => None,
        }
    }
}
