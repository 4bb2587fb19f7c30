/// What went wrong during execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeErrorKind {
    #[error("program has no 'main' function")]
    MissingMain,
    #[error("call to function slot {index}, but the program has {count} functions")]
    BadFunctionIndex { index: usize, count: usize },
    #[error("function '{function}' ended without return")]
    MissingReturn { function: String },
    #[error("call depth limit exceeded ({limit}) - possible infinite recursion")]
    CallStackOverflow { limit: usize },
    #[error("operand stack limit exceeded ({limit})")]
    OperandStackOverflow { limit: usize },
    #[error("execution step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    /// Function names on the call stack when the error occurred, outermost first.
    pub call_stack: Vec<String>,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "runtime error: {}", self.kind)?;

        if !self.call_stack.is_empty() {
            write!(f, "\n  call stack:")?;

            for (i, frame) in self.call_stack.iter().rev().enumerate() {
                write!(f, "\n    {}: {}", i, frame)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind) -> Self {
        RuntimeError {
            kind,
            call_stack: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.call_stack.push(context.to_string());
        self
    }
}
