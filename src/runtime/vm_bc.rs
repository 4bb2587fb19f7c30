use log::{debug, trace};

use crate::bytecode::{CompiledProgram, Op};
use crate::config::Limits;
use crate::lang::value::Literal;
use crate::runtime::runtime_error::{RuntimeError, RuntimeErrorKind};

/// Local variable slots in one function scope.
pub const FUNC_SCOPE_SLOTS: usize = 8;

/// One block of local variables.
///
/// No opcode addresses locals yet; frames reserve room for them so the
/// call stack layout does not change when variables arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFrame {
    pub vars: [i32; FUNC_SCOPE_SLOTS],
}

/// One active function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Slot of the function being executed.
    pub function: usize,
    /// Index of the next instruction to execute.
    pub pc: usize,
    pub scopes: Vec<ScopeFrame>,
}

impl Frame {
    fn new(function: usize, max_scope_frames: usize) -> Self {
        Frame {
            function,
            pc: 0,
            scopes: Vec::with_capacity(max_scope_frames),
        }
    }
}

/// Stack machine executing a `CompiledProgram`.
///
/// A single operand stack is shared by all frames and is never popped on
/// return: each function's last pushed value stays on top for its caller.
pub struct Interpreter {
    limits: Limits,
    frames: Vec<Frame>,
    operands: Vec<Literal>,
    steps: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            frames: Vec::with_capacity(limits.max_call_depth),
            operands: Vec::with_capacity(limits.max_operand_stack),
            steps: 0,
            limits,
        }
    }

    pub fn operands(&self) -> &[Literal] {
        &self.operands
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Instructions executed by the last run.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn reset_execution_state(&mut self) {
        self.steps = 0;
        self.frames.clear();
        self.operands.clear();
    }

    /// Runs `program` from `main` until its call stack empties.
    ///
    /// The result is the integer on top of the operand stack, or 0 when the
    /// top is not an integer or the stack is empty.
    pub fn run(&mut self, program: &CompiledProgram) -> Result<i32, RuntimeError> {
        self.reset_execution_state();

        if !program.has_main() {
            return Err(RuntimeError::new(RuntimeErrorKind::MissingMain));
        }

        self.push_frame(program, 0)?;
        self.exec(program)?;

        let result = match self.operands.last() {
            Some(Literal::Int(n)) => *n,
            _ => 0,
        };
        debug!("program finished after {} steps with {}", self.steps, result);
        Ok(result)
    }

    // Execution

    fn exec(&mut self, program: &CompiledProgram) -> Result<(), RuntimeError> {
        while let Some(frame) = self.frames.last_mut() {
            let slot = frame.function;
            let function = program.function(slot).ok_or_else(|| {
                RuntimeError::new(RuntimeErrorKind::BadFunctionIndex {
                    index: slot,
                    count: program.functions.len(),
                })
            })?;

            let Some(op) = function.ops.get(frame.pc) else {
                let kind = RuntimeErrorKind::MissingReturn {
                    function: function.name.clone(),
                };
                return Err(self.error(program, kind));
            };
            frame.pc += 1;

            self.check_limits(program)?;
            trace!("{}@{:04} {}", function.name, frame_pc(&self.frames), op);

            match op {
                Op::Return => {
                    self.frames.pop();
                }
                Op::Push(literal) => self.push_operand(program, literal.clone())?,
                Op::Call(index) => self.push_frame(program, *index)?,
                Op::Add | Op::None => {}
            }
        }

        Ok(())
    }

    fn check_limits(&mut self, program: &CompiledProgram) -> Result<(), RuntimeError> {
        self.steps += 1;

        if let Some(limit) = self.limits.max_steps {
            if self.steps > limit {
                return Err(self.error(program, RuntimeErrorKind::StepLimitExceeded { limit }));
            }
        }

        Ok(())
    }

    fn push_frame(&mut self, program: &CompiledProgram, index: usize) -> Result<(), RuntimeError> {
        if index >= program.functions.len() {
            let kind = RuntimeErrorKind::BadFunctionIndex {
                index,
                count: program.functions.len(),
            };
            return Err(self.error(program, kind));
        }

        if self.frames.len() >= self.limits.max_call_depth {
            let kind = RuntimeErrorKind::CallStackOverflow {
                limit: self.limits.max_call_depth,
            };
            return Err(self.error(program, kind));
        }

        self.frames.push(Frame::new(index, self.limits.max_scope_frames));
        Ok(())
    }

    fn push_operand(&mut self, program: &CompiledProgram, value: Literal) -> Result<(), RuntimeError> {
        if self.operands.len() >= self.limits.max_operand_stack {
            let kind = RuntimeErrorKind::OperandStackOverflow {
                limit: self.limits.max_operand_stack,
            };
            return Err(self.error(program, kind));
        }

        self.operands.push(value);
        Ok(())
    }

    /// Builds an error carrying the names of all active frames.
    fn error(&self, program: &CompiledProgram, kind: RuntimeErrorKind) -> RuntimeError {
        self.frames
            .iter()
            .fold(RuntimeError::new(kind), |err, frame| {
                let name = program
                    .function(frame.function)
                    .map(|f| f.name.as_str())
                    .unwrap_or("<invalid>");
                err.with_context(name)
            })
    }
}

/// Address of the instruction just fetched by the innermost frame.
fn frame_pc(frames: &[Frame]) -> usize {
    frames.last().map(|f| f.pc.saturating_sub(1)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::CompiledFunction;

    // ============================================================
    // Test Helpers
    // ============================================================

    fn function(name: &str, ops: Vec<Op>) -> CompiledFunction {
        CompiledFunction {
            name: name.to_string(),
            ops,
        }
    }

    /// Create a program whose `main` is the given ops
    fn program_from_ops(ops: Vec<Op>) -> CompiledProgram {
        CompiledProgram {
            functions: vec![function("main", ops)],
        }
    }

    fn run_program(program: &CompiledProgram) -> Result<i32, RuntimeError> {
        Interpreter::new().run(program)
    }

    fn run_with_limits(program: &CompiledProgram, limits: Limits) -> Result<i32, RuntimeError> {
        Interpreter::with_limits(limits).run(program)
    }

    /// Assert execution fails with the given error kind
    fn assert_error(program: &CompiledProgram, expected: RuntimeErrorKind) {
        match run_program(program) {
            Ok(result) => panic!("expected error {:?}, got result {}", expected, result),
            Err(e) => assert_eq!(e.kind, expected, "unexpected error: {}", e),
        }
    }

    #[test]
    fn test_push_return() {
        let program = program_from_ops(vec![Op::Push(Literal::Int(88)), Op::Return]);
        assert_eq!(run_program(&program).unwrap(), 88);
    }

    #[test]
    fn test_last_push_wins() {
        let program = program_from_ops(vec![
            Op::Push(Literal::Int(1)),
            Op::Push(Literal::Int(2)),
            Op::Return,
        ]);
        assert_eq!(run_program(&program).unwrap(), 2);
    }

    #[test]
    fn test_call_leaves_value_for_caller() {
        let program = CompiledProgram {
            functions: vec![
                function("main", vec![Op::Call(1), Op::Return]),
                function("f", vec![Op::Push(Literal::Int(10)), Op::Return]),
            ],
        };
        assert_eq!(run_program(&program).unwrap(), 10);
    }

    #[test]
    fn test_nested_calls() {
        let program = CompiledProgram {
            functions: vec![
                function("main", vec![Op::Call(2), Op::Return]),
                function("ahoj", vec![Op::Push(Literal::Int(420)), Op::Return]),
                function("f", vec![Op::Call(1), Op::Return]),
            ],
        };
        assert_eq!(run_program(&program).unwrap(), 420);
    }

    #[test]
    fn test_non_integer_result_is_zero() {
        let program = program_from_ops(vec![Op::Push(Literal::Char('k')), Op::Return]);
        assert_eq!(run_program(&program).unwrap(), 0);
    }

    #[test]
    fn test_empty_operand_stack_is_zero() {
        let program = program_from_ops(vec![Op::Return]);
        assert_eq!(run_program(&program).unwrap(), 0);
    }

    #[test]
    fn test_add_and_none_are_no_ops() {
        let program = program_from_ops(vec![
            Op::Push(Literal::Int(5)),
            Op::Add,
            Op::None,
            Op::Return,
        ]);
        let mut vm = Interpreter::new();
        assert_eq!(vm.run(&program).unwrap(), 5);
        assert_eq!(vm.operands(), &[Literal::Int(5)]);
        assert_eq!(vm.steps(), 4);
        assert!(vm.frames().is_empty());
    }

    #[test]
    fn test_missing_main() {
        assert_error(&CompiledProgram::default(), RuntimeErrorKind::MissingMain);
    }

    #[test]
    fn test_missing_return() {
        let program = program_from_ops(vec![Op::Push(Literal::Int(1))]);
        assert_error(
            &program,
            RuntimeErrorKind::MissingReturn {
                function: "main".to_string(),
            },
        );
    }

    #[test]
    fn test_bad_function_index() {
        let program = program_from_ops(vec![Op::Call(5), Op::Return]);
        assert_error(&program, RuntimeErrorKind::BadFunctionIndex { index: 5, count: 1 });
    }

    #[test]
    fn test_recursion_hits_call_depth_limit() {
        let program = program_from_ops(vec![Op::Call(0), Op::Return]);
        let err = run_with_limits(
            &program,
            Limits {
                max_call_depth: 4,
                ..Limits::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::CallStackOverflow { limit: 4 });
        assert_eq!(err.call_stack, vec!["main"; 4]);
    }

    #[test]
    fn test_call_depth_exact_fit() {
        let program = CompiledProgram {
            functions: vec![
                function("main", vec![Op::Call(1), Op::Return]),
                function("f", vec![Op::Push(Literal::Int(3)), Op::Return]),
            ],
        };
        let limits = Limits {
            max_call_depth: 2,
            ..Limits::default()
        };
        assert_eq!(run_with_limits(&program, limits).unwrap(), 3);
    }

    #[test]
    fn test_operand_stack_overflow() {
        let program = program_from_ops(vec![
            Op::Push(Literal::Int(1)),
            Op::Push(Literal::Int(2)),
            Op::Push(Literal::Int(3)),
            Op::Return,
        ]);
        let limits = Limits {
            max_operand_stack: 2,
            ..Limits::default()
        };
        let err = run_with_limits(&program, limits).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::OperandStackOverflow { limit: 2 });
    }

    #[test]
    fn test_step_limit() {
        let program = program_from_ops(vec![Op::None, Op::None, Op::None, Op::Return]);
        let limits = Limits {
            max_steps: Some(2),
            ..Limits::default()
        };
        let err = run_with_limits(&program, limits).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::StepLimitExceeded { limit: 2 });
    }

    #[test]
    fn test_rerun_resets_state() {
        let program = program_from_ops(vec![Op::Push(Literal::Int(7)), Op::Return]);
        let mut vm = Interpreter::new();
        assert_eq!(vm.run(&program).unwrap(), 7);
        assert_eq!(vm.run(&program).unwrap(), 7);
        assert_eq!(vm.operands().len(), 1);
    }
}
