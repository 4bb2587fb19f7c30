use std::fmt::Write;

use crate::bytecode::{CompiledProgram, Op};

/// Print disassembly of a bytecode program
pub fn print_bc(program: &CompiledProgram) {
    print!("{}", disassemble(program));
}

/// Render every function of `program`, slot order.
pub fn disassemble(program: &CompiledProgram) -> String {
    let mut out = String::new();
    out.push_str("=== BYTECODE PROGRAM ===\n\n");

    for (slot, function) in program.functions.iter().enumerate() {
        let label = if function.name.is_empty() {
            format!("<undeclared> (slot {})", slot)
        } else {
            format!("{} (slot {})", function.name, slot)
        };
        write_code_object(&mut out, program, &label, &function.ops);
    }

    out
}

fn write_code_object(out: &mut String, program: &CompiledProgram, label: &str, ops: &[Op]) {
    // writing to a String cannot fail
    let _ = writeln!(out, "════════════════════════════════════════");
    let _ = writeln!(out, " {}", label);
    let _ = writeln!(out, " {} instructions", ops.len());
    let _ = writeln!(out, "════════════════════════════════════════");
    for (ip, op) in ops.iter().enumerate() {
        let _ = writeln!(out, "{:04}  {}", ip, format_op(program, op));
    }
    out.push('\n');
}

fn format_op(program: &CompiledProgram, op: &Op) -> String {
    match op {
        Op::Call(index) => match program.function(*index) {
            Some(callee) if !callee.name.is_empty() => format!("{} ; {}", op, callee.name),
            _ => format!("{} ; <invalid>", op),
        },
        _ => op.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::CompiledFunction;
    use crate::lang::value::Literal;

    #[test]
    fn test_disassemble_names_callees() {
        let program = CompiledProgram {
            functions: vec![
                CompiledFunction {
                    name: "main".to_string(),
                    ops: vec![Op::Call(1), Op::Call(7), Op::Return],
                },
                CompiledFunction {
                    name: "f".to_string(),
                    ops: vec![Op::Push(Literal::Int(10)), Op::Return],
                },
            ],
        };
        let text = disassemble(&program);
        assert!(text.contains(" main (slot 0)"), "{}", text);
        assert!(text.contains("0000  CALL        1 ; f"), "{}", text);
        assert!(text.contains("0001  CALL        7 ; <invalid>"), "{}", text);
        assert!(text.contains("0000  PUSH        10"), "{}", text);
        assert!(text.contains(" 3 instructions"), "{}", text);
    }

    #[test]
    fn test_disassemble_empty_program() {
        let text = disassemble(&CompiledProgram::default());
        assert!(text.contains("<undeclared> (slot 0)"));
        assert!(text.contains(" 0 instructions"));
    }
}
