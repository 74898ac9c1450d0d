//! Bytecode disassembler. Only compiled in behind the `trace` feature,
//! where it renders one instruction at a time during dispatch, or used
//! directly by anyone embedding the crate who wants to inspect a `Chunk`.

use crate::chunk::{Chunk, OpCode};
use crate::value::{format_value, Value};

pub fn disassemble_chunk(chunk: &Chunk, name: &str) {
    eprintln!("== {name} ==");
    let mut offset = 0;
    while offset < chunk.code.len() {
        offset = disassemble_instruction(chunk, offset);
    }
}

pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> usize {
    eprint!("{offset:06X} ");
    if offset > 0 && chunk.lines[offset] == chunk.lines[offset - 1] {
        eprint!("   | ");
    } else {
        eprint!("{:4} ", chunk.lines[offset]);
    }

    let byte = chunk.code[offset];
    let Some(op) = OpCode::from_u8(byte) else {
        eprintln!("Unknown opcode {byte}");
        return offset + 1;
    };

    use OpCode::*;
    match op {
        Constant => constant_instruction("OP_CONSTANT", chunk, offset),
        Nil => simple_instruction("OP_NIL", offset),
        True => simple_instruction("OP_TRUE", offset),
        False => simple_instruction("OP_FALSE", offset),
        Pop => simple_instruction("OP_POP", offset),
        DefineGlobal => constant_instruction("OP_DEFINE_GLOBAL", chunk, offset),
        GetGlobal => constant_instruction("OP_GET_GLOBAL", chunk, offset),
        SetGlobal => constant_instruction("OP_SET_GLOBAL", chunk, offset),
        GetLocal => byte_instruction("OP_GET_LOCAL", chunk, offset),
        SetLocal => byte_instruction("OP_SET_LOCAL", chunk, offset),
        Equal => simple_instruction("OP_EQUAL", offset),
        Greater => simple_instruction("OP_GREATER", offset),
        Less => simple_instruction("OP_LESS", offset),
        Add => simple_instruction("OP_ADD", offset),
        Subtract => simple_instruction("OP_SUBTRACT", offset),
        Multiply => simple_instruction("OP_MULTIPLY", offset),
        Divide => simple_instruction("OP_DIVIDE", offset),
        Not => simple_instruction("OP_NOT", offset),
        Negate => simple_instruction("OP_NEGATE", offset),
        Print => simple_instruction("OP_PRINT", offset),
        Jump => jump_instruction("OP_JUMP", 1, chunk, offset),
        JumpIfFalse => jump_instruction("OP_JUMP_IF_FALSE", 1, chunk, offset),
        Loop => jump_instruction("OP_LOOP", -1, chunk, offset),
        Call => byte_instruction("OP_CALL", chunk, offset),
        Return => simple_instruction("OP_RETURN", offset),
    }
}

fn simple_instruction(name: &str, offset: usize) -> usize {
    eprintln!("{name}");
    offset + 1
}

fn byte_instruction(name: &str, chunk: &Chunk, offset: usize) -> usize {
    let slot = chunk.code[offset + 1];
    eprintln!("{name:-16} {slot:4}");
    offset + 2
}

fn jump_instruction(name: &str, sign: i32, chunk: &Chunk, offset: usize) -> usize {
    let hi = chunk.code[offset + 1] as u16;
    let lo = chunk.code[offset + 2] as u16;
    let jump = (hi << 8) | lo;
    let target = offset as i32 + 3 + sign * jump as i32;
    eprintln!("{name:-16} {offset:4} -> {target}");
    offset + 3
}

fn constant_instruction(name: &str, chunk: &Chunk, offset: usize) -> usize {
    let constant = chunk.code[offset + 1];
    let value = &chunk.constants[constant as usize];
    eprintln!("{name:-16} {constant:4} '{}'", format_value(value));
    if let Value::Function(function) = value {
        disassemble_chunk(
            &function.chunk,
            &function
                .name
                .as_ref()
                .map(|n| n.bytes.clone())
                .unwrap_or_else(|| "script".to_string()),
        );
    }
    offset + 2
}
