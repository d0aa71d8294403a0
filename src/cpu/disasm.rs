use super::opcodes::{self, AddressingMode};
use crate::memory::Memory;

/// Renders the instruction at `location` as `AAAA  HH HH HH  MNE operand`.
/// Returns the line and the instruction length, or `None` for an unmapped opcode.
pub fn disassemble(memory: &Memory, location: u16) -> Option<(String, u8)> {
    let instruction = opcodes::lookup(memory.read(location))?;
    let length = instruction.bytes();

    let mut bytes = String::new();
    for i in 0..length {
        bytes.push_str(&format!("{:02X} ", memory.read(location.wrapping_add(i as u16))));
    }

    let operand_addr = location.wrapping_add(1);
    let operand = match instruction.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Immediate => format!("#${:02X}", memory.read(operand_addr)),
        AddressingMode::ZeroPage => format!("${:02X}", memory.read(operand_addr)),
        AddressingMode::Absolute => format!("${:04X}", memory.read_word(operand_addr)),
    };

    let line = format!("{:04X}  {:<9} {} {}", location, bytes, instruction.name, operand);
    Some((line.trim_end().to_string(), length))
}

/// Disassembles consecutive instructions from `start`, stopping at the first
/// unmapped opcode or after `max_instructions`.
pub fn disassemble_range(memory: &Memory, start: u16, max_instructions: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut location = start;

    while lines.len() < max_instructions {
        let Some((line, length)) = disassemble(memory, location) else {
            break;
        };
        lines.push(line);
        location = location.wrapping_add(length as u16);
    }

    lines
}
