use super::Cpu;
use AddressingMode::*;

pub const LDA_IMMEDIATE: u8 = 0xA9;
pub const LDA_ZERO_PAGE: u8 = 0xA5;
pub const JSR: u8 = 0x20;
pub const RTS: u8 = 0x60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Immediate,
    ZeroPage,
    Absolute,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            Implied => 0,
            Immediate | ZeroPage => 1,
            Absolute => 2,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Instruction {
    pub name: &'static str,
    pub mode: AddressingMode,
    pub cycles: u8,
    pub execute: fn(&mut Cpu),
}

impl Instruction {
    const fn new(name: &'static str, mode: AddressingMode, cycles: u8, execute: fn(&mut Cpu)) -> Self {
        Instruction {
            name,
            mode,
            cycles,
            execute,
        }
    }

    pub const fn bytes(&self) -> u8 {
        1 + self.mode.operand_len()
    }
}

pub static OPCODES: [Option<Instruction>; 256] = {
    let mut opcodes = [None; 256];

    opcodes[LDA_IMMEDIATE as usize] = Some(Instruction::new("LDA", Immediate, 2, Cpu::lda_immediate));
    opcodes[LDA_ZERO_PAGE as usize] = Some(Instruction::new("LDA", ZeroPage, 3, Cpu::lda_zero_page));

    opcodes[JSR as usize] = Some(Instruction::new("JSR", Absolute, 4, Cpu::jsr));
    opcodes[RTS as usize] = Some(Instruction::new("RTS", Implied, 3, Cpu::rts));

    opcodes
};

pub fn lookup(opcode: u8) -> Option<&'static Instruction> {
    OPCODES[opcode as usize].as_ref()
}
