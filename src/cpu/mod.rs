use bitflags::bitflags;
use std::fmt;

use crate::config::{CpuConfig, RtsMode, UnknownOpcodePolicy};
use crate::memory::Memory;

pub mod disasm;
pub mod opcodes;


pub const RESET_VECTOR: u16 = 0xFFFC;
pub const STACK_PAGE: u16 = 0x0100;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const INTERRUPT_DISABLE = 0b00000100;
        const DECIMAL = 0b00001000;
        const BREAK = 0b00010000;
        const UNUSED = 0b00100000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;
    }
}

impl StatusFlags {
    /// Inserts `flag` when `condition` holds. Never removes it.
    pub fn set_if(&mut self, condition: bool, flag: StatusFlags) {
        if condition {
            self.insert(flag);
        }
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LETTERS: [(StatusFlags, char); 8] = [
            (StatusFlags::NEGATIVE, 'N'),
            (StatusFlags::OVERFLOW, 'V'),
            (StatusFlags::UNUSED, 'U'),
            (StatusFlags::BREAK, 'B'),
            (StatusFlags::DECIMAL, 'D'),
            (StatusFlags::INTERRUPT_DISABLE, 'I'),
            (StatusFlags::ZERO, 'Z'),
            (StatusFlags::CARRY, 'C'),
        ];
        for (flag, letter) in LETTERS {
            let c = if self.contains(flag) { letter } else { '-' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    BudgetExhausted,
    Halted { opcode: u8, address: u16 },
}

pub struct Cpu {
    pub a: u8,      // Accumulator
    pub x: u8,      // X register
    pub y: u8,      // Y register
    pub sp: u8,     // Stack pointer
    pub pc: u16,    // Program counter
    pub status: StatusFlags,
    pub memory: Memory,
    pub(crate) cycles: i64, // Remaining budget, may go negative
    config: CpuConfig,
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        let mut cpu = Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFF,
            pc: 0,
            status: StatusFlags::empty(),
            memory: Memory::new(),
            cycles: 0,
            config,
        };
        cpu.reset();
        cpu
    }

    pub fn config(&self) -> CpuConfig {
        self.config
    }

    pub fn cycles(&self) -> i64 {
        self.cycles
    }

    pub fn reset(&mut self) {
        self.reset_to_vector(RESET_VECTOR);
    }

    /// Reinitializes every register and clears memory. PC is set to `vector`
    /// itself; the word stored there is not dereferenced.
    pub fn reset_to_vector(&mut self, vector: u16) {
        self.pc = vector;
        self.sp = 0xFF;
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.status = StatusFlags::empty();
        self.cycles = 0;
        self.memory.init();
    }

    pub fn fetch_byte(&mut self) -> u8 {
        let byte = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        self.cycles -= 1;
        byte
    }

    pub fn fetch_word(&mut self) -> u16 {
        let low = self.memory.read(self.pc) as u16;
        self.pc = self.pc.wrapping_add(1);
        let high = self.memory.read(self.pc) as u16;
        self.pc = self.pc.wrapping_add(1);
        self.cycles -= 2;
        (high << 8) | low
    }

    /// Zero-page read.
    pub fn read_byte(&mut self, addr: u8) -> u8 {
        let byte = self.memory.read(addr as u16);
        self.cycles -= 1;
        byte
    }

    pub fn stack_address(&self) -> u16 {
        STACK_PAGE | self.sp as u16
    }

    /// High byte first, then low byte; SP ends two below where it started.
    pub fn push_word_to_stack(&mut self, value: u16) {
        self.memory.write(self.stack_address(), (value >> 8) as u8);
        self.sp = self.sp.wrapping_sub(1);
        self.memory.write(self.stack_address(), value as u8);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Inverse of `push_word_to_stack`. Only the corrected RTS uses it.
    pub fn pull_word_from_stack(&mut self) -> u16 {
        self.sp = self.sp.wrapping_add(1);
        let low = self.memory.read(self.stack_address()) as u16;
        self.sp = self.sp.wrapping_add(1);
        let high = self.memory.read(self.stack_address()) as u16;
        (high << 8) | low
    }

    /// Fetches and executes one instruction. Returns the opcode and its
    /// address when the byte has no handler; nothing else is touched then.
    pub fn step(&mut self) -> Option<(u8, u16)> {
        let address = self.pc;
        let opcode = self.fetch_byte();

        match opcodes::lookup(opcode) {
            Some(instruction) => {
                log::trace!(
                    "{:04X}  {:02X}  {} ({} cycles)",
                    address,
                    opcode,
                    instruction.name,
                    instruction.cycles
                );
                (instruction.execute)(self);
                None
            }
            None => Some((opcode, address)),
        }
    }

    /// Runs until the budget drops to zero or below. The instruction in
    /// flight always completes, so the counter can end negative.
    pub fn run(&mut self, budget: i64) -> RunExit {
        self.cycles = budget;

        while self.cycles > 0 {
            let Some((opcode, address)) = self.step() else {
                continue;
            };
            match self.config.unknown_opcode {
                UnknownOpcodePolicy::LogAndContinue => {
                    log::warn!("Unhandled opcode: 0x{:02X} at PC: 0x{:04X}", opcode, address);
                }
                UnknownOpcodePolicy::Halt => {
                    log::error!("Halting on unknown opcode: 0x{:02X} at PC: 0x{:04X}", opcode, address);
                    return RunExit::Halted { opcode, address };
                }
            }
        }

        RunExit::BudgetExhausted
    }

    pub fn register_dump(&self) -> String {
        format!("A: {:02X}\n", self.a)
            + &format!("X: {:02X}\n", self.x)
            + &format!("Y: {:02X}\n", self.y)
            + &format!("P: {:02X} {}\n", self.status.bits(), self.status)
            + &format!("SP: {:02X}\n", self.sp)
            + &format!("PC: {:04X}", self.pc)
    }

    fn set_zero_negative_flags(&mut self, value: u8) {
        self.status.set_if(value == 0, StatusFlags::ZERO);
        self.status.set_if(value & 0x80 != 0, StatusFlags::NEGATIVE);
    }

    pub(crate) fn lda_immediate(&mut self) {
        let value = self.fetch_byte();
        self.a = value;
        self.set_zero_negative_flags(value);
    }

    pub(crate) fn lda_zero_page(&mut self) {
        let addr = self.fetch_byte();
        let value = self.read_byte(addr);
        self.a = value;
        self.set_zero_negative_flags(value);
    }

    pub(crate) fn jsr(&mut self) {
        let target = self.fetch_word();
        // PC sits on the byte after the operand; push that minus one
        self.push_word_to_stack(self.pc.wrapping_sub(1));
        self.pc = target;
        self.cycles -= 1;
    }

    pub(crate) fn rts(&mut self) {
        let return_addr = match self.config.rts {
            RtsMode::Legacy => {
                // Zero-page address SP, read twice, SP untouched
                let byte = self.memory.read(self.sp as u16) as u16;
                byte | (byte << 8)
            }
            RtsMode::Corrected => self.pull_word_from_stack(),
        };
        self.pc = return_addr.wrapping_add(1);
        self.cycles -= 2;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
