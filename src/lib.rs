//! Execution core of a 6502-family processor: flat 64 KiB memory, status
//! flags, register file and a cycle-budgeted fetch/decode/execute loop.

pub mod config;
pub mod cpu;
pub mod memory;
pub mod savestate;
