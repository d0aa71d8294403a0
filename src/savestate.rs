use serde::{Deserialize, Serialize};

use crate::cpu::{Cpu, StatusFlags};
use crate::memory::MAX_MEMORY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    // CPU state
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: u16,
    pub sp: u8,
    pub status: u8,
    pub cycles: i64,

    // Full 64 KiB image
    pub memory: Vec<u8>,
}

impl CpuSnapshot {
    pub fn save_to_file(&self, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
        let data = bincode::serialize(self)?;
        std::fs::write(filename, data)?;
        log::info!("Save state written to: {}", filename);
        Ok(())
    }

    pub fn load_from_file(filename: &str) -> Result<CpuSnapshot, Box<dyn std::error::Error>> {
        let data = std::fs::read(filename)?;
        let snapshot: CpuSnapshot = bincode::deserialize(&data)?;
        if snapshot.memory.len() != MAX_MEMORY {
            return Err(format!(
                "save state memory image is {} bytes, expected {}",
                snapshot.memory.len(),
                MAX_MEMORY
            )
            .into());
        }
        log::info!("Save state loaded from: {}", filename);
        Ok(snapshot)
    }
}

impl Cpu {
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            a: self.a,
            x: self.x,
            y: self.y,
            pc: self.pc,
            sp: self.sp,
            status: self.status.bits(),
            cycles: self.cycles,
            memory: self.memory.contents().to_vec(),
        }
    }

    /// Fails without touching any state if the memory image is not 64 KiB.
    pub fn restore(&mut self, snapshot: &CpuSnapshot) -> Result<(), Box<dyn std::error::Error>> {
        self.memory.set_contents(&snapshot.memory)?;
        self.a = snapshot.a;
        self.x = snapshot.x;
        self.y = snapshot.y;
        self.pc = snapshot.pc;
        self.sp = snapshot.sp;
        self.status = StatusFlags::from_bits_retain(snapshot.status);
        self.cycles = snapshot.cycles;
        Ok(())
    }
}
