pub const MAX_MEMORY: usize = 0x10000;

/// Flat 64 KiB address space. Every `u16` is a valid index.
pub struct Memory {
    pub(crate) data: Box<[u8]>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            data: vec![0; MAX_MEMORY].into_boxed_slice(),
        }
    }

    /// Power-on clear.
    pub fn init(&mut self) {
        self.data.fill(0);
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.data[addr as usize] = data;
    }

    pub fn read_word(&self, addr: u16) -> u16 {
        let low = self.read(addr) as u16;
        let high = self.read(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Copies `program` starting at `start_addr`, wrapping past $FFFF.
    pub fn load(&mut self, start_addr: u16, program: &[u8]) {
        let mut addr = start_addr;
        for &byte in program {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }

    pub fn hexdump_page(&self, page: u8) -> String {
        let mut out = String::new();
        let base = (page as u16) << 8;

        for row in 0..16u16 {
            let row_addr = base | (row << 4);
            let mut hex = String::new();
            let mut ascii = String::new();
            for col in 0..16u16 {
                let byte = self.read(row_addr | col);
                hex.push_str(&format!("{:02X} ", byte));
                ascii.push(if byte.is_ascii_graphic() || byte == b' ' {
                    byte as char
                } else {
                    '.'
                });
            }
            out.push_str(&format!("{:04X} {}{}\n", row_addr, hex, ascii));
        }

        out
    }

    // Snapshot access
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    pub fn set_contents(&mut self, image: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        if image.len() != MAX_MEMORY {
            return Err(format!(
                "memory image is {} bytes, expected {}",
                image.len(),
                MAX_MEMORY
            )
            .into());
        }
        self.data.copy_from_slice(image);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
