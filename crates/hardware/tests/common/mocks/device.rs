use mockall::mock;
use rhea_core::soc::traits::{Device, RegionKind};

mock! {
    pub Mmio {
        pub fn read_u32(&mut self, offset: u64) -> u32;
        pub fn write_u32(&mut self, offset: u64, val: u32);
    }
}

/// A named I/O window whose 32-bit accesses go to a [`MockMmio`].
///
/// Narrower accesses read as zero and are dropped, like an unimplemented register file.
pub struct ScriptedDevice {
    name: String,
    size: u64,
    pub io: MockMmio,
}

impl ScriptedDevice {
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_owned(),
            size,
            io: MockMmio::new(),
        }
    }
}

impl Device for ScriptedDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn kind(&self) -> RegionKind {
        RegionKind::Io
    }

    fn read_u8(&mut self, _offset: u64) -> u8 {
        0
    }

    fn read_u16(&mut self, _offset: u64) -> u16 {
        0
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        self.io.read_u32(offset)
    }

    fn read_u64(&mut self, _offset: u64) -> u64 {
        0
    }

    fn write_u8(&mut self, _offset: u64, _val: u8) {}

    fn write_u16(&mut self, _offset: u64, _val: u16) {}

    fn write_u32(&mut self, offset: u64, val: u32) {
        self.io.write_u32(offset, val);
    }

    fn write_u64(&mut self, _offset: u64, _val: u64) {}
}
