//! Configuration system for the Rhea machine.
//!
//! This module defines the user-facing machine configuration. It provides:
//! 1. **Defaults:** Baseline board parameters (CPU model, hart count, DRAM size).
//! 2. **Structures:** Hierarchical config for CPU model, SMP, NUMA and memory.
//! 3. **Validation:** The checks the machine framework performs before `RheaMachine::init`.
//!
//! Configuration is supplied as JSON or built with `MachineConfig::default()`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::constants::RHEA_CPUS_MAX;
use crate::common::error::ConfigError;
use crate::soc::memmap::RheaRegion;

/// Largest DRAM size the board accepts: the region must end inside the 64-bit
/// physical address space and be addressable by the host.
pub const MAX_RAM_SIZE: u64 = {
    let window = u64::MAX - RheaRegion::Dram.entry().base;
    let host = usize::MAX as u64;
    if host < window { host } else { window }
};

/// Default configuration constants for the machine.
mod defaults {
    use crate::soc::memmap::{RHEA_MEMMAP, RheaRegion};

    /// Number of harts when not overridden.
    pub const CPUS: u32 = 1;

    /// DRAM size when not overridden: the full DRAM window of the memory map (570 MiB).
    pub const RAM_SIZE: u64 = RHEA_MEMMAP[RheaRegion::Dram as usize].size;
}

/// CPU models a hart array can be populated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuType {
    /// 32-bit base CPU.
    Rv32,
    /// 64-bit base CPU; the board default.
    #[default]
    Rv64,
    /// 64-bit CPU with every supported extension enabled.
    Max,
}

impl CpuType {
    /// Returns the model name as written in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rv32 => "rv32",
            Self::Rv64 => "rv64",
            Self::Max => "max",
        }
    }

    /// Returns the native register width in bits.
    pub const fn xlen(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 | Self::Max => 64,
        }
    }
}

impl fmt::Display for CpuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CpuType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rv32" => Ok(Self::Rv32),
            "rv64" => Ok(Self::Rv64),
            "max" => Ok(Self::Max),
            other => Err(ConfigError::UnknownCpuType(other.to_owned())),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rhea_core::config::{CpuType, MachineConfig};
///
/// let json = r#"{ "cpu_type": "rv64", "smp": { "cpus": 2 } }"#;
/// let config = MachineConfig::from_json(json).unwrap();
/// assert_eq!(config.cpu_type, CpuType::Rv64);
/// assert_eq!(config.smp.cpus, 2);
/// assert!(config.numa.nodes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MachineConfig {
    /// CPU model used for every hart on the board.
    #[serde(default)]
    pub cpu_type: CpuType,
    /// Hart count.
    #[serde(default)]
    pub smp: SmpConfig,
    /// NUMA node layout; empty means NUMA is disabled.
    #[serde(default)]
    pub numa: NumaConfig,
    /// Main memory parameters.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl MachineConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks the configuration against the board's limits.
    ///
    /// Topology limits (socket count, contiguous hart IDs) are left to the
    /// topology validator; this covers what must hold before a topology can
    /// even be built.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cpus = self.smp.cpus;
        if cpus == 0 {
            return Err(ConfigError::NoCpus);
        }
        if cpus > RHEA_CPUS_MAX {
            return Err(ConfigError::TooManyCpus {
                requested: cpus,
                max: RHEA_CPUS_MAX,
            });
        }

        let mut owner: BTreeMap<u32, usize> = BTreeMap::new();
        for (node, cfg) in self.numa.nodes.iter().enumerate() {
            for &cpu in &cfg.cpus {
                if cpu >= cpus {
                    return Err(ConfigError::CpuOutOfRange { node, cpu, cpus });
                }
                if let Some(&first) = owner.get(&cpu) {
                    if first != node {
                        return Err(ConfigError::CpuInMultipleNodes {
                            cpu,
                            first,
                            second: node,
                        });
                    }
                } else {
                    let _ = owner.insert(cpu, node);
                }
            }
        }

        let ram_size = self.memory.ram_size;
        if ram_size == 0 {
            return Err(ConfigError::ZeroRamSize);
        }
        if ram_size > MAX_RAM_SIZE {
            return Err(ConfigError::RamTooLarge {
                size: ram_size,
                max: MAX_RAM_SIZE,
            });
        }
        Ok(())
    }
}

/// Symmetric multiprocessing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SmpConfig {
    /// Number of harts on the board.
    #[serde(default = "SmpConfig::default_cpus")]
    pub cpus: u32,
}

impl SmpConfig {
    fn default_cpus() -> u32 {
        defaults::CPUS
    }
}

impl Default for SmpConfig {
    fn default() -> Self {
        Self {
            cpus: defaults::CPUS,
        }
    }
}

/// NUMA layout; each node becomes one socket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NumaConfig {
    /// Nodes in node-ID order.
    #[serde(default)]
    pub nodes: Vec<NumaNodeConfig>,
}

/// A single NUMA node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NumaNodeConfig {
    /// CPU indices explicitly placed on this node.
    #[serde(default)]
    pub cpus: Vec<u32>,
}

/// Main memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryConfig {
    /// DRAM size in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: u64,
}

impl MemoryConfig {
    fn default_ram_size() -> u64 {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: defaults::RAM_SIZE,
        }
    }
}
