//! Rhea machine construction and the top-level `RheaMachine` type.
//!
//! This module builds the complete board from a resolved machine state. It performs:
//! 1. **Topology validation:** Checks the socket count and resolves every socket's harts.
//! 2. **Hart arrays:** Realizes one array per socket and registers it as child `soc<i>`.
//! 3. **Memory map:** Maps DRAM, boot ROM (with the reset stub) and SRAM, and reserves the UART window.
//!
//! All three phases run once, in that order, and any failure aborts construction
//! before a machine is returned. Terminating the process is left to the caller.

use std::fmt;

use crate::common::addr::PhysAddr;
use crate::common::constants::RHEA_CPUS_MAX;
use crate::common::error::{ConfigError, MachineError, RegionError};
use crate::config::{CpuType, MachineConfig};
use crate::sim::loader;
use crate::soc::hart_array::{Hart, HartArray, HartArrayConfig};
use crate::soc::interconnect::AddressSpace;
use crate::soc::memmap::RheaRegion;
use crate::soc::memory::MemoryRegion;
use crate::soc::topology::{CpuTopology, SocketLayout, Topology, validate_topology};
use crate::soc::traits::Device;

/// Static description of a machine type, as registered with the machine framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineDescriptor {
    /// Machine type name.
    pub name: &'static str,
    /// Human-readable description.
    pub desc: &'static str,
    /// Maximum number of harts.
    pub max_cpus: u32,
    /// CPU model used when none is configured.
    pub default_cpu_type: CpuType,
    /// Whether memory can be split across NUMA nodes.
    pub numa_mem_supported: bool,
    /// Whether a CPU cluster may not span NUMA nodes.
    pub cpu_cluster_has_numa_boundary: bool,
    /// Name of the main RAM region.
    pub default_ram_id: &'static str,
    /// Main RAM size when none is configured.
    pub default_ram_size: u64,
}

/// The Rhea machine type.
pub const RHEA_MACHINE: MachineDescriptor = MachineDescriptor {
    name: "rhea",
    desc: "RISC-V Rhea Machine",
    max_cpus: RHEA_CPUS_MAX,
    default_cpu_type: CpuType::Rv64,
    numa_mem_supported: true,
    cpu_cluster_has_numa_boundary: true,
    default_ram_id: RheaRegion::Dram.region_name(),
    default_ram_size: RheaRegion::Dram.entry().size,
};

/// Fully resolved input to [`RheaMachine::init`].
pub struct MachineState {
    /// CPU model for every hart.
    pub cpu_type: CpuType,
    /// Socket/hart topology.
    pub topology: Box<dyn Topology>,
    /// Pre-allocated main RAM, mapped at the DRAM base.
    pub ram: MemoryRegion,
}

impl MachineState {
    /// Validates `config`, builds its topology and allocates main RAM.
    ///
    /// # Errors
    ///
    /// [`MachineError::Config`] if the configuration is invalid or the host
    /// cannot provide main RAM of the configured size.
    pub fn from_config(config: &MachineConfig) -> Result<Self, MachineError> {
        config.validate()?;
        let ram = MemoryRegion::new_ram(RHEA_MACHINE.default_ram_id, config.memory.ram_size)
            .map_err(|err| match err {
                RegionError::Alloc { size, source, .. } => {
                    MachineError::Config(ConfigError::RamUnavailable { size, source })
                }
                other => MachineError::Region(other),
            })?;
        Ok(Self {
            cpu_type: config.cpu_type,
            topology: Box::new(CpuTopology::from_config(config)),
            ram,
        })
    }
}

impl fmt::Debug for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineState")
            .field("cpu_type", &self.cpu_type)
            .field("sockets", &self.topology.socket_count())
            .field("ram", &self.ram)
            .finish_non_exhaustive()
    }
}

/// A constructed Rhea board: its hart arrays and its physical address space.
#[derive(Debug)]
pub struct RheaMachine {
    cpu_type: CpuType,
    children: Vec<(String, HartArray)>,
    address_space: AddressSpace,
}

impl RheaMachine {
    /// Builds the board described by `state`.
    ///
    /// # Errors
    ///
    /// * [`MachineError::Topology`] if the topology is not buildable; nothing
    ///   has been realized or mapped at that point.
    /// * [`MachineError::Realize`] if a hart array fails to realize.
    /// * [`MachineError::Region`] if a memory region cannot be allocated or mapped.
    pub fn init(state: MachineState) -> Result<Self, MachineError> {
        let MachineState {
            cpu_type,
            topology,
            ram,
        } = state;

        let sockets = validate_topology(topology.as_ref())?;
        let children = build_hart_arrays(cpu_type, &sockets)?;

        let mut address_space = AddressSpace::new();
        install_memory_map(&mut address_space, ram)?;

        Ok(Self {
            cpu_type,
            children,
            address_space,
        })
    }

    /// CPU model of every hart on the board.
    pub const fn cpu_type(&self) -> CpuType {
        self.cpu_type
    }

    /// Registered hart arrays with their child names, in socket order.
    pub fn hart_arrays(&self) -> impl Iterator<Item = (&str, &HartArray)> {
        self.children.iter().map(|(name, array)| (name.as_str(), array))
    }

    /// Returns the hart array registered as `name` (e.g. `"soc0"`).
    pub fn child(&self, name: &str) -> Option<&HartArray> {
        self.children
            .iter()
            .find_map(|(n, array)| (n == name).then_some(array))
    }

    /// Returns the hart with ID `hart_id`, from whichever array holds it.
    pub fn hart(&self, hart_id: u32) -> Option<&Hart> {
        self.children
            .iter()
            .find_map(|(_, array)| array.hart(hart_id))
    }

    /// The physical address space.
    pub const fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    /// Mutable access to the address space, for attaching external device models.
    pub const fn address_space_mut(&mut self) -> &mut AddressSpace {
        &mut self.address_space
    }

    /// Returns the instruction word hart `hart_id` fetches first after reset.
    pub fn reset_fetch(&mut self, hart_id: u32) -> Option<u32> {
        let pc = self.hart(hart_id)?.pc;
        Some(self.address_space.read_u32(pc.val()))
    }
}

/// Realizes one hart array per validated socket, in socket order.
///
/// Every array resets to the boot ROM base.
///
/// # Errors
///
/// [`MachineError::Realize`] naming the first array that fails to realize.
pub fn build_hart_arrays(
    cpu_type: CpuType,
    sockets: &[SocketLayout],
) -> Result<Vec<(String, HartArray)>, MachineError> {
    let reset_vector = RheaRegion::Rom.entry().base_addr();
    sockets
        .iter()
        .map(|socket| {
            let name = socket.child_name();
            let config = HartArrayConfig {
                cpu_type,
                hart_id_base: socket.hart_id_base,
                num_harts: socket.num_harts,
                reset_vector,
            };
            match HartArray::realize(config) {
                Ok(array) => {
                    tracing::info!(
                        child = %name,
                        %cpu_type,
                        hart_id_base = socket.hart_id_base,
                        num_harts = socket.num_harts,
                        reset_vector = %reset_vector,
                        "realized hart array"
                    );
                    Ok((name, array))
                }
                Err(source) => Err(MachineError::Realize { name, source }),
            }
        })
        .collect()
}

/// Populates `address_space` with the board's memory regions.
///
/// Reserves the UART0 window, maps `ram` at the DRAM base, allocates and maps
/// the boot ROM, installs the reset stub at its base, then allocates and maps
/// SRAM.
///
/// # Errors
///
/// [`MachineError::Region`] if a region cannot be allocated, overlaps an
/// existing mapping, or the reset stub cannot be installed.
pub fn install_memory_map(
    address_space: &mut AddressSpace,
    ram: MemoryRegion,
) -> Result<(), MachineError> {
    let uart = RheaRegion::Uart0;
    address_space.reserve(uart.region_name(), uart.entry())?;

    map_region(address_space, RheaRegion::Dram, ram)?;

    let rom = RheaRegion::Rom.entry();
    map_region(
        address_space,
        RheaRegion::Rom,
        MemoryRegion::new_rom(RheaRegion::Rom.region_name(), rom.size)?,
    )?;
    loader::install_reset_stub(address_space, rom.base_addr())?;

    let sram = RheaRegion::Sram.entry();
    map_region(
        address_space,
        RheaRegion::Sram,
        MemoryRegion::new_ram(RheaRegion::Sram.region_name(), sram.size)?,
    )?;
    Ok(())
}

fn map_region(
    address_space: &mut AddressSpace,
    region: RheaRegion,
    memory: MemoryRegion,
) -> Result<(), MachineError> {
    let base: PhysAddr = region.entry().base_addr();
    let (name, size) = (memory.name().to_owned(), memory.size());
    address_space.add_subregion(base, Box::new(memory))?;
    tracing::info!(region = %name, base = %base, size, "mapped region");
    Ok(())
}
