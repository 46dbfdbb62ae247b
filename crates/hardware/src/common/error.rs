//! Machine construction errors.
//!
//! This module defines every way building a Rhea machine can fail. It provides:
//! 1. **Configuration errors:** Bad user input (CPU count, NUMA layout, topology limits).
//! 2. **Internal errors:** Hart-array realization and memory region setup failures.
//! 3. **Severity:** A classification the entry point uses to exit cleanly or abort.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::addr::PhysAddr;

/// How the machine entry point must react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// User-facing misconfiguration: report it and exit with a non-zero status.
    Configuration,
    /// Unrecoverable construction failure: report it and abort.
    Internal,
}

/// Errors raised while loading or validating a [`MachineConfig`](crate::config::MachineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config file '{}': {source}", .path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid JSON for this machine.
    #[error("invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The CPU model name is not one this board knows.
    #[error("unknown cpu type '{0}'")]
    UnknownCpuType(String),

    /// No harts were requested.
    #[error("at least one cpu is required")]
    NoCpus,

    /// More harts were requested than the board supports.
    #[error("invalid number of cpus {requested}, maximum supported is {max}")]
    TooManyCpus {
        /// Requested hart count.
        requested: u32,
        /// Board limit.
        max: u32,
    },

    /// A NUMA node names a cpu index outside `0..cpus`.
    #[error("numa node {node} lists cpu {cpu}, but only {cpus} cpus are configured")]
    CpuOutOfRange {
        /// Offending NUMA node.
        node: usize,
        /// Offending cpu index.
        cpu: u32,
        /// Configured cpu count.
        cpus: u32,
    },

    /// A cpu index is assigned to more than one NUMA node.
    #[error("cpu {cpu} is assigned to both numa node {first} and node {second}")]
    CpuInMultipleNodes {
        /// Offending cpu index.
        cpu: u32,
        /// Node that claimed it first.
        first: usize,
        /// Node that claimed it again.
        second: usize,
    },

    /// The DRAM size is zero.
    #[error("ram size must be non-zero")]
    ZeroRamSize,

    /// The DRAM size does not fit above the DRAM base or in the host address space.
    #[error("ram size {size:#x} exceeds the maximum of {max:#x}")]
    RamTooLarge {
        /// Requested size in bytes.
        size: u64,
        /// Largest accepted size in bytes.
        max: u64,
    },

    /// The host could not provide the requested DRAM.
    #[error("cannot set up {size} bytes of ram: {source}")]
    RamUnavailable {
        /// Requested size in bytes.
        size: u64,
        /// Host error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised by the topology validator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The topology has no sockets, so the board would have no harts.
    #[error("number of sockets/nodes should be at least 1")]
    NoSockets,

    /// More sockets were configured than the board has.
    #[error("number of sockets/nodes should be less than {max} (got {count})")]
    TooManySockets {
        /// Configured socket count.
        count: usize,
        /// Board limit.
        max: usize,
    },

    /// The hart IDs of a socket have a gap.
    #[error("discontinuous hartids in socket{socket}")]
    DiscontiguousHartIds {
        /// Offending socket index.
        socket: usize,
    },

    /// The first hart ID of a socket could not be resolved.
    #[error("can't find hartid base for socket{socket}")]
    MissingHartIdBase {
        /// Offending socket index.
        socket: usize,
    },

    /// The hart count of a socket could not be resolved.
    #[error("can't find hart count for socket{socket}")]
    MissingHartCount {
        /// Offending socket index.
        socket: usize,
    },
}

/// Errors raised when a hart array is realized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RealizeError {
    /// The array was configured with zero harts.
    #[error("hart array must contain at least one hart")]
    NoHarts,

    /// `hart_id_base + num_harts` does not fit in a hart ID.
    #[error("hart ids {base}..{base}+{count} overflow the hart id space")]
    HartIdOverflow {
        /// Configured base hart ID.
        base: u32,
        /// Configured hart count.
        count: u32,
    },

    /// The reset vector is not a legal instruction address.
    #[error("reset vector {0} is not 16-bit aligned")]
    MisalignedResetVector(PhysAddr),
}

/// Errors raised while allocating or mapping memory regions.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Host memory for a region could not be allocated.
    #[error("failed to allocate {size} bytes for region '{name}': {source}")]
    Alloc {
        /// Region name.
        name: String,
        /// Requested size in bytes.
        size: u64,
        /// Host error.
        #[source]
        source: io::Error,
    },

    /// A region was created with size zero.
    #[error("region '{name}' has zero size")]
    ZeroSized {
        /// Region name.
        name: String,
    },

    /// A region does not fit in the 64-bit physical address space at its base.
    #[error("region '{name}' at {base} with size {size:#x} wraps the address space")]
    AddressOverflow {
        /// Region name.
        name: String,
        /// Requested base.
        base: PhysAddr,
        /// Region size.
        size: u64,
    },

    /// A region overlaps one that is already mapped or reserved.
    #[error("region '{name}' at {base} (size {size:#x}) overlaps '{existing}'")]
    Overlap {
        /// Region being inserted.
        name: String,
        /// Requested base.
        base: PhysAddr,
        /// Region size.
        size: u64,
        /// Name of the region or reservation in the way.
        existing: String,
    },

    /// A device tried to claim a reservation that does not exist or does not match.
    #[error("no reservation matches device '{name}' at {base} (size {size:#x})")]
    NoReservation {
        /// Device name.
        name: String,
        /// Device base.
        base: PhysAddr,
        /// Device size.
        size: u64,
    },

    /// A blob does not land entirely inside one memory-backed region.
    #[error("blob '{name}' ({len} bytes at {addr}) is not inside a memory region")]
    BlobOutOfRange {
        /// Blob name.
        name: String,
        /// Target address.
        addr: PhysAddr,
        /// Blob length.
        len: usize,
    },
}

/// Top-level error returned by machine construction.
#[derive(Debug, Error)]
pub enum MachineError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid socket/hart topology.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// A hart array failed to realize.
    #[error("failed to realize hart array '{name}': {source}")]
    Realize {
        /// Child name of the array (`soc<i>`).
        name: String,
        /// Realization failure.
        #[source]
        source: RealizeError,
    },

    /// A memory region could not be set up.
    #[error(transparent)]
    Region(#[from] RegionError),
}

impl MachineError {
    /// Classifies the error for the entry point.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Config(_) | Self::Topology(_) => Severity::Configuration,
            Self::Realize { .. } | Self::Region(_) => Severity::Internal,
        }
    }
}
