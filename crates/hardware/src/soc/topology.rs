//! Socket/hart topology and its validation.
//!
//! This module answers which harts belong to which socket and checks that the
//! answer is something the board can be built from. It provides:
//! 1. **Topology trait:** The query interface the machine builder consumes.
//! 2. **CpuTopology:** The concrete topology derived from SMP and NUMA configuration.
//! 3. **Validator:** `validate_topology`, which resolves every socket to a base hart ID and count.
//!
//! A socket is a NUMA node. Without NUMA nodes the board has a single socket
//! holding harts `0..cpus`. With NUMA nodes each cpu index belongs to the node
//! that lists it; unlisted cpus are spread across nodes in contiguous blocks.

use std::collections::BTreeSet;

use crate::common::constants::RHEA_SOCKETS_MAX;
use crate::common::error::TopologyError;
use crate::config::MachineConfig;

/// Query interface over a socket/hart topology.
pub trait Topology {
    /// Number of sockets.
    fn socket_count(&self) -> usize;
    /// Returns `true` if the hart IDs of `socket` form one gap-free range.
    fn check_hart_ids_contiguous(&self, socket: usize) -> bool;
    /// Lowest hart ID of `socket`, or `None` if it cannot be resolved.
    fn first_hart_id(&self, socket: usize) -> Option<u32>;
    /// Number of harts in `socket`, or `None` if it cannot be resolved.
    fn hart_count(&self, socket: usize) -> Option<u32>;
}

/// A socket that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocketLayout {
    /// Socket index (0-based).
    pub index: usize,
    /// First hart ID of the socket.
    pub hart_id_base: u32,
    /// Number of harts in the socket.
    pub num_harts: u32,
}

impl SocketLayout {
    /// Name under which this socket's hart array is registered (`soc<i>`).
    pub fn child_name(&self) -> String {
        format!("soc{}", self.index)
    }
}

/// One entry of the possible-CPU list: a cpu index with its hart ID and NUMA node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuSlot {
    /// Architectural ID (the hart ID; equal to the cpu index on this board).
    pub arch_id: u32,
    /// NUMA node (socket) the cpu belongs to.
    pub node_id: usize,
}

/// Concrete topology: the set of hart IDs in each socket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuTopology {
    sockets: Vec<BTreeSet<u32>>,
}

impl CpuTopology {
    /// Builds the topology described by a validated configuration.
    ///
    /// Assumes [`MachineConfig::validate`] has passed: every listed cpu is in
    /// range and listed at most once.
    pub fn from_config(config: &MachineConfig) -> Self {
        let cpus = config.smp.cpus;
        let nodes = &config.numa.nodes;
        if nodes.is_empty() {
            return Self {
                sockets: vec![(0..cpus).collect()],
            };
        }

        let mut sockets = vec![BTreeSet::new(); nodes.len()];
        for cpu in 0..cpus {
            let node = nodes
                .iter()
                .position(|n| n.cpus.contains(&cpu))
                .unwrap_or_else(|| default_node(cpu, cpus, nodes.len()));
            let _ = sockets[node].insert(cpu);
        }
        tracing::debug!(?sockets, "resolved numa topology");
        Self { sockets }
    }

    /// Builds a topology from explicit per-socket hart ID sets.
    pub fn from_sockets<I, S>(sockets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = u32>,
    {
        Self {
            sockets: sockets
                .into_iter()
                .map(|s| s.into_iter().collect())
                .collect(),
        }
    }

    /// Socket (NUMA node) that cpu index `cpu` belongs to.
    pub fn node_of(&self, cpu: u32) -> Option<usize> {
        self.sockets.iter().position(|s| s.contains(&cpu))
    }

    /// Every cpu on the board in hart ID order, with its node.
    pub fn possible_cpus(&self) -> Vec<CpuSlot> {
        let mut slots: Vec<CpuSlot> = self
            .sockets
            .iter()
            .enumerate()
            .flat_map(|(node_id, harts)| {
                harts.iter().map(move |&arch_id| CpuSlot { arch_id, node_id })
            })
            .collect();
        slots.sort_by_key(|s| s.arch_id);
        slots
    }

    fn socket(&self, socket: usize) -> Option<&BTreeSet<u32>> {
        self.sockets.get(socket).filter(|s| !s.is_empty())
    }
}

/// Node of a cpu that no NUMA node lists: cpus are split into `nodes` contiguous blocks.
fn default_node(cpu: u32, cpus: u32, nodes: usize) -> usize {
    (u64::from(cpu) * nodes as u64 / u64::from(cpus)) as usize
}

impl Topology for CpuTopology {
    fn socket_count(&self) -> usize {
        self.sockets.len()
    }

    fn check_hart_ids_contiguous(&self, socket: usize) -> bool {
        self.socket(socket).is_some_and(|harts| {
            match (harts.first(), harts.last()) {
                (Some(&first), Some(&last)) => u64::from(last - first) + 1 == harts.len() as u64,
                _ => false,
            }
        })
    }

    fn first_hart_id(&self, socket: usize) -> Option<u32> {
        self.socket(socket)?.first().copied()
    }

    fn hart_count(&self, socket: usize) -> Option<u32> {
        self.socket(socket).map(|harts| harts.len() as u32)
    }
}

/// Checks `topology` against the board limits and resolves every socket.
///
/// Sockets are checked in index order and the first failure is returned.
/// Nothing is allocated or built here.
///
/// # Errors
///
/// [`TopologyError::NoSockets`] if there are no sockets,
/// [`TopologyError::TooManySockets`] if there are more than
/// [`RHEA_SOCKETS_MAX`] sockets, otherwise the per-socket error of the first
/// socket that has discontiguous hart IDs or an unresolvable base or count.
pub fn validate_topology(topology: &dyn Topology) -> Result<Vec<SocketLayout>, TopologyError> {
    let count = topology.socket_count();
    if count == 0 {
        return Err(TopologyError::NoSockets);
    }
    if count > RHEA_SOCKETS_MAX {
        return Err(TopologyError::TooManySockets {
            count,
            max: RHEA_SOCKETS_MAX,
        });
    }

    (0..count)
        .map(|index| {
            if !topology.check_hart_ids_contiguous(index) {
                return Err(TopologyError::DiscontiguousHartIds { socket: index });
            }
            let hart_id_base = topology
                .first_hart_id(index)
                .ok_or(TopologyError::MissingHartIdBase { socket: index })?;
            let num_harts = topology
                .hart_count(index)
                .ok_or(TopologyError::MissingHartCount { socket: index })?;
            tracing::debug!(socket = index, hart_id_base, num_harts, "socket validated");
            Ok(SocketLayout {
                index,
                hart_id_base,
                num_harts,
            })
        })
        .collect()
}
