//! # Topology Tests
//!
//! Tests for NUMA resolution and for the topology validator, against both the
//! concrete `CpuTopology` and mocked topologies.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rhea_core::common::TopologyError;
use rhea_core::soc::topology::{CpuSlot, CpuTopology, SocketLayout, Topology, validate_topology};
use rstest::rstest;

use crate::common::harness::{config_with_cpus, config_with_numa};
use crate::common::mocks::topology::{MockSockets, single_socket, untouched_sockets};

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn test_smp_only_is_one_contiguous_socket(#[case] cpus: u32) {
    let topo = CpuTopology::from_config(&config_with_cpus(cpus));
    assert_eq!(
        validate_topology(&topo),
        Ok(vec![SocketLayout {
            index: 0,
            hart_id_base: 0,
            num_harts: cpus
        }])
    );
}

#[test]
fn test_single_numa_node_takes_every_cpu() {
    let topo = CpuTopology::from_config(&config_with_numa(3, &[&[]]));
    assert_eq!(topo.socket_count(), 1);
    assert_eq!(topo.hart_count(0), Some(3));
}

#[test]
fn test_possible_cpus_are_in_hart_order() {
    let topo = CpuTopology::from_config(&config_with_numa(4, &[&[2, 3], &[0, 1]]));
    assert_eq!(
        topo.possible_cpus(),
        vec![
            CpuSlot { arch_id: 0, node_id: 1 },
            CpuSlot { arch_id: 1, node_id: 1 },
            CpuSlot { arch_id: 2, node_id: 0 },
            CpuSlot { arch_id: 3, node_id: 0 },
        ]
    );
    assert_eq!(topo.node_of(5), None);
}

#[test]
fn test_two_nodes_exceed_socket_limit() {
    let topo = CpuTopology::from_config(&config_with_numa(2, &[&[0], &[1]]));
    assert_eq!(
        validate_topology(&topo),
        Err(TopologyError::TooManySockets { count: 2, max: 1 })
    );
}

#[test]
fn test_socket_limit_is_checked_before_any_socket() {
    assert_eq!(
        validate_topology(&untouched_sockets(2)),
        Err(TopologyError::TooManySockets { count: 2, max: 1 })
    );
}

#[test]
fn test_gap_in_hart_ids_is_rejected() {
    let topo = CpuTopology::from_sockets([vec![0, 1, 3]]);
    assert_eq!(
        validate_topology(&topo),
        Err(TopologyError::DiscontiguousHartIds { socket: 0 })
    );
}

#[test]
fn test_nonzero_base_is_resolved() {
    let topo = CpuTopology::from_sockets([vec![2, 3]]);
    assert_eq!(
        validate_topology(&topo),
        Ok(vec![SocketLayout {
            index: 0,
            hart_id_base: 2,
            num_harts: 2
        }])
    );
}

#[test]
fn test_no_sockets_is_rejected() {
    let topo = CpuTopology::from_sockets(Vec::<Vec<u32>>::new());
    assert_eq!(validate_topology(&topo), Err(TopologyError::NoSockets));
    assert_eq!(
        validate_topology(&untouched_sockets(0)),
        Err(TopologyError::NoSockets)
    );
}

#[test]
fn test_missing_base_reported() {
    let mut topo = MockSockets::new();
    topo.expect_socket_count().return_const(1usize);
    topo.expect_check_hart_ids_contiguous().return_const(true);
    topo.expect_first_hart_id().return_const(None);
    topo.expect_hart_count().never();
    assert_eq!(
        validate_topology(&topo),
        Err(TopologyError::MissingHartIdBase { socket: 0 })
    );
}

#[test]
fn test_missing_count_reported() {
    let mut topo = MockSockets::new();
    topo.expect_socket_count().return_const(1usize);
    topo.expect_check_hart_ids_contiguous().return_const(true);
    topo.expect_first_hart_id().return_const(Some(0));
    topo.expect_hart_count().return_const(None);
    assert_eq!(
        validate_topology(&topo),
        Err(TopologyError::MissingHartCount { socket: 0 })
    );
}

#[test]
fn test_contiguity_is_checked_before_resolution() {
    let mut topo = MockSockets::new();
    topo.expect_socket_count().return_const(1usize);
    topo.expect_check_hart_ids_contiguous()
        .withf(|&s| s == 0)
        .times(1)
        .return_const(false);
    topo.expect_first_hart_id().never();
    topo.expect_hart_count().never();
    assert_eq!(
        validate_topology(&topo),
        Err(TopologyError::DiscontiguousHartIds { socket: 0 })
    );
}

#[test]
fn test_mocked_single_socket() {
    assert_eq!(
        validate_topology(&single_socket(0, 4)),
        Ok(vec![SocketLayout {
            index: 0,
            hart_id_base: 0,
            num_harts: 4
        }])
    );
}

proptest! {
    #[test]
    fn prop_single_socket_validates_iff_contiguous(
        harts in prop::collection::btree_set(0u32..16, 1..8)
    ) {
        let first = *harts.iter().next().unwrap();
        let last = *harts.iter().next_back().unwrap();
        let contiguous = (last - first) as usize + 1 == harts.len();
        let topo = CpuTopology::from_sockets([harts.iter().copied()]);

        match validate_topology(&topo) {
            Ok(layout) => {
                prop_assert!(contiguous);
                prop_assert_eq!(layout, vec![SocketLayout {
                    index: 0,
                    hart_id_base: first,
                    num_harts: harts.len() as u32,
                }]);
            }
            Err(err) => {
                prop_assert!(!contiguous);
                prop_assert_eq!(err, TopologyError::DiscontiguousHartIds { socket: 0 });
            }
        }
    }

    #[test]
    fn prop_every_cpu_lands_in_exactly_one_node(cpus in 1u32..=4, nodes in 1usize..=4) {
        let empty: Vec<&[u32]> = vec![&[][..]; nodes];
        let topo = CpuTopology::from_config(&config_with_numa(cpus, &empty));
        let slots = topo.possible_cpus();
        prop_assert_eq!(slots.len(), cpus as usize);
        for (i, slot) in slots.iter().enumerate() {
            prop_assert_eq!(slot.arch_id, i as u32);
            prop_assert!(slot.node_id < nodes);
            prop_assert_eq!(topo.node_of(slot.arch_id), Some(slot.node_id));
        }
    }
}
