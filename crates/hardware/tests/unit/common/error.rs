//! # Error Tests
//!
//! Tests for error messages and the severity the entry point acts on.

use rhea_core::common::{
    ConfigError, MachineError, PhysAddr, RealizeError, RegionError, Severity, TopologyError,
};
use rstest::rstest;

#[rstest]
#[case(TopologyError::NoSockets, "number of sockets/nodes should be at least 1")]
#[case(TopologyError::TooManySockets { count: 2, max: 1 }, "number of sockets/nodes should be less than 1")]
#[case(TopologyError::DiscontiguousHartIds { socket: 0 }, "discontinuous hartids in socket0")]
#[case(TopologyError::MissingHartIdBase { socket: 0 }, "can't find hartid base for socket0")]
#[case(TopologyError::MissingHartCount { socket: 3 }, "can't find hart count for socket3")]
fn test_topology_error_messages(#[case] err: TopologyError, #[case] prefix: &str) {
    assert!(err.to_string().starts_with(prefix), "{err}");
}

#[test]
fn test_topology_and_config_errors_are_configuration() {
    let topo = MachineError::from(TopologyError::DiscontiguousHartIds { socket: 0 });
    assert_eq!(topo.severity(), Severity::Configuration);
    assert_eq!(topo.to_string(), "discontinuous hartids in socket0");

    let cfg = MachineError::from(ConfigError::TooManyCpus { requested: 8, max: 4 });
    assert_eq!(cfg.severity(), Severity::Configuration);

    let ram = MachineError::from(ConfigError::RamTooLarge { size: u64::MAX, max: 1 });
    assert_eq!(ram.severity(), Severity::Configuration);
    assert_eq!(ram.to_string(), "ram size 0xffffffffffffffff exceeds the maximum of 0x1");
}

#[test]
fn test_realize_and_region_errors_are_internal() {
    let realize = MachineError::Realize {
        name: "soc0".to_owned(),
        source: RealizeError::MisalignedResetVector(PhysAddr(1)),
    };
    assert_eq!(realize.severity(), Severity::Internal);
    assert_eq!(
        realize.to_string(),
        "failed to realize hart array 'soc0': reset vector 0x00000001 is not 16-bit aligned"
    );

    let region = MachineError::from(RegionError::ZeroSized {
        name: "riscv.rhea.sram".to_owned(),
    });
    assert_eq!(region.severity(), Severity::Internal);
}

#[test]
fn test_realize_error_exposes_source() {
    use std::error::Error;

    let err = MachineError::Realize {
        name: "soc0".to_owned(),
        source: RealizeError::NoHarts,
    };
    let source = err.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("hart array must contain at least one hart"));
}
