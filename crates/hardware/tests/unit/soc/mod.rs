



/// ROM/RAM regions and their host buffers.
pub mod memory;

/// Topology resolution and validation.
pub mod topology;
