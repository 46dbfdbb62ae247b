//! Hart arrays: the per-socket groups of harts.
//!
//! A hart array is configured with a plain [`HartArrayConfig`] and turned into
//! an immutable [`HartArray`] by [`HartArray::realize`]. Realization is the only
//! point where the configuration is checked; once realized, an array cannot be
//! changed.

use crate::common::addr::PhysAddr;
use crate::common::constants::RESET_VECTOR_ALIGN;
use crate::common::error::RealizeError;
use crate::config::CpuType;

/// Construction parameters of a hart array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HartArrayConfig {
    /// CPU model of every hart in the array.
    pub cpu_type: CpuType,
    /// Hart ID of the first hart.
    pub hart_id_base: u32,
    /// Number of harts.
    pub num_harts: u32,
    /// Address every hart starts fetching from after reset.
    pub reset_vector: PhysAddr,
}

/// Reset state of a single hart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hart {
    /// Hart ID (`mhartid`).
    pub hart_id: u32,
    /// Program counter after reset.
    pub pc: PhysAddr,
    /// Register width in bits.
    pub xlen: u32,
}

/// A realized, immutable array of harts sharing one CPU model and reset vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HartArray {
    config: HartArrayConfig,
    harts: Vec<Hart>,
}

impl HartArray {
    /// Validates `config` and creates the harts it describes.
    ///
    /// # Errors
    ///
    /// * [`RealizeError::NoHarts`] if `num_harts` is zero.
    /// * [`RealizeError::HartIdOverflow`] if the last hart ID does not fit in a `u32`.
    /// * [`RealizeError::MisalignedResetVector`] if the reset vector is odd.
    pub fn realize(config: HartArrayConfig) -> Result<Self, RealizeError> {
        if config.num_harts == 0 {
            return Err(RealizeError::NoHarts);
        }
        if config.hart_id_base.checked_add(config.num_harts - 1).is_none() {
            return Err(RealizeError::HartIdOverflow {
                base: config.hart_id_base,
                count: config.num_harts,
            });
        }
        if !config.reset_vector.is_aligned(RESET_VECTOR_ALIGN) {
            return Err(RealizeError::MisalignedResetVector(config.reset_vector));
        }

        let harts = (0..config.num_harts)
            .map(|i| Hart {
                hart_id: config.hart_id_base + i,
                pc: config.reset_vector,
                xlen: config.cpu_type.xlen(),
            })
            .collect();
        Ok(Self { config, harts })
    }

    /// Returns the configuration the array was realized with.
    pub const fn config(&self) -> &HartArrayConfig {
        &self.config
    }

    /// CPU model of the array.
    pub const fn cpu_type(&self) -> CpuType {
        self.config.cpu_type
    }

    /// Hart ID of the first hart.
    pub const fn hart_id_base(&self) -> u32 {
        self.config.hart_id_base
    }

    /// Number of harts.
    pub const fn num_harts(&self) -> u32 {
        self.config.num_harts
    }

    /// Shared reset vector.
    pub const fn reset_vector(&self) -> PhysAddr {
        self.config.reset_vector
    }

    /// The harts, in hart ID order.
    pub fn harts(&self) -> &[Hart] {
        &self.harts
    }

    /// Returns the hart with ID `hart_id`, if it belongs to this array.
    pub fn hart(&self, hart_id: u32) -> Option<&Hart> {
        let idx = hart_id.checked_sub(self.config.hart_id_base)?;
        self.harts.get(idx as usize)
    }
}
