//! Host backing storage for memory regions.
//!
//! On Unix the storage is an anonymous `mmap`, so a 570 MiB DRAM region costs
//! nothing until the guest touches it. Other platforms fall back to a zeroed
//! heap allocation. Allocation failures are reported to the caller rather than
//! panicking, so the machine entry point decides how to terminate.

use std::io;
use std::slice;

/// Zero-initialized, fixed-size byte storage backing a ROM or RAM region.
pub struct RegionBuffer {
    ptr: *mut u8,
    size: usize,
}

// SAFETY: the buffer exclusively owns its allocation; access goes through
// `&self`/`&mut self`, so the usual borrow rules serialize it.
unsafe impl Send for RegionBuffer {}
// SAFETY: see `Send`; shared references only permit reads.
unsafe impl Sync for RegionBuffer {}

impl RegionBuffer {
    /// Allocates `size` zeroed bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero, does not fit in `usize`, or the
    /// host refuses the allocation.
    pub fn new(size: u64) -> io::Result<Self> {
        let size = usize::try_from(size).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "region size exceeds host address space",
            )
        })?;
        if size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "region size must be non-zero",
            ));
        }
        Self::allocate(size)
    }

    #[cfg(unix)]
    fn allocate(size: usize) -> io::Result<Self> {
        // SAFETY: anonymous private mapping with no address hint; the kernel
        // validates `size` and returns MAP_FAILED on error.
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(io::Error::last_os_error());
        }
        Ok(Self {
            ptr: ptr.cast::<u8>(),
            size,
        })
    }

    #[cfg(not(unix))]
    fn allocate(size: usize) -> io::Result<Self> {
        let mut vec: Vec<u8> = Vec::new();
        vec.try_reserve_exact(size)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        vec.resize(size, 0);
        let mut vec = std::mem::ManuallyDrop::new(vec.into_boxed_slice());
        Ok(Self {
            ptr: vec.as_mut_ptr(),
            size,
        })
    }

    /// Returns the size of the buffer in bytes.
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Always `false`: empty buffers cannot be constructed.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the contents as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `size` initialized bytes for the
        // lifetime of `self`.
        unsafe { slice::from_raw_parts(self.ptr, self.size) }
    }

    /// Returns the contents as a mutable byte slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.size) }
    }
}

impl Drop for RegionBuffer {
    fn drop(&mut self) {
        #[cfg(unix)]
        // SAFETY: `ptr`/`size` are exactly what `mmap` returned.
        unsafe {
            let _ = libc::munmap(self.ptr.cast::<libc::c_void>(), self.size);
        }
        #[cfg(not(unix))]
        // SAFETY: reconstructs the boxed slice leaked in `allocate`.
        unsafe {
            drop(Box::from_raw(slice::from_raw_parts_mut(self.ptr, self.size)));
        }
    }
}

impl std::fmt::Debug for RegionBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionBuffer")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
