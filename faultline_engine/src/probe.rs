//! Fault probes.
//!
//! Detect the three classic failure conditions and raise them as faults
//! instead of crashing the host:
//!
//! - unbounded growth of a collection → `OutOfMemory` (fatal)
//! - opening a file that does not exist → `FileNotFound` (checked)
//! - reading one past the end of a sequence → `IndexOutOfRange` (unchecked)

use std::path::{Path, PathBuf};

use faultline_common::consts::{
    DEFAULT_MEMORY_BUDGET_BYTES, FILE_NOT_FOUND, INDEX_OUT_OF_RANGE, OUT_OF_MEMORY,
};
use faultline_common::kind::{FaultKind, RaisedFault};
use faultline_common::registry::{FaultRegistry, RegistryError};
use tracing::debug;

/// Simulated heap ceiling for [`Probe::grow_until_exhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBudget {
    /// Bytes the loop may hold before the heap counts as exhausted.
    pub limit_bytes: usize,
    /// Bytes reserved per iteration. Zero is treated as one.
    pub chunk_bytes: usize,
}

impl Default for MemoryBudget {
    fn default() -> Self {
        Self {
            limit_bytes: DEFAULT_MEMORY_BUDGET_BYTES,
            chunk_bytes: 1024 * 1024,
        }
    }
}

/// Detectors bound to the standard kinds of a registry.
#[derive(Debug, Clone)]
pub struct Probe {
    out_of_memory: FaultKind,
    file_not_found: FaultKind,
    index_out_of_range: FaultKind,
}

impl Probe {
    /// Bind to `registry`, which must contain the three standard kinds.
    pub fn new(registry: &FaultRegistry) -> Result<Self, RegistryError> {
        Ok(Self {
            out_of_memory: registry.lookup(OUT_OF_MEMORY)?.clone(),
            file_not_found: registry.lookup(FILE_NOT_FOUND)?.clone(),
            index_out_of_range: registry.lookup(INDEX_OUT_OF_RANGE)?.clone(),
        })
    }

    /// Keep growing a collection until the budget or the allocator gives out.
    ///
    /// The loop has no exit condition of its own, so it always ends in an
    /// `OutOfMemory` fault. Memory is released before returning.
    pub fn grow_until_exhausted(&self, budget: &MemoryBudget) -> RaisedFault {
        let chunk = budget.chunk_bytes.max(1);
        let mut blocks: Vec<Vec<u8>> = Vec::new();
        let mut held: usize = 0;

        loop {
            if held.saturating_add(chunk) > budget.limit_bytes {
                debug!("memory budget reached after {} blocks", blocks.len());
                return RaisedFault::new(
                    self.out_of_memory.clone(),
                    format!(
                        "heap exhausted: {held} bytes held, budget {} bytes",
                        budget.limit_bytes
                    ),
                );
            }

            let mut block = Vec::new();
            if let Err(e) = block.try_reserve_exact(chunk) {
                return RaisedFault::new(
                    self.out_of_memory.clone(),
                    format!("heap exhausted: reserving {chunk} bytes failed after {held} bytes ({e})"),
                );
            }
            blocks.push(block);
            held += chunk;
        }
    }

    /// Existence check for a file the caller needs.
    pub fn require_file(&self, path: &Path) -> Result<PathBuf, RaisedFault> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(path.to_path_buf()),
            Ok(_) => Err(RaisedFault::new(
                self.file_not_found.clone(),
                format!("{} is not a regular file", path.display()),
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(RaisedFault::new(
                self.file_not_found.clone(),
                format!("file not found: {}", path.display()),
            )),
            Err(e) => Err(RaisedFault::new(
                self.file_not_found.clone(),
                format!("cannot access {}: {e}", path.display()),
            )),
        }
    }

    /// Bounds-checked element access.
    pub fn element_at<'a, T>(&self, items: &'a [T], index: usize) -> Result<&'a T, RaisedFault> {
        items.get(index).ok_or_else(|| {
            RaisedFault::new(
                self.index_out_of_range.clone(),
                format!("index {index} out of range for length {}", items.len()),
            )
        })
    }
}
