//! Workspace-wide constants.
//!
//! Single source of truth for standard kind names and process defaults.

/// Fatal: heap exhausted (an unbounded loop growing a collection).
pub const OUT_OF_MEMORY: &str = "OutOfMemory";

/// Checked: a required file is missing.
pub const FILE_NOT_FOUND: &str = "FileNotFound";

/// Unchecked: off-by-one or otherwise invalid index.
pub const INDEX_OUT_OF_RANGE: &str = "IndexOutOfRange";

/// Exit code used when an `Abort` outcome terminates the process.
pub const ABORT_EXIT_CODE: i32 = 1;

/// Service name used when a catalog has no `[shared]` section.
pub const DEFAULT_SERVICE_NAME: &str = "faultline";

/// Default ceiling for the out-of-memory probe (64 MiB).
pub const DEFAULT_MEMORY_BUDGET_BYTES: usize = 64 * 1024 * 1024;
