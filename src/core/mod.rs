pub mod capture_loop;
pub mod frame;
pub mod frame_source;
pub mod merge;
pub mod recording;
pub mod session_namer;
pub mod snapshot;
pub mod surface;

/// On-disk layout contract. Existing datasets depend on these names, so they
/// are constants rather than configuration.
pub const SESSION_BASE_NAME: &str = "dataset";
pub const SNAPSHOT_DIR_NAME: &str = "snapshots";
pub const MERGED_DIR_NAME: &str = "common_dataset";
pub const FRAME_FILE_PREFIX: &str = "frame";
pub const SNAPSHOT_FILE_PREFIX: &str = "snapshot";
