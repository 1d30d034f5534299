pub mod live_capture_op;
pub mod merge_op;
pub mod op_helper;
pub mod snapshot_op;
