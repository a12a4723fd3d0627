//! Host-facing board persistence API.
//!
//! Wraps `yarnboard_core` in response envelopes that a UI host can serialize
//! straight to JSON.

pub mod api;

pub use api::{
    core_version, host_log, init_logging, load_board, save_board, LoadBoardResponse,
    SaveBoardResponse,
};
