// src/watch/mod.rs

//! Change feed.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) on the sync
//!   root.
//! - Filtering out git's own writes and user-excluded globs.
//! - Turning the remaining changes into `SyncEvent::FileChanged`.
//!
//! It knows nothing about debouncing or chains; every change it reports is
//! only a candidate trigger.

pub mod event_handler;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use event_handler::{is_change_kind, process_event};
pub use patterns::{ChangeFilter, GIT_DIR};
pub use watcher::{spawn_watcher, WatcherHandle};
