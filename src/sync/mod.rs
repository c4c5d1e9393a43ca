//! # Sync Module
//!
//! Join primitives and deadline-bounded waits over them.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use workflow_client_common::sync::{await_wait_group, WaitGroup};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let wg = WaitGroup::new();
//! let member = wg.member();
//! tokio::spawn(async move {
//!     tokio::time::sleep(Duration::from_millis(10)).await;
//!     drop(member);
//! });
//!
//! assert!(await_wait_group(&wg, Duration::from_secs(1)).await);
//! # }
//! ```

pub mod bounded_wait;
pub mod wait_group;

pub use bounded_wait::{
    await_join, await_wait_group, await_wait_group_blocking, BoundedWait, JoinTarget,
};
pub use wait_group::{WaitGroup, WaitGroupMember};
