#![forbid(unsafe_code)]

//! Virtualized-list support: windowing and placeholder reconciliation.
//!
//! A lazy list maps a logical item sequence of unknown, possibly huge length
//! onto a small materialized subsequence flanked by placeholder counts. Three
//! pieces cooperate:
//!
//! - [`WindowSizer`] watches which positions are actually displayed and
//!   computes the next materialization window with hysteresis, so many cheap
//!   scroll signals collapse into at most one recomputation per pass.
//! - [`PagingSource`] (via [`LazyController`]) supplies the rows for a
//!   window.
//! - [`LazyItems`] reconciles the resulting structural changes and
//!   placeholder-count updates into minimal notifications for a rendering
//!   surface, keeping the surface-visible item count stable while slots
//!   toggle between placeholder and real.

pub mod items;
pub mod paging;
pub mod window;

pub use items::{ItemsNotification, LazyItems};
pub use paging::{LazyController, Loaded, PagingSource};
pub use window::{DEFAULT_MARGIN, WindowSizer};
