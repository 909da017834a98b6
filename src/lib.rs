// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Viewport-triggered CSS animation activation for storefront pages.
//!
//! Elements carrying a marker attribute are prepared once (delay, duration
//! and animation class applied), watched until they first scroll into
//! view, then given an activation class that starts a style-sheet defined
//! animation. Content inserted later is picked up by a debounced rescan,
//! and a minimum-width gate turns the whole thing off on narrow viewports.
//!
//! # Key entry points
//!
//! - [`coordinator::Coordinator`] - the page-lifetime state machine
//! - [`host::Host`] - the DOM seam, with [`host::memory::MemoryDocument`]
//!   as an in-memory implementation
//! - [`options::Options`] - attribute names, timings and threshold source
//! - `web` (feature `web`) - the browser adapter built on `web-sys`
//!
//! # Architecture
//!
//! Host notifications become named [`coordinator::Event`]s; timers become
//! [`coordinator::Coordinator::tick`] calls. Nothing in the core touches a
//! clock or a callback, so every transition can be driven from a test.

pub mod coordinator;
pub mod debounce;
pub mod element;
pub mod error;
pub mod gate;
pub mod host;
pub mod observer;
pub mod options;
pub mod scanner;
pub mod watcher;
#[cfg(feature = "web")]
pub mod web;

pub use coordinator::{Coordinator, Event, Status};
pub use error::RevealError;
pub use options::Options;
