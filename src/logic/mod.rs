//! Business Logic
//!
//! This module contains pure functions that can be unit tested without a host:
//! - breadcrumb: Breadcrumb path derivation and divergence
//! - debounce: Last-call-wins deadline timers
//! - file: File classification, listings, folder notes (FileInfoProvider)
//! - ignore: Glob patterns hiding vault paths
//! - layout: Geometry, cascade positioning, scroll-into-view, popover placement
//! - navigation: Selectable-item stepping with wraparound
//! - path: Vault path helpers
//! - search: Type-ahead matching
//! - sorting: Natural, case-insensitive name ordering

pub mod breadcrumb;
pub mod debounce;
pub mod file;
pub mod ignore;
pub mod layout;
pub mod navigation;
pub mod path;
pub mod search;
pub mod sorting;
