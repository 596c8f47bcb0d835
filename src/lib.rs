//! Cascading module → model → variant selection with MTE scoring and an
//! offline asset cache.
//!
//! `mte-core` keeps three dependent autocomplete fields, their filtered
//! suggestions and a deduplicated chip collection consistent as the user
//! types, selects and removes entries; asks a remote service for the MTE of
//! the collected variants; and serves a fixed manifest of shell assets from a
//! versioned local cache. Stale network responses are discarded by per-field
//! request tokens rather than applied out of order.

pub mod cache;
pub mod cascade;
pub mod chips;
pub mod config;
pub mod page;
pub mod score;
pub mod service;
pub mod suggest;
pub mod types;
