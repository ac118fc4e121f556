//! Engine facade
//!
//! This module provides the primary interface for interacting with the
//! relationship graph engine. It orchestrates the write path (consistency
//! management) and the read path (discovery, generations, hierarchy,
//! layout).

pub mod service;

pub use service::FamilyGraphService;
