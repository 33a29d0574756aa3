//! Use-case services over the shared store.
//!
//! # Responsibility
//! - Keep start-up schema repair and contact form writes in one place.
//! - Stay storage-agnostic: every service takes `&dyn KeyValueStore`.

pub mod contact_service;
pub mod schema_guard;
