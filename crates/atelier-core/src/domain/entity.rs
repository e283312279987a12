//! Domain Layer - Core Entity Trait
//!
//! Every record held by a store is identified by the id the remote
//! service assigned to it.

/// Core trait for all records kept in a store list
pub trait Entity: Clone {
    /// Returns the client-facing identifier
    fn id(&self) -> &str;
}
