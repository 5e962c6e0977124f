//! Database repository layer for PawHaven
//!
//! This module centralizes all database operations into reusable
//! repositories behind storage traits. This pattern:
//! - Keeps SQL queries in a single location per entity
//! - Makes the backend swappable (the test suite runs the same contract
//!   against in-memory fakes)
//! - Guarantees every failure leaves the layer as a typed [`StoreError`]
//!
//! [`StoreError`]: crate::error::StoreError

pub mod pet;
pub mod user;
pub mod utils;

pub use pet::{PetRepository, PetStore};
pub use user::{UserRepository, UserStore};
