//! Data-access layer for the PawHaven pet-adoption platform
//!
//! This crate translates pet and user CRUD intents into parameterized SQL
//! against PostgreSQL and back into plain records. It exposes the storage
//! capability as traits ([`PetStore`], [`UserStore`]) with one pool-backed
//! implementation each, so callers (the HTTP layer, tests) can swap the
//! backend without touching query code.
//!
//! Each statement is a single round-trip (writes re-fetch the row
//! afterwards so storage-side defaults are reflected); the layer holds no
//! shared mutable state, performs no retries, and translates each failure
//! into a distinct [`StoreError`] variant callers can pattern-match.

pub mod error;
pub mod models;
pub mod password;
pub mod repositories;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use models::{ChangePasswordRequest, NewPet, Pet, PetFilter, RegisterUser, User};
pub use repositories::{PetRepository, PetStore, UserRepository, UserStore};
