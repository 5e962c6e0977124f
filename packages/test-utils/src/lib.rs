//! Shared test utilities for the PawHaven workspace
//!
//! This crate provides in-memory implementations of the store traits for
//! testing without a database, plus fixtures for building test data.
//!
//! # Fakes
//!
//! - [`MemoryPetStore`] - In-memory [`PetStore`] with ILIKE-faithful
//!   filtering and random selection
//! - [`MemoryUserStore`] - In-memory [`UserStore`] with duplicate-username
//!   rejection and real credential hashing
//!
//! The fakes reproduce the repository contract (sorting, zero-rows
//! failures, one-way adoption) but not storage-level column constraints;
//! integrity-failure paths are covered by the Postgres-backed tests.
//!
//! [`PetStore`]: pawhaven_store::PetStore
//! [`UserStore`]: pawhaven_store::UserStore

mod fixtures;
mod memory;
mod pattern;

pub use fixtures::{register_user, seed_pets, PetFixture};
pub use memory::{MemoryPetStore, MemoryUserStore};
pub use pattern::ilike_matches;
