//! Database models for the PawHaven store
//!
//! Plain records mapped 1:1 onto the `pets` and `users` tables, plus the
//! payload types the repositories accept for creation and mutation.

pub mod pet;
pub mod user;

pub use pet::{NewPet, Pet, PetFilter};
pub use user::{ChangePasswordRequest, RegisterUser, User};
