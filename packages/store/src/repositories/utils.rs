//! Shared constants for repositories
//!
//! The SELECT column lists are shared between the read and write paths of
//! each entity so the two cannot drift apart.

/// SQL columns for pet queries
pub const PET_COLUMNS: &str = "pet_id, species, gender, age, name, breed, pet_size, color, description, profile_pic, is_adopted";

/// SQL columns for user queries
pub const USER_COLUMNS: &str = "user_id, username, password_hash";

/// Maximum number of pets returned by the random front-page selection
pub const RANDOM_PET_LIMIT: i64 = 6;
