//! Pet models
//!
//! `Pet` mirrors one row of the `pets` table. The identifier is assigned by
//! storage at insertion and immutable afterwards; the adopted flag only
//! ever transitions false→true, through the status-update operation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One adoptable animal from the `pets` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Pet {
    /// Storage-assigned identifier
    #[sqlx(rename = "pet_id")]
    pub id: i32,

    pub species: String,

    pub gender: String,

    /// Age in years, non-negative by storage constraint
    pub age: i32,

    pub name: String,

    pub breed: String,

    /// Size class, one of the storage-enforced enumerated sizes
    #[sqlx(rename = "pet_size")]
    pub size: String,

    pub color: String,

    /// Free-text description shown on the listing
    pub description: String,

    /// URL or path of the profile picture
    #[sqlx(rename = "profile_pic")]
    pub profile_pic: String,

    /// Whether the pet has been adopted
    #[sqlx(rename = "is_adopted")]
    pub adopted: bool,
}

/// Creation payload: every mutable attribute except the identifier and the
/// adopted flag (new pets always start not-adopted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPet {
    pub species: String,
    pub gender: String,
    pub age: i32,
    pub name: String,
    pub breed: String,
    pub size: String,
    pub color: String,
    pub description: String,
    pub profile_pic: String,
}

/// Filter for pet list queries
///
/// The age bounds are inclusive. The three text filters are ILIKE patterns:
/// caller-supplied `%`/`_` wildcards pass through for partial matching, a
/// plain string behaves as an exact case-insensitive match. Defaults match
/// every pet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetFilter {
    #[serde(default)]
    pub min_age: i32,

    #[serde(default = "default_max_age")]
    pub max_age: i32,

    #[serde(default = "match_any")]
    pub species: String,

    #[serde(default = "match_any")]
    pub gender: String,

    #[serde(default = "match_any")]
    pub size: String,
}

fn default_max_age() -> i32 {
    100
}

fn match_any() -> String {
    "%".to_string()
}

impl Default for PetFilter {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: default_max_age(),
            species: match_any(),
            gender: match_any(),
            size: match_any(),
        }
    }
}
