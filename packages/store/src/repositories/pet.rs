//! Pet repository
//!
//! All pet-related database operations in a single location, following the
//! repository pattern. Queries are parameterized; the three text filters of
//! the list query are ILIKE patterns passed through as the caller supplied
//! them, so `%` wildcards give partial matching and a plain string gives an
//! exact case-insensitive match.

use async_trait::async_trait;
use sqlx::PgPool;

use super::utils::{PET_COLUMNS, RANDOM_PET_LIMIT};
use crate::error::{is_constraint_violation, StoreError, StoreResult};
use crate::models::{NewPet, Pet, PetFilter};

/// End-user message for constraint violations on pet writes
const PET_INTEGRITY_HINT: &str = "please verify that pet info is valid";

/// Storage capability for adoptable pets
#[async_trait]
pub trait PetStore: Send + Sync {
    /// List pets whose age falls within the filter's inclusive range and
    /// whose species, gender, and size match the filter patterns,
    /// case-insensitively. Sorted by name ascending; empty when nothing
    /// matches.
    async fn list(&self, filter: &PetFilter) -> StoreResult<Vec<Pet>>;

    /// Fetch a single pet by id. Absence is `Ok(None)`, never an error.
    async fn get(&self, pet_id: i32) -> StoreResult<Option<Pet>>;

    /// Insert a new pet. Storage assigns the identifier and the adopted
    /// flag defaults to false; the returned record is re-fetched by the
    /// generated id so storage-side defaults are reflected.
    async fn create(&self, new_pet: &NewPet) -> StoreResult<Pet>;

    /// Overwrite every mutable attribute of the row identified by
    /// `pet.id`, leaving the adopted flag untouched. A missing id is a
    /// [`StoreError::ZeroRowsAffected`].
    async fn update_listing(&self, pet: &Pet) -> StoreResult<Pet>;

    /// Set the adopted flag to true unconditionally. Idempotent; a missing
    /// id is a [`StoreError::ZeroRowsAffected`].
    async fn mark_adopted(&self, pet_id: i32) -> StoreResult<Pet>;

    /// Up to [`RANDOM_PET_LIMIT`] pets drawn uniformly at random from the
    /// not-yet-adopted pool; fewer when the pool is smaller.
    async fn random_available(&self) -> StoreResult<Vec<Pet>>;
}

/// Repository for pet database operations
#[derive(Clone)]
pub struct PetRepository {
    pool: PgPool,
}

impl PetRepository {
    /// Create a new PetRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Re-fetch a row after a write so storage-side defaults are reflected.
    /// The row vanishing between the write and the re-read reads as a stale
    /// reference.
    async fn reload(&self, pet_id: i32) -> StoreResult<Pet> {
        self.get(pet_id).await?.ok_or(StoreError::ZeroRowsAffected {
            entity: "pets",
            id: pet_id,
        })
    }
}

#[async_trait]
impl PetStore for PetRepository {
    async fn list(&self, filter: &PetFilter) -> StoreResult<Vec<Pet>> {
        let sql = format!(
            "SELECT {} FROM pets \
             WHERE (age BETWEEN $1 AND $2) \
               AND species ILIKE $3 AND gender ILIKE $4 AND pet_size ILIKE $5 \
             ORDER BY name ASC",
            PET_COLUMNS
        );
        sqlx::query_as::<_, Pet>(&sql)
            .bind(filter.min_age)
            .bind(filter.max_age)
            .bind(&filter.species)
            .bind(&filter.gender)
            .bind(&filter.size)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn get(&self, pet_id: i32) -> StoreResult<Option<Pet>> {
        let sql = format!("SELECT {} FROM pets WHERE pet_id = $1", PET_COLUMNS);
        sqlx::query_as::<_, Pet>(&sql)
            .bind(pet_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn create(&self, new_pet: &NewPet) -> StoreResult<Pet> {
        let pet_id: i32 = sqlx::query_scalar(
            "INSERT INTO pets (species, gender, age, name, breed, pet_size, color, description, profile_pic) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING pet_id",
        )
        .bind(&new_pet.species)
        .bind(&new_pet.gender)
        .bind(new_pet.age)
        .bind(&new_pet.name)
        .bind(&new_pet.breed)
        .bind(&new_pet.size)
        .bind(&new_pet.color)
        .bind(&new_pet.description)
        .bind(&new_pet.profile_pic)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if is_constraint_violation(db.as_ref()) => {
                StoreError::Integrity {
                    message: PET_INTEGRITY_HINT.to_string(),
                    source: e,
                }
            }
            _ => StoreError::from_sqlx(e),
        })?;

        tracing::info!(pet_id, name = %new_pet.name, "pet listing created");

        self.reload(pet_id).await
    }

    async fn update_listing(&self, pet: &Pet) -> StoreResult<Pet> {
        let result = sqlx::query(
            "UPDATE pets \
             SET species = $1, gender = $2, age = $3, name = $4, breed = $5, \
                 pet_size = $6, color = $7, description = $8, profile_pic = $9 \
             WHERE pet_id = $10",
        )
        .bind(&pet.species)
        .bind(&pet.gender)
        .bind(pet.age)
        .bind(&pet.name)
        .bind(&pet.breed)
        .bind(&pet.size)
        .bind(&pet.color)
        .bind(&pet.description)
        .bind(&pet.profile_pic)
        .bind(pet.id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ZeroRowsAffected {
                entity: "pets",
                id: pet.id,
            });
        }

        self.reload(pet.id).await
    }

    async fn mark_adopted(&self, pet_id: i32) -> StoreResult<Pet> {
        let result = sqlx::query("UPDATE pets SET is_adopted = true WHERE pet_id = $1")
            .bind(pet_id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ZeroRowsAffected {
                entity: "pets",
                id: pet_id,
            });
        }

        tracing::info!(pet_id, "pet marked adopted");

        self.reload(pet_id).await
    }

    async fn random_available(&self) -> StoreResult<Vec<Pet>> {
        let sql = format!(
            "SELECT {} FROM pets WHERE is_adopted = false ORDER BY RANDOM() LIMIT $1",
            PET_COLUMNS
        );
        sqlx::query_as::<_, Pet>(&sql)
            .bind(RANDOM_PET_LIMIT)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from_sqlx)
    }
}
