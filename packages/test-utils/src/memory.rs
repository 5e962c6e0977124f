//! In-memory implementations of the store traits
//!
//! Mutex-guarded vectors with a monotonically assigned id counter. Each
//! method takes and releases the lock synchronously; nothing is held across
//! an await point.

use std::sync::Mutex;

use async_trait::async_trait;

use pawhaven_store::error::{StoreError, StoreResult};
use pawhaven_store::models::{ChangePasswordRequest, NewPet, Pet, PetFilter, RegisterUser, User};
use pawhaven_store::password::{hash_password, verify_password};
use pawhaven_store::repositories::utils::RANDOM_PET_LIMIT;
use pawhaven_store::repositories::{PetStore, UserStore};

use crate::pattern::ilike_matches;

#[derive(Default)]
struct PetState {
    pets: Vec<Pet>,
    next_id: i32,
}

/// In-memory [`PetStore`] for tests
#[derive(Default)]
pub struct MemoryPetStore {
    state: Mutex<PetState>,
}

impl MemoryPetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetStore for MemoryPetStore {
    async fn list(&self, filter: &PetFilter) -> StoreResult<Vec<Pet>> {
        let state = self.state.lock().expect("pet state lock poisoned");
        let mut matches: Vec<Pet> = state
            .pets
            .iter()
            .filter(|pet| {
                pet.age >= filter.min_age
                    && pet.age <= filter.max_age
                    && ilike_matches(&filter.species, &pet.species)
                    && ilike_matches(&filter.gender, &pet.gender)
                    && ilike_matches(&filter.size, &pet.size)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matches)
    }

    async fn get(&self, pet_id: i32) -> StoreResult<Option<Pet>> {
        let state = self.state.lock().expect("pet state lock poisoned");
        Ok(state.pets.iter().find(|pet| pet.id == pet_id).cloned())
    }

    async fn create(&self, new_pet: &NewPet) -> StoreResult<Pet> {
        let mut state = self.state.lock().expect("pet state lock poisoned");
        state.next_id += 1;
        let pet = Pet {
            id: state.next_id,
            species: new_pet.species.clone(),
            gender: new_pet.gender.clone(),
            age: new_pet.age,
            name: new_pet.name.clone(),
            breed: new_pet.breed.clone(),
            size: new_pet.size.clone(),
            color: new_pet.color.clone(),
            description: new_pet.description.clone(),
            profile_pic: new_pet.profile_pic.clone(),
            adopted: false,
        };
        state.pets.push(pet.clone());
        Ok(pet)
    }

    async fn update_listing(&self, pet: &Pet) -> StoreResult<Pet> {
        let mut state = self.state.lock().expect("pet state lock poisoned");
        let existing = state
            .pets
            .iter_mut()
            .find(|candidate| candidate.id == pet.id)
            .ok_or(StoreError::ZeroRowsAffected {
                entity: "pets",
                id: pet.id,
            })?;

        // Every mutable attribute; the adopted flag is owned by
        // mark_adopted and stays as stored.
        existing.species = pet.species.clone();
        existing.gender = pet.gender.clone();
        existing.age = pet.age;
        existing.name = pet.name.clone();
        existing.breed = pet.breed.clone();
        existing.size = pet.size.clone();
        existing.color = pet.color.clone();
        existing.description = pet.description.clone();
        existing.profile_pic = pet.profile_pic.clone();

        Ok(existing.clone())
    }

    async fn mark_adopted(&self, pet_id: i32) -> StoreResult<Pet> {
        let mut state = self.state.lock().expect("pet state lock poisoned");
        let existing = state
            .pets
            .iter_mut()
            .find(|candidate| candidate.id == pet_id)
            .ok_or(StoreError::ZeroRowsAffected {
                entity: "pets",
                id: pet_id,
            })?;

        existing.adopted = true;
        Ok(existing.clone())
    }

    async fn random_available(&self) -> StoreResult<Vec<Pet>> {
        use rand::seq::SliceRandom;

        let state = self.state.lock().expect("pet state lock poisoned");
        let available: Vec<Pet> = state
            .pets
            .iter()
            .filter(|pet| !pet.adopted)
            .cloned()
            .collect();

        let mut rng = rand::thread_rng();
        Ok(available
            .choose_multiple(&mut rng, RANDOM_PET_LIMIT as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct UserState {
    users: Vec<User>,
    next_id: i32,
}

/// In-memory [`UserStore`] for tests
///
/// Uses the store's real Argon2 hashing so password-change flows behave
/// exactly as they do against Postgres.
#[derive(Default)]
pub struct MemoryUserStore {
    state: Mutex<UserState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        let state = self.state.lock().expect("user state lock poisoned");
        let mut users = state.users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn get(&self, user_id: i32) -> StoreResult<Option<User>> {
        let state = self.state.lock().expect("user state lock poisoned");
        Ok(state.users.iter().find(|user| user.id == user_id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().expect("user state lock poisoned");
        Ok(state
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create(&self, registration: &RegisterUser) -> StoreResult<User> {
        let password_hash = hash_password(&registration.password)?;

        let mut state = self.state.lock().expect("user state lock poisoned");
        if state
            .users
            .iter()
            .any(|user| user.username == registration.username)
        {
            return Err(StoreError::DuplicateUsername(registration.username.clone()));
        }

        state.next_id += 1;
        let user = User {
            id: state.next_id,
            username: registration.username.clone(),
            password_hash,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        user: &User,
        change: &ChangePasswordRequest,
    ) -> StoreResult<User> {
        if !verify_password(&change.current_password, &user.password_hash)? {
            return Err(StoreError::Credential(
                "current password does not match".to_string(),
            ));
        }

        let new_hash = hash_password(&change.new_password)?;

        let mut state = self.state.lock().expect("user state lock poisoned");
        let existing = state
            .users
            .iter_mut()
            .find(|candidate| candidate.id == user.id)
            .ok_or(StoreError::ZeroRowsAffected {
                entity: "users",
                id: user.id,
            })?;

        existing.password_hash = new_hash;
        Ok(existing.clone())
    }
}
