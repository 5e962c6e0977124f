//! Test fixtures for the store test suites
//!
//! Provides reusable builders so tests only spell out the fields they care
//! about.

use pawhaven_store::error::StoreResult;
use pawhaven_store::models::{NewPet, Pet, RegisterUser};
use pawhaven_store::repositories::PetStore;

/// Builder for pet creation payloads with sensible defaults
#[derive(Debug, Clone)]
pub struct PetFixture {
    new_pet: NewPet,
}

impl PetFixture {
    /// Start a fixture for a pet with the given name
    pub fn new(name: &str) -> Self {
        Self {
            new_pet: NewPet {
                species: "dog".to_string(),
                gender: "male".to_string(),
                age: 3,
                name: name.to_string(),
                breed: "lab".to_string(),
                size: "large".to_string(),
                color: "brown".to_string(),
                description: "friendly".to_string(),
                profile_pic: format!("http://pics.test/{}.png", name.to_lowercase()),
            },
        }
    }

    pub fn species(mut self, species: &str) -> Self {
        self.new_pet.species = species.to_string();
        self
    }

    pub fn gender(mut self, gender: &str) -> Self {
        self.new_pet.gender = gender.to_string();
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.new_pet.age = age;
        self
    }

    pub fn breed(mut self, breed: &str) -> Self {
        self.new_pet.breed = breed.to_string();
        self
    }

    pub fn size(mut self, size: &str) -> Self {
        self.new_pet.size = size.to_string();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.new_pet.color = color.to_string();
        self
    }

    pub fn build(self) -> NewPet {
        self.new_pet
    }
}

/// Registration payload for a test user
pub fn register_user(username: &str, password: &str) -> RegisterUser {
    RegisterUser {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Create every fixture through the store, returning the stored records
pub async fn seed_pets<S: PetStore>(store: &S, fixtures: Vec<NewPet>) -> StoreResult<Vec<Pet>> {
    let mut created = Vec::with_capacity(fixtures.len());
    for fixture in &fixtures {
        created.push(store.create(fixture).await?);
    }
    Ok(created)
}
