//! Store contract tests against the in-memory fakes
//!
//! Exercises the repository contract (filtering, sorting, write-then-reload
//! semantics, the error taxonomy) without a database. The same behavior is
//! repeated against PostgreSQL in `pg_repository_test.rs` when a database
//! is reachable.

use assert_matches::assert_matches;

use pawhaven_store::password::verify_password;
use pawhaven_store::{
    ChangePasswordRequest, PetFilter, PetStore, StoreError, User, UserStore,
};
use pawhaven_test_utils::{register_user, seed_pets, MemoryPetStore, MemoryUserStore, PetFixture};

fn filter(min_age: i32, max_age: i32, species: &str, gender: &str, size: &str) -> PetFilter {
    PetFilter {
        min_age,
        max_age,
        species: species.to_string(),
        gender: gender.to_string(),
        size: size.to_string(),
    }
}

// ========== Pet listing and filtering ==========

#[tokio::test]
async fn test_list_filters_by_inclusive_age_range() {
    let store = MemoryPetStore::new();
    seed_pets(
        &store,
        vec![
            PetFixture::new("Young").age(2).build(),
            PetFixture::new("Edge Low").age(3).build(),
            PetFixture::new("Edge High").age(7).build(),
            PetFixture::new("Old").age(8).build(),
        ],
    )
    .await
    .expect("seeding should succeed");

    let pets = store
        .list(&filter(3, 7, "%", "%", "%"))
        .await
        .expect("list should succeed");

    let names: Vec<&str> = pets.iter().map(|pet| pet.name.as_str()).collect();
    assert_eq!(names, vec!["Edge High", "Edge Low"]);
}

#[tokio::test]
async fn test_list_matches_patterns_case_insensitively() {
    let store = MemoryPetStore::new();
    seed_pets(
        &store,
        vec![
            PetFixture::new("Rex").species("Dog").build(),
            PetFixture::new("Whiskers").species("Cat").build(),
        ],
    )
    .await
    .expect("seeding should succeed");

    let exact = store
        .list(&filter(0, 100, "dog", "%", "%"))
        .await
        .expect("list should succeed");
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].name, "Rex");

    // Caller-supplied wildcards give partial matching.
    let partial = store
        .list(&filter(0, 100, "%o%", "%", "%"))
        .await
        .expect("list should succeed");
    assert_eq!(partial.len(), 1);
    assert_eq!(partial[0].name, "Rex");
}

#[tokio::test]
async fn test_list_sorts_by_name_ascending() {
    let store = MemoryPetStore::new();
    seed_pets(
        &store,
        vec![
            PetFixture::new("Ziggy").build(),
            PetFixture::new("Arlo").build(),
            PetFixture::new("Milo").build(),
        ],
    )
    .await
    .expect("seeding should succeed");

    let pets = store
        .list(&PetFilter::default())
        .await
        .expect("list should succeed");

    let names: Vec<&str> = pets.iter().map(|pet| pet.name.as_str()).collect();
    assert_eq!(names, vec!["Arlo", "Milo", "Ziggy"]);
}

#[tokio::test]
async fn test_list_returns_empty_when_nothing_matches() {
    let store = MemoryPetStore::new();
    seed_pets(&store, vec![PetFixture::new("Rex").build()])
        .await
        .expect("seeding should succeed");

    let pets = store
        .list(&filter(0, 100, "ferret", "%", "%"))
        .await
        .expect("list should succeed, not fail, on no results");
    assert!(pets.is_empty());
}

// ========== Single-pet reads ==========

#[tokio::test]
async fn test_get_missing_pet_returns_none() {
    let store = MemoryPetStore::new();
    let pet = store.get(9999).await.expect("get should not error");
    assert!(pet.is_none());
}

// ========== Creation ==========

#[tokio::test]
async fn test_create_assigns_id_and_defaults_to_not_adopted() {
    let store = MemoryPetStore::new();
    let payload = PetFixture::new("Rex").build();

    let created = store.create(&payload).await.expect("create should succeed");
    assert!(created.id > 0);
    assert!(!created.adopted);

    let reloaded = store
        .get(created.id)
        .await
        .expect("get should succeed")
        .expect("created pet should be fetchable by its generated id");

    assert_eq!(reloaded.species, payload.species);
    assert_eq!(reloaded.gender, payload.gender);
    assert_eq!(reloaded.age, payload.age);
    assert_eq!(reloaded.name, payload.name);
    assert_eq!(reloaded.breed, payload.breed);
    assert_eq!(reloaded.size, payload.size);
    assert_eq!(reloaded.color, payload.color);
    assert_eq!(reloaded.description, payload.description);
    assert_eq!(reloaded.profile_pic, payload.profile_pic);
    assert_eq!(reloaded, created);
}

// ========== Listing updates ==========

#[tokio::test]
async fn test_update_listing_overwrites_mutable_fields() {
    let store = MemoryPetStore::new();
    let created = store
        .create(&PetFixture::new("Rex").age(3).color("brown").build())
        .await
        .expect("create should succeed");

    let mut edited = created.clone();
    edited.age = 4;
    edited.color = "black".to_string();
    edited.description = "still friendly".to_string();

    let updated = store
        .update_listing(&edited)
        .await
        .expect("update should succeed");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.age, 4);
    assert_eq!(updated.color, "black");
    assert_eq!(updated.description, "still friendly");
}

#[tokio::test]
async fn test_update_listing_preserves_adopted_flag() {
    let store = MemoryPetStore::new();
    let created = store
        .create(&PetFixture::new("Rex").build())
        .await
        .expect("create should succeed");
    store
        .mark_adopted(created.id)
        .await
        .expect("mark_adopted should succeed");

    // A listing edit that claims adopted=false must not un-adopt.
    let mut edited = created.clone();
    edited.adopted = false;
    let updated = store
        .update_listing(&edited)
        .await
        .expect("update should succeed");

    assert!(updated.adopted);
}

#[tokio::test]
async fn test_update_listing_zero_rows_for_missing_id() {
    let store = MemoryPetStore::new();
    let mut phantom = store
        .create(&PetFixture::new("Rex").build())
        .await
        .expect("create should succeed");
    phantom.id = 9999;

    let err = store
        .update_listing(&phantom)
        .await
        .expect_err("updating a missing id should fail");
    assert_matches!(
        err,
        StoreError::ZeroRowsAffected {
            entity: "pets",
            id: 9999
        }
    );
    assert!(!err.is_retryable());
}

// ========== Adoption status ==========

#[tokio::test]
async fn test_mark_adopted_is_idempotent() {
    let store = MemoryPetStore::new();
    let created = store
        .create(&PetFixture::new("Rex").build())
        .await
        .expect("create should succeed");

    let first = store
        .mark_adopted(created.id)
        .await
        .expect("first adoption should succeed");
    assert!(first.adopted);

    let second = store
        .mark_adopted(created.id)
        .await
        .expect("second adoption of the same pet should not fail");
    assert!(second.adopted);
}

#[tokio::test]
async fn test_mark_adopted_zero_rows_for_missing_id() {
    let store = MemoryPetStore::new();
    let err = store
        .mark_adopted(9999)
        .await
        .expect_err("adopting a missing id should fail");
    assert_matches!(err, StoreError::ZeroRowsAffected { entity: "pets", .. });
}

// ========== Random selection ==========

#[tokio::test]
async fn test_random_available_excludes_adopted_and_caps_at_six() {
    let store = MemoryPetStore::new();
    let created = seed_pets(
        &store,
        (0..10)
            .map(|i| PetFixture::new(&format!("Pet {}", i)).build())
            .collect(),
    )
    .await
    .expect("seeding should succeed");

    for pet in created.iter().take(2) {
        store
            .mark_adopted(pet.id)
            .await
            .expect("mark_adopted should succeed");
    }

    let random = store
        .random_available()
        .await
        .expect("random selection should succeed");

    assert_eq!(random.len(), 6);
    assert!(random.iter().all(|pet| !pet.adopted));

    let mut ids: Vec<i32> = random.iter().map(|pet| pet.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6, "random selection must not repeat pets");
}

#[tokio::test]
async fn test_random_available_returns_fewer_when_pool_is_small() {
    let store = MemoryPetStore::new();
    let created = seed_pets(
        &store,
        vec![
            PetFixture::new("Rex").build(),
            PetFixture::new("Milo").build(),
            PetFixture::new("Luna").build(),
        ],
    )
    .await
    .expect("seeding should succeed");

    store
        .mark_adopted(created[0].id)
        .await
        .expect("mark_adopted should succeed");

    let random = store
        .random_available()
        .await
        .expect("random selection should succeed");
    assert_eq!(random.len(), 2);
}

// ========== Concrete scenario from the product backlog ==========

#[tokio::test]
async fn test_new_dog_listing_shows_up_in_matching_searches_only() {
    let store = MemoryPetStore::new();
    let created = store
        .create(&PetFixture::new("Rex").build())
        .await
        .expect("create should succeed");
    assert!(!created.adopted);

    let hits = store
        .list(&filter(0, 10, "dog", "male", "large"))
        .await
        .expect("list should succeed");
    assert!(hits.iter().any(|pet| pet.name == "Rex"));

    // Rex is 3; a 4..=10 range excludes him.
    let misses = store
        .list(&filter(4, 10, "dog", "male", "large"))
        .await
        .expect("list should succeed");
    assert!(misses.iter().all(|pet| pet.name != "Rex"));
}

// ========== Users ==========

#[tokio::test]
async fn test_create_user_then_lookup_by_username() {
    let store = MemoryUserStore::new();
    let created = store
        .create(&register_user("alice", "correct-horse"))
        .await
        .expect("registration should succeed");

    assert!(created.id > 0);
    assert_ne!(
        created.password_hash, "correct-horse",
        "credential must be stored hashed"
    );

    let found = store
        .get_by_username("alice")
        .await
        .expect("lookup should succeed")
        .expect("alice should exist");
    assert_eq!(found.id, created.id);

    let by_id = store
        .get(created.id)
        .await
        .expect("lookup should succeed")
        .expect("alice should exist by id");
    assert_eq!(by_id.username, "alice");
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let store = MemoryUserStore::new();
    store
        .create(&register_user("alice", "first-password"))
        .await
        .expect("first registration should succeed");

    let err = store
        .create(&register_user("alice", "second-password"))
        .await
        .expect_err("second registration should collide");
    assert_matches!(err, StoreError::DuplicateUsername(username) if username == "alice");
}

#[tokio::test]
async fn test_username_lookup_is_exact_match() {
    let store = MemoryUserStore::new();
    store
        .create(&register_user("Alice", "pw"))
        .await
        .expect("registration should succeed");

    let found = store
        .get_by_username("alice")
        .await
        .expect("lookup should succeed");
    assert!(found.is_none(), "username lookup is case-sensitive");
}

#[tokio::test]
async fn test_get_missing_user_returns_none() {
    let store = MemoryUserStore::new();
    assert!(store
        .get(4242)
        .await
        .expect("get should not error")
        .is_none());
    assert!(store
        .get_by_username("nobody")
        .await
        .expect("lookup should not error")
        .is_none());
}

#[tokio::test]
async fn test_list_users_sorted_by_username() {
    let store = MemoryUserStore::new();
    for username in ["carol", "alice", "bob"] {
        store
            .create(&register_user(username, "pw"))
            .await
            .expect("registration should succeed");
    }

    let users = store.list().await.expect("list should succeed");
    let names: Vec<&str> = users.iter().map(|user| user.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn test_update_password_rejects_wrong_current_password() {
    let store = MemoryUserStore::new();
    let user = store
        .create(&register_user("alice", "old-password"))
        .await
        .expect("registration should succeed");

    let err = store
        .update_password(
            &user,
            &ChangePasswordRequest {
                current_password: "not-the-old-password".to_string(),
                new_password: "new-password".to_string(),
            },
        )
        .await
        .expect_err("wrong current password should be rejected");
    assert_matches!(err, StoreError::Credential(_));
}

#[tokio::test]
async fn test_update_password_roundtrip() {
    let store = MemoryUserStore::new();
    let user = store
        .create(&register_user("alice", "old-password"))
        .await
        .expect("registration should succeed");

    let updated = store
        .update_password(
            &user,
            &ChangePasswordRequest {
                current_password: "old-password".to_string(),
                new_password: "new-password".to_string(),
            },
        )
        .await
        .expect("password change should succeed");

    assert!(verify_password("new-password", &updated.password_hash)
        .expect("verify should succeed"));
    assert!(!verify_password("old-password", &updated.password_hash)
        .expect("verify should succeed"));
}

#[tokio::test]
async fn test_update_password_zero_rows_for_stale_user() {
    let store = MemoryUserStore::new();
    let mut stale = store
        .create(&register_user("alice", "old-password"))
        .await
        .expect("registration should succeed");
    stale.id = 9999;

    let err = store
        .update_password(
            &stale,
            &ChangePasswordRequest {
                current_password: "old-password".to_string(),
                new_password: "new-password".to_string(),
            },
        )
        .await
        .expect_err("stale user reference should fail");
    assert_matches!(
        err,
        StoreError::ZeroRowsAffected {
            entity: "users",
            id: 9999
        }
    );
}

// The User type flows through the fakes unchanged; make sure a serialized
// record can never leak the credential.
#[test]
fn test_serialized_user_has_no_credential_field() {
    let user = User {
        id: 1,
        username: "alice".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".to_string(),
    };
    let json = serde_json::to_string(&user).expect("user should serialize");
    assert!(!json.contains("password_hash"));
    assert!(!json.contains("argon2id"));
}
