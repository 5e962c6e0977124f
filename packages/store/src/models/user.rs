//! User account models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User account from the `users` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Storage-assigned identifier
    #[sqlx(rename = "user_id")]
    pub id: i32,

    /// Unique username
    pub username: String,

    /// Argon2id hash of the password, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Registration payload for user creation
///
/// The plaintext password is hashed inside the repository before insertion
/// and never stored or logged as given.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
}

/// Password-change payload
///
/// `current_password` is verified against the existing record's stored hash
/// before the credential is overwritten.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_user_never_contains_credential() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        };

        let value = serde_json::to_value(&user).expect("user should serialize");
        assert_eq!(value["id"], 7);
        assert_eq!(value["username"], "alice");
        assert!(value.get("password_hash").is_none());
    }
}
