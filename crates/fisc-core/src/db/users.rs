//! User account operations

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rusqlite::params;
use tracing::{debug, info};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::User;

/// Minimum username length
const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length
const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password into an Argon2 PHC string
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Auth(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash
fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

impl Database {
    /// Register a new user account
    ///
    /// Usernames must be at least 3 characters, passwords at least 6.
    /// Returns the new user's id, or `Error::Conflict` for duplicate names.
    pub fn register_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<i64> {
        let username = username.trim();
        if username.len() < MIN_USERNAME_LEN {
            return Err(Error::InvalidData(format!(
                "Username must be at least {} characters long",
                MIN_USERNAME_LEN
            )));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(Error::InvalidData(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = hash_password(password)?;

        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO users (username, password_hash, email) VALUES (?, ?, ?)",
            params![username, password_hash, email],
        );

        match result {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                info!(username, id, "Registered user");
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::Conflict(format!("Username '{}' is taken", username)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Authenticate a user by username and password
    ///
    /// Returns None on unknown username or wrong password; callers get the
    /// same answer either way. Updates `last_login` on success.
    pub fn login_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        let user = match self.find_user(username)? {
            Some(user) => user,
            None => {
                debug!(username, "Login failed: unknown user");
                return Ok(None);
            }
        };

        if !verify_password(password, &user.password_hash) {
            debug!(username, "Login failed: bad password");
            return Ok(None);
        }

        let conn = self.conn()?;
        conn.execute(
            "UPDATE users SET last_login = CURRENT_TIMESTAMP WHERE id = ?",
            params![user.id],
        )?;

        self.get_user(user.id)
    }

    /// Look up a user by id
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT id, username, password_hash, email, created_at, last_login
             FROM users WHERE id = ?",
            params![id],
            row_to_user,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a user by username
    pub fn find_user(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT id, username, password_hash, email, created_at, last_login
             FROM users WHERE username = ?",
            params![username.trim()],
            row_to_user,
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all users (ordered by username)
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, password_hash, email, created_at, last_login
             FROM users ORDER BY username",
        )?;
        let rows = stmt.query_map([], row_to_user)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        email: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        last_login: row
            .get::<_, Option<String>>(5)?
            .map(|s| parse_datetime(&s)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_login() {
        let db = Database::in_memory().unwrap();

        let id = db.register_user("alice", "hunter22", None).unwrap();
        assert!(id > 0);

        let user = db.login_user("alice", "hunter22").unwrap().unwrap();
        assert_eq!(user.id, id);
        assert!(user.last_login.is_some());

        assert!(db.login_user("alice", "wrong-password").unwrap().is_none());
        assert!(db.login_user("nobody", "hunter22").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let db = Database::in_memory().unwrap();

        db.register_user("bob", "secret99", Some("bob@example.com"))
            .unwrap();
        let err = db.register_user("bob", "other-pass", None).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_validation_rules() {
        let db = Database::in_memory().unwrap();

        assert!(matches!(
            db.register_user("ab", "secret99", None),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            db.register_user("carol", "short", None),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_password_hash_not_plaintext() {
        let db = Database::in_memory().unwrap();
        db.register_user("dave", "secret99", None).unwrap();

        let user = db.find_user("dave").unwrap().unwrap();
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(!user.password_hash.contains("secret99"));
    }
}
