// 👤 User Repository - profile data and notification address

use rusqlite::{params, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use super::UserRepository;
use crate::db::Database;
use crate::error::{FinanceError, Result, StoreError};
use crate::models::User;

// ============================================================================
// SQLITE
// ============================================================================

#[derive(Clone)]
pub struct SqliteUserRepository {
    db: Database,
}

impl SqliteUserRepository {
    pub fn new(db: Database) -> Self {
        SqliteUserRepository { db }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create_user(&self, name: &str, email: &str) -> std::result::Result<i64, StoreError> {
        let id = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO users (name, email) VALUES (?1, ?2)",
                params![name, email],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        info!(user_id = id, "user created");
        Ok(id)
    }

    fn update_user_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> std::result::Result<(), StoreError> {
        let updated = self.db.with_connection(|conn| {
            Ok(conn.execute(
                "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3",
                params![name, email, user_id],
            )?)
        })?;

        info!(user_id, rows = updated, "user profile updated");
        Ok(())
    }

    fn get_user_email(&self, user_id: i64) -> Result<String> {
        let email: Option<String> = self.db.with_connection(|conn| {
            Ok(conn
                .query_row(
                    "SELECT email FROM users WHERE id = ?1",
                    params![user_id],
                    |row| row.get(0),
                )
                .optional()?)
        })?;

        email.ok_or(FinanceError::NotFound { user_id })
    }
}

// ============================================================================
// IN-MEMORY
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<i64, User>>,
    offline: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn get_user(&self, user_id: i64) -> Option<User> {
        self.lock().ok()?.get(&user_id).cloned()
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, BTreeMap<i64, User>>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        self.users
            .lock()
            .map_err(|_| StoreError::Unavailable("user store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create_user(&self, name: &str, email: &str) -> std::result::Result<i64, StoreError> {
        let mut users = self.lock()?;
        let id = users.keys().next_back().map_or(1, |last| last + 1);

        users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: email.to_string(),
            },
        );

        info!(user_id = id, "user created");
        Ok(id)
    }

    fn update_user_profile(
        &self,
        user_id: i64,
        name: &str,
        email: &str,
    ) -> std::result::Result<(), StoreError> {
        let mut users = self.lock()?;

        if let Some(user) = users.get_mut(&user_id) {
            user.name = name.to_string();
            user.email = email.to_string();
            info!(user_id, "user profile updated");
        }

        Ok(())
    }

    fn get_user_email(&self, user_id: i64) -> Result<String> {
        self.lock()?
            .get(&user_id)
            .map(|user| user.email.clone())
            .ok_or(FinanceError::NotFound { user_id })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn repositories() -> Vec<(&'static str, Box<dyn UserRepository>)> {
        vec![
            (
                "sqlite",
                Box::new(SqliteUserRepository::new(Database::open_in_memory().unwrap())),
            ),
            ("memory", Box::new(InMemoryUserRepository::new())),
        ]
    }

    #[test]
    fn test_create_and_fetch_email() {
        for (name, repo) in repositories() {
            let ada = repo.create_user("Ada", "ada@example.com").unwrap();
            let bob = repo.create_user("Bob", "bob@example.com").unwrap();

            assert_ne!(ada, bob, "{}", name);
            assert_eq!(repo.get_user_email(ada).unwrap(), "ada@example.com", "{}", name);
            assert_eq!(repo.get_user_email(bob).unwrap(), "bob@example.com", "{}", name);
        }
    }

    #[test]
    fn test_update_profile_overwrites_email() {
        for (name, repo) in repositories() {
            let id = repo.create_user("Ada", "ada@example.com").unwrap();
            repo.update_user_profile(id, "Ada L.", "ada@lovelace.dev").unwrap();

            assert_eq!(repo.get_user_email(id).unwrap(), "ada@lovelace.dev", "{}", name);
        }
    }

    #[test]
    fn test_update_unknown_user_is_noop() {
        for (name, repo) in repositories() {
            repo.update_user_profile(42, "Nobody", "nobody@example.com").unwrap();
            assert!(repo.get_user_email(42).unwrap_err().is_not_found(), "{}", name);
        }
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        for (name, repo) in repositories() {
            match repo.get_user_email(404) {
                Err(FinanceError::NotFound { user_id }) => assert_eq!(user_id, 404, "{}", name),
                other => panic!("{}: expected NotFound, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_store_failure_propagates_on_writes() {
        let repo = InMemoryUserRepository::new();
        let id = repo.create_user("Ada", "ada@example.com").unwrap();
        repo.set_offline(true);

        assert!(matches!(
            repo.update_user_profile(id, "Ada", "new@example.com"),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(repo.get_user_email(id), Err(FinanceError::Store(_))));

        repo.set_offline(false);
        assert_eq!(repo.get_user(id).unwrap().name, "Ada");
    }

    #[test]
    fn test_create_user_store_failure_propagates() {
        let repo = InMemoryUserRepository::new();
        repo.set_offline(true);

        assert!(matches!(
            repo.create_user("Ada", "ada@example.com"),
            Err(StoreError::Unavailable(_))
        ));

        repo.set_offline(false);
        assert!(repo.get_user(1).is_none());
    }

    #[test]
    fn test_sqlite_create_user_failure_propagates() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteUserRepository::new(db.clone());

        db.with_connection(|conn| {
            conn.execute("DROP TABLE users", [])?;
            Ok(())
        })
        .unwrap();

        assert!(matches!(
            repo.create_user("Ada", "ada@example.com"),
            Err(StoreError::Database(_))
        ));
    }

    #[test]
    fn test_sqlite_email_lookup_failure_is_store_error() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteUserRepository::new(db.clone());
        let id = repo.create_user("Ada", "ada@example.com").unwrap();

        db.with_connection(|conn| {
            conn.execute("DROP TABLE users", [])?;
            Ok(())
        })
        .unwrap();

        match repo.get_user_email(id) {
            Err(FinanceError::Store(StoreError::Database(_))) => {}
            other => panic!("expected a store error, got {:?}", other),
        }
    }

    #[test]
    fn test_sqlite_update_failure_propagates() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteUserRepository::new(db.clone());

        db.with_connection(|conn| {
            conn.execute("DROP TABLE users", [])?;
            Ok(())
        })
        .unwrap();

        assert!(matches!(
            repo.update_user_profile(1, "Ada", "ada@example.com"),
            Err(StoreError::Database(_))
        ));
    }
}
