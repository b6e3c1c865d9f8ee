//! SQLite-backed `Repository<User>`.
//!
//! # Responsibility
//! - Persist users in the `users` table behind the generic repository
//!   contract, so callers can swap it for the in-memory store.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT`, so deleted ids are never reused.
//! - Rows are read in id order; predicate filtering and sorting happen in
//!   Rust with the same routine the in-memory store uses.
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::model::entity::EntityId;
use crate::model::user::User;
use crate::repo::repository::{
    query_entities, resolve_sort_field, Predicate, RepoError, RepoResult, Repository,
};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    forename,
    surname,
    email,
    is_active,
    date_of_birth
FROM users";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed user repository bound to one open connection.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*` (migrations applied).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts `seed` when the table is empty; returns how many rows were
    /// inserted. A non-empty table is left untouched.
    pub fn seed(&self, seed: &[User]) -> RepoResult<usize> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        for user in seed {
            insert_user(&tx, user)?;
        }
        tx.commit()?;

        info!(
            "event=store_seed module=repo status=ok entity=User count={}",
            seed.len()
        );
        Ok(seed.len())
    }
}

impl Repository<User> for SqliteUserRepository<'_> {
    fn create(&self, mut entity: User) -> RepoResult<User> {
        entity.id = insert_user(self.conn, &entity)?;
        Ok(entity)
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<User> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return parse_user_row(row);
        }

        Err(RepoError::not_found::<User>(id))
    }

    fn get_all(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }

    fn get(
        &self,
        filter: Option<Predicate<'_, User>>,
        sort_field: &str,
        descending: bool,
    ) -> RepoResult<Vec<User>> {
        resolve_sort_field::<User>(sort_field)?;
        query_entities(self.get_all()?, filter, sort_field, descending)
    }

    fn update(&self, entity: &User) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users
             SET
                forename = ?1,
                surname = ?2,
                email = ?3,
                is_active = ?4,
                date_of_birth = ?5
             WHERE id = ?6;",
            params![
                entity.forename.as_str(),
                entity.surname.as_str(),
                entity.email.as_str(),
                entity.is_active,
                entity.date_of_birth.map(format_date),
                entity.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found::<User>(entity.id));
        }
        Ok(())
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", params![id])?;
        if changed == 0 {
            return Err(RepoError::not_found::<User>(id));
        }
        Ok(())
    }
}

fn insert_user(conn: &Connection, user: &User) -> RepoResult<EntityId> {
    conn.execute(
        "INSERT INTO users (
            forename,
            surname,
            email,
            is_active,
            date_of_birth
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            user.forename.as_str(),
            user.surname.as_str(),
            user.email.as_str(),
            user.is_active,
            user.date_of_birth.map(format_date),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let is_active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` in users.is_active"
            )));
        }
    };

    let date_of_birth = match row.get::<_, Option<String>>("date_of_birth")? {
        Some(text) => Some(NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date `{text}` in users.date_of_birth"
            ))
        })?),
        None => None,
    };

    Ok(User {
        id: row.get("id")?,
        forename: row.get("forename")?,
        surname: row.get("surname")?,
        email: row.get("email")?,
        is_active,
        date_of_birth,
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
