//! User record managed by the admin UI.
//!
//! # Responsibility
//! - Define the canonical `User` shape and its sortable field registry.
//! - Provide the initial seed records loaded into a fresh store.
//!
//! # Invariants
//! - `id` is assigned by the store on create and never changed afterwards.
//! - Field names registered for sorting match the external column names
//!   (`Id`, `Forename`, `Surname`, `Email`, `IsActive`, `DateOfBirth`).

use crate::model::entity::{Entity, EntityId, FieldAccessor, FieldTable, FieldValue};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static USER_FIELDS: Lazy<FieldTable<User>> = Lazy::new(|| {
    FieldTable::new(vec![
        FieldAccessor {
            name: "Id",
            extract: user_id,
        },
        FieldAccessor {
            name: "Forename",
            extract: user_forename,
        },
        FieldAccessor {
            name: "Surname",
            extract: user_surname,
        },
        FieldAccessor {
            name: "Email",
            extract: user_email,
        },
        FieldAccessor {
            name: "IsActive",
            extract: user_is_active,
        },
        FieldAccessor {
            name: "DateOfBirth",
            extract: user_date_of_birth,
        },
    ])
});

/// Administrative user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier; `0` until created.
    pub id: EntityId,
    pub forename: String,
    pub surname: String,
    pub email: String,
    pub is_active: bool,
    /// `None` models a missing value submitted by a form.
    pub date_of_birth: Option<NaiveDate>,
}

impl User {
    /// Creates an unsaved user. The store assigns `id` on create.
    pub fn new(
        forename: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        is_active: bool,
        date_of_birth: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: 0,
            forename: forename.into(),
            surname: surname.into(),
            email: email.into(),
            is_active,
            date_of_birth,
        }
    }
}

impl Entity for User {
    const ENTITY_NAME: &'static str = "User";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn fields() -> &'static FieldTable<Self> {
        &USER_FIELDS
    }
}

fn user_id(user: &User) -> FieldValue {
    user.id.into()
}

fn user_forename(user: &User) -> FieldValue {
    user.forename.as_str().into()
}

fn user_surname(user: &User) -> FieldValue {
    user.surname.as_str().into()
}

fn user_email(user: &User) -> FieldValue {
    user.email.as_str().into()
}

fn user_is_active(user: &User) -> FieldValue {
    user.is_active.into()
}

fn user_date_of_birth(user: &User) -> FieldValue {
    user.date_of_birth.into()
}

/// Initial records for a fresh store, in insertion order.
///
/// Ids are left unset; the store assigns `1..=11` in this order. Seed rows are
/// loaded as-is and do not go through validation.
pub fn seed_users() -> Vec<User> {
    [
        ("Peter", "Loew", "ploew@example.com", true, (2025, 1, 11)),
        ("Benjamin Franklin", "Gates", "bfgates@example.com", true, (2025, 5, 15)),
        ("Castor", "Troy", "ctroy@example.com", false, (2025, 6, 11)),
        ("Memphis", "Raines", "mraines@example.com", true, (2025, 10, 1)),
        ("Stanley", "Goodspeed", "sgodspeed@example.com", true, (2025, 6, 9)),
        ("H.I.", "McDunnough", "himcdunnough@example.com", true, (2025, 7, 21)),
        ("Cameron", "Poe", "cpoe@example.com", false, (2025, 1, 20)),
        ("Edward", "Malus", "emalus@example.com", false, (2025, 3, 21)),
        ("Damon", "Macready", "dmacready@example.com", false, (2025, 9, 15)),
        ("Johnny", "Blaze", "jblaze@example.com", true, (2025, 4, 19)),
        ("Robin", "Feld", "rfeld@example.com", true, (2025, 8, 30)),
    ]
    .into_iter()
    .map(|(forename, surname, email, is_active, (year, month, day))| {
        User::new(
            forename,
            surname,
            email,
            is_active,
            NaiveDate::from_ymd_opt(year, month, day),
        )
    })
    .collect()
}
