//! Contact book storage.

use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Field values entered for a new contact or an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Reject a blank name without touching storage.
    pub fn validate(&self) -> StoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(StoreError::validation("name", "Name cannot be empty"));
        }
        Ok(())
    }

    /// Trimmed copy ready to store, or a validation error for a blank name.
    fn normalized(&self) -> StoreResult<ContactDraft> {
        self.validate()?;
        let name = self.name.trim();

        Ok(ContactDraft {
            name: name.to_string(),
            phone: non_blank(self.phone.as_deref()),
            email: non_blank(self.email.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact { id: row.get(0)?, name: row.get(1)?, phone: row.get(2)?, email: row.get(3)? })
}

pub struct ContactStore {
    conn: Connection,
}

impl ContactStore {
    /// Wrap a connection opened through [`crate::db`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Contacts whose name contains `search` (case-insensitive), in storage order.
    /// A blank term lists everything.
    pub fn list(&self, search: &str) -> StoreResult<Vec<Contact>> {
        let needle = search.trim().to_lowercase();
        tracing::debug!(term = %needle, "listing contacts");

        // SQLite's lower() only folds ASCII, so matching happens here.
        let mut stmt = self.conn.prepare("SELECT id, name, phone, email FROM contacts ORDER BY id")?;
        let rows = stmt.query_map([], contact_from_row)?;

        let mut out = Vec::new();
        for row in rows {
            let contact = row?;
            if needle.is_empty() || contact.name.to_lowercase().contains(&needle) {
                out.push(contact);
            }
        }
        Ok(out)
    }

    pub fn get(&self, id: i64) -> StoreResult<Contact> {
        self.conn
            .query_row(
                "SELECT id, name, phone, email FROM contacts WHERE id = ?1",
                params![id],
                contact_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))
    }

    pub fn add(&self, draft: &ContactDraft) -> StoreResult<Contact> {
        let draft = draft.normalized()?;

        self.conn.execute(
            "INSERT INTO contacts (name, phone, email) VALUES (?1, ?2, ?3)",
            params![draft.name, draft.phone, draft.email],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "contact added");

        Ok(Contact { id, name: draft.name, phone: draft.phone, email: draft.email })
    }

    /// Replace every field of contact `id`.
    pub fn update(&self, id: i64, draft: &ContactDraft) -> StoreResult<Contact> {
        let draft = draft.normalized()?;

        let changed = self.conn.execute(
            "UPDATE contacts SET name = ?1, phone = ?2, email = ?3 WHERE id = ?4",
            params![draft.name, draft.phone, draft.email, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(Contact { id, name: draft.name, phone: draft.phone, email: draft.email })
    }

    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let changed = self.conn.execute("DELETE FROM contacts WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::debug!(id, "contact deleted");
        Ok(())
    }
}
