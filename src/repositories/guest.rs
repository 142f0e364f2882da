//! GuestRepository - Repository for the guest directory

use super::{Create, Delete, PoolType, Read, Update};
use crate::dtos::{CreateGuestDTO, UpdateGuestDTO, blank_to_none};
use crate::entities::Guest;
use chrono::Utc;
use sqlx::{Error, Sqlite, SqliteExecutor};
use tracing::{debug, instrument};

const GUEST_COLUMNS: &str = "guest_id, invitation_code, first_name, last_name, phone, email, \
     category, num_adults, num_children, created_at";

pub struct GuestRepository {
    connection_pool: PoolType,
}

impl GuestRepository {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Looks a guest up by the code printed on the invitation (exact match)
    #[instrument(skip(self))]
    pub async fn find_by_invitation_code(&self, code: &str) -> Result<Option<Guest>, Error> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE invitation_code = ?"
        ))
        .bind(code)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(guest)
    }

    /// All guests, newest first
    pub async fn list_all(&self) -> Result<Vec<Guest>, Error> {
        let guests = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests ORDER BY created_at DESC, guest_id DESC"
        ))
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(guests)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM guests")
            .fetch_one(&self.connection_pool)
            .await?;

        Ok(count)
    }

    /// Inserts every guest in a single transaction: either all rows are
    /// stored or none (e.g. one duplicated invitation code rolls back the batch).
    #[instrument(skip(self, data), fields(rows = data.len()))]
    pub async fn create_many(&self, data: &[CreateGuestDTO]) -> Result<Vec<Guest>, Error> {
        let mut tx = self.connection_pool.begin().await?;
        let mut created = Vec::with_capacity(data.len());

        for guest in data {
            created.push(insert_guest(&mut *tx, guest).await?);
        }

        tx.commit().await?;
        debug!("Batch of {} guests committed", created.len());

        Ok(created)
    }
}

async fn insert_guest<'e, E>(executor: E, data: &CreateGuestDTO) -> Result<Guest, Error>
where
    E: SqliteExecutor<'e>,
{
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO guests (invitation_code, first_name, last_name, phone, email, category,
                            num_adults, num_children, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.invitation_code)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.category)
    .bind(data.num_adults)
    .bind(data.num_children)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(Guest {
        guest_id: result.last_insert_rowid(),
        invitation_code: data.invitation_code.clone(),
        first_name: data.first_name.clone(),
        last_name: data.last_name.clone(),
        phone: data.phone.clone(),
        email: data.email.clone(),
        category: data.category,
        num_adults: data.num_adults,
        num_children: data.num_children,
        created_at: now,
    })
}

impl Create<Guest, CreateGuestDTO> for GuestRepository {
    async fn create(&self, data: &CreateGuestDTO) -> Result<Guest, Error> {
        insert_guest(&self.connection_pool, data).await
    }
}

impl Read<Guest, i64> for GuestRepository {
    async fn read(&self, id: &i64) -> Result<Option<Guest>, Error> {
        let guest = sqlx::query_as::<_, Guest>(&format!(
            "SELECT {GUEST_COLUMNS} FROM guests WHERE guest_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(guest)
    }
}

impl Update<Guest, UpdateGuestDTO, i64> for GuestRepository {
    /// The invitation code is not part of `UpdateGuestDTO`: it never changes
    async fn update(&self, id: &i64, data: &UpdateGuestDTO) -> Result<Guest, Error> {
        // First, get the current guest to ensure it exists
        let current_guest = self.read(id).await?.ok_or(Error::RowNotFound)?;

        if data.is_empty() {
            return Ok(current_guest);
        }

        let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new("UPDATE guests SET ");

        let mut separated = query_builder.separated(", ");
        if let Some(ref first_name) = data.first_name {
            separated.push("first_name = ");
            separated.push_bind_unseparated(first_name.trim().to_string());
        }
        if let Some(ref last_name) = data.last_name {
            separated.push("last_name = ");
            separated.push_bind_unseparated(last_name.trim().to_string());
        }
        // an empty phone or email clears the field
        if let Some(ref phone) = data.phone {
            separated.push("phone = ");
            separated.push_bind_unseparated(blank_to_none(phone));
        }
        if let Some(ref email) = data.email {
            separated.push("email = ");
            separated.push_bind_unseparated(blank_to_none(email));
        }
        if let Some(category) = data.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category);
        }
        if let Some(num_adults) = data.num_adults {
            separated.push("num_adults = ");
            separated.push_bind_unseparated(num_adults);
        }
        if let Some(num_children) = data.num_children {
            separated.push("num_children = ");
            separated.push_bind_unseparated(num_children);
        }

        query_builder.push(" WHERE guest_id = ");
        query_builder.push_bind(*id);

        query_builder.build().execute(&self.connection_pool).await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for GuestRepository {
    /// Hard delete. The schema cascades to the RSVP response and detaches
    /// the guestbook messages.
    async fn delete(&self, id: &i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM guests WHERE guest_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        Ok(())
    }
}
