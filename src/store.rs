//! Record store operations.
//!
//! [`RecordStore`] is the uniform contract a single-table store exposes:
//! create, keyed lookup, field-mask update, delete, unfiltered and filtered
//! listing, and an all-or-nothing batch insert. [`Pet`] implements it against
//! the `pets` table; the species helpers (`find_by_species`,
//! `count_by_species`) are inherent because they are specific to that table.
//!
//! Absence is deliberately signalled three different ways, matching the
//! observable behavior callers rely on: `None` for lookups, a `NotFound`
//! error for updates, `false` for deletes.
//!
//! Every operation borrows the connection for exactly one call and holds no
//! state between calls. Errors propagate to the caller untouched; there are
//! no retries.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QuerySelect, TransactionTrait,
};
use std::fmt::Display;

use crate::entity;
use crate::errors::StoreError;
use crate::filtering;
use crate::models::{Pet, PetCreate, PetFilter, PetUpdate};
use crate::validation::Validatable;

/// Uniform CRUD contract over a single-table store.
///
/// Implementations take the connection as a parameter rather than owning it,
/// so the session provider stays external and each operation releases its
/// connection on every exit path.
#[async_trait]
pub trait RecordStore: Sized + Send + Sync {
    /// Primary key type. Caller-supplied, never generated.
    type Key: Display + Send;
    /// Creation payload.
    type CreateModel: Validatable + Send;
    /// Partial-update payload.
    type UpdateModel: Validatable + Send;
    /// Search filter payload.
    type FilterModel: Sync;

    /// Resource name used in error messages.
    const RESOURCE_NAME: &'static str;
    /// Backing table name.
    const TABLE_NAME: &'static str;

    /// Insert a new record and return it as stored.
    ///
    /// # Errors
    ///
    /// `Validation` on a bad payload, `DuplicateKey` if the key already
    /// exists, `Backend` otherwise.
    async fn create(db: &DatabaseConnection, data: Self::CreateModel) -> Result<Self, StoreError>;

    /// Look up a record by key. Absence is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// `Backend` on storage failure.
    async fn find_by_key(
        db: &DatabaseConnection,
        key: Self::Key,
    ) -> Result<Option<Self>, StoreError>;

    /// Apply the present fields of `data` over the existing record and return
    /// the merged result.
    ///
    /// # Errors
    ///
    /// `NotFound` if the key is absent, `Validation` on a bad payload,
    /// `Backend` otherwise.
    async fn update(
        db: &DatabaseConnection,
        key: Self::Key,
        data: Self::UpdateModel,
    ) -> Result<Self, StoreError>;

    /// Remove a record by key. Returns `false` (not an error) when absent.
    ///
    /// # Errors
    ///
    /// `Backend` on storage failure.
    async fn delete(db: &DatabaseConnection, key: Self::Key) -> Result<bool, StoreError>;

    /// Return every record in storage-native order.
    ///
    /// # Errors
    ///
    /// `Backend` on storage failure.
    async fn find_all(db: &DatabaseConnection) -> Result<Vec<Self>, StoreError>;

    /// Conjunctive filtered listing; an empty filter matches everything.
    ///
    /// # Errors
    ///
    /// `Backend` on storage failure.
    async fn search(
        db: &DatabaseConnection,
        filter: &Self::FilterModel,
    ) -> Result<Vec<Self>, StoreError>;

    /// Insert all records as one atomic unit. On any failure every insert in
    /// the call is rolled back and the visible state is unchanged.
    ///
    /// # Errors
    ///
    /// `Validation` if any payload is bad (checked before the transaction
    /// opens), `DuplicateKey` if any key collides, `Backend` otherwise.
    async fn insert_batch(
        db: &DatabaseConnection,
        batch: Vec<Self::CreateModel>,
    ) -> Result<Vec<Self>, StoreError>;
}

/// Insert one row over any connection-like handle, so the same path serves
/// single creates and transactional batches.
async fn insert_pet<C: ConnectionTrait>(conn: &C, data: PetCreate) -> Result<Pet, StoreError> {
    let chip_number = data.chip_number;
    let active_model: entity::ActiveModel = data.into();
    let model = active_model.insert(conn).await.map_err(|err| {
        match StoreError::from(err) {
            // Re-attach the key the classifier could not know about.
            StoreError::DuplicateKey { .. } => {
                StoreError::duplicate_key(Pet::RESOURCE_NAME, Some(chip_number.to_string()))
            }
            other => other,
        }
    })?;
    Ok(Pet::from(model))
}

#[async_trait]
impl RecordStore for Pet {
    type Key = i32;
    type CreateModel = PetCreate;
    type UpdateModel = PetUpdate;
    type FilterModel = PetFilter;

    const RESOURCE_NAME: &'static str = "pet";
    const TABLE_NAME: &'static str = "pets";

    async fn create(db: &DatabaseConnection, data: PetCreate) -> Result<Self, StoreError> {
        data.validate()?;
        insert_pet(db, data).await
    }

    async fn find_by_key(db: &DatabaseConnection, key: i32) -> Result<Option<Self>, StoreError> {
        let model = entity::Entity::find_by_id(key)
            .one(db)
            .await
            .map_err(StoreError::from)?;
        Ok(model.map(Self::from))
    }

    async fn update(
        db: &DatabaseConnection,
        key: i32,
        data: PetUpdate,
    ) -> Result<Self, StoreError> {
        data.validate()?;
        let model = entity::Entity::find_by_id(key)
            .one(db)
            .await
            .map_err(StoreError::from)?
            .ok_or_else(|| StoreError::not_found(Self::RESOURCE_NAME, Some(key.to_string())))?;
        let merged = data.merge_into(model.into_active_model());
        let updated = merged.update(db).await.map_err(StoreError::from)?;
        Ok(Self::from(updated))
    }

    async fn delete(db: &DatabaseConnection, key: i32) -> Result<bool, StoreError> {
        let res = entity::Entity::delete_by_id(key)
            .exec(db)
            .await
            .map_err(StoreError::from)?;
        Ok(res.rows_affected > 0)
    }

    async fn find_all(db: &DatabaseConnection) -> Result<Vec<Self>, StoreError> {
        let models = entity::Entity::find()
            .all(db)
            .await
            .map_err(StoreError::from)?;
        Ok(models.into_iter().map(Self::from).collect())
    }

    async fn search(db: &DatabaseConnection, filter: &PetFilter) -> Result<Vec<Self>, StoreError> {
        let condition = filtering::compile_filter(filter);
        let models = entity::Entity::find()
            .filter(condition)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(db)
            .await
            .map_err(StoreError::from)?;
        Ok(models.into_iter().map(Self::from).collect())
    }

    async fn insert_batch(
        db: &DatabaseConnection,
        batch: Vec<PetCreate>,
    ) -> Result<Vec<Self>, StoreError> {
        // Validate everything up front; a bad payload should not cost a
        // transaction, let alone a partial one.
        for data in &batch {
            data.validate()?;
        }

        let inserted = db
            .transaction::<_, Vec<Pet>, StoreError>(|txn| {
                Box::pin(async move {
                    let mut inserted = Vec::with_capacity(batch.len());
                    for data in batch {
                        inserted.push(insert_pet(txn, data).await?);
                    }
                    Ok(inserted)
                })
            })
            .await
            .map_err(|err| match err {
                sea_orm::TransactionError::Connection(db_err) => StoreError::from(db_err),
                sea_orm::TransactionError::Transaction(store_err) => store_err,
            })?;
        Ok(inserted)
    }
}

impl Pet {
    /// Exact-match listing on the species column.
    ///
    /// # Errors
    ///
    /// `Backend` on storage failure.
    pub async fn find_by_species(
        db: &DatabaseConnection,
        species: &str,
    ) -> Result<Vec<Self>, StoreError> {
        let models = entity::Entity::find()
            .filter(filtering::species_condition(species))
            .all(db)
            .await
            .map_err(StoreError::from)?;
        Ok(models.into_iter().map(Self::from).collect())
    }

    /// Count of records matching an exact species filter; 0 when nothing
    /// matches.
    ///
    /// # Errors
    ///
    /// `Backend` on storage failure.
    pub async fn count_by_species(
        db: &DatabaseConnection,
        species: &str,
    ) -> Result<u64, StoreError> {
        entity::Entity::find()
            .filter(filtering::species_condition(species))
            .count(db)
            .await
            .map_err(StoreError::from)
    }

    /// Round-trip a trivial statement through the live connection and report
    /// the backend in use. Useful as a connectivity probe.
    ///
    /// # Errors
    ///
    /// `Backend` if the statement cannot be executed.
    pub async fn ping(db: &DatabaseConnection) -> Result<String, StoreError> {
        let backend = db.get_database_backend();
        let stmt = sea_orm::Statement::from_string(backend, "SELECT 1");
        db.query_one(stmt)
            .await
            .map_err(StoreError::from)?
            .ok_or_else(|| {
                StoreError::backend(DbErr::Custom("probe query returned no row".to_string()))
            })?;
        Ok(format!(
            "connection ok, table: {}, backend: {backend:?}",
            <Self as RecordStore>::TABLE_NAME
        ))
    }
}
