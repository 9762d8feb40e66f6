use axum::Router;
use petstore::models::PetCreate;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::prelude::*;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    // Make internal error logging observable in test output. try_init because
    // every test in the binary goes through this fixture.
    let _ = tracing_subscriber::fmt().with_target(false).compact().try_init();

    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    Router::new().nest("/api/v1", petstore::routes::router(db))
}

/// The Max/Luna pair used across the test suite.
pub fn sample_pets() -> Vec<PetCreate> {
    vec![
        PetCreate {
            chip_number: 1001,
            name: "Max".to_string(),
            species: "Dog".to_string(),
            age: 5,
            sex: Some("Male".to_string()),
            notes: None,
        },
        PetCreate {
            chip_number: 1002,
            name: "Luna".to_string(),
            species: "Cat".to_string(),
            age: 3,
            sex: Some("Female".to_string()),
            notes: None,
        },
    ]
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreatePetsTable)]
    }
}

pub struct CreatePetsTable;

#[async_trait::async_trait]
impl MigrationName for CreatePetsTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_pets_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreatePetsTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(PetsTable)
            .if_not_exists()
            .col(
                ColumnDef::new(PetsColumn::ChipNumber)
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(PetsColumn::Name).string_len(50).not_null())
            .col(ColumnDef::new(PetsColumn::Species).string().not_null())
            .col(
                ColumnDef::new(PetsColumn::Age)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(PetsColumn::Sex).string().null())
            .col(ColumnDef::new(PetsColumn::Notes).text().null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PetsTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum PetsColumn {
    ChipNumber,
    Name,
    Species,
    Age,
    Sex,
    Notes,
}

impl Iden for PetsColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::ChipNumber => "chip_number",
                Self::Name => "name",
                Self::Species => "species",
                Self::Age => "age",
                Self::Sex => "sex",
                Self::Notes => "notes",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct PetsTable;

impl Iden for PetsTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "pets").unwrap();
    }
}
