//! Sea-ORM entity for the `pets` table.
//!
//! The chip number is the primary key and is always caller-supplied, so
//! auto-increment is disabled. Column names follow the field names verbatim.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub chip_number: i32,
    pub name: String,
    pub species: String,
    pub age: i32,
    pub sex: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
