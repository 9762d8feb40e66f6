//! Filter compilation.
//!
//! Turns a [`PetFilter`](crate::models::PetFilter) into a Sea-ORM
//! [`Condition`]. The compiled condition starts unconditional
//! (`Condition::all()` with no clauses matches every row) and gains one
//! AND-ed equality per present field, so the predicate set is commutative:
//! the order fields are added changes only the generated SQL text, never the
//! result set. Values are always bound as query parameters, never
//! interpolated into SQL text.

use sea_orm::{ColumnTrait, Condition};

use crate::entity::Column;
use crate::models::PetFilter;

/// Compile a filter into a conjunctive condition over the present fields.
#[must_use]
pub fn compile_filter(filter: &PetFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(name) = &filter.name {
        condition = condition.add(Column::Name.eq(name.as_str()));
    }
    if let Some(species) = &filter.species {
        condition = condition.add(Column::Species.eq(species.as_str()));
    }
    if let Some(sex) = &filter.sex {
        condition = condition.add(Column::Sex.eq(sex.as_str()));
    }
    condition
}

/// Exact-match condition on the species column.
#[must_use]
pub fn species_condition(species: &str) -> Condition {
    Condition::all().add(Column::Species.eq(species))
}
