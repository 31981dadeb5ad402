//! Row types of the metadata store.
//!
//! `Entity`, `Column`, `ColumnType` and `Relation` mirror the long-lived
//! metadata tables (`c_entity`, `c_column`, `c_column_type`, `c_relation`);
//! they are created and edited outside the generator's scope and only read
//! here. Relations arrive with their endpoints eagerly resolved so the
//! classifier never goes back to the store.

use serde::Serialize;

/// One table description to scaffold.
///
/// The machine `name` is unique across entities and becomes the generated
/// table name; the `display_name` is what the identifier transformer turns
/// into the generated type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    /// Columns in declaration order (column id).
    pub columns: Vec<Column>,
}

/// A column of an entity, with its logical type resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    pub size: i32,
    pub column_type: ColumnType,
}

/// A named logical column type ("int", "varchar", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnType {
    pub id: i32,
    pub name: String,
}

/// The three relation kinds, with their stored integer discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationTypeId {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationTypeId {
    /// Resolve a stored discriminant (1, 2, 3).
    pub fn from_discriminant(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::OneToOne),
            2 => Some(Self::OneToMany),
            3 => Some(Self::ManyToMany),
            _ => None,
        }
    }

    pub fn discriminant(self) -> i32 {
        match self {
            Self::OneToOne => 1,
            Self::OneToMany => 2,
            Self::ManyToMany => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::OneToOne => "one to one",
            Self::OneToMany => "one to many",
            Self::ManyToMany => "many to many",
        }
    }
}

/// An entity endpoint of a relation (no columns attached).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub id: i32,
    pub name: String,
    pub display_name: String,
}

/// An anchor column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRef {
    pub id: i32,
    pub name: String,
}

/// A directed, typed edge between two entities.
///
/// Anchored on one column of the parent and one column of the child,
/// optionally through an intermediate entity (the many-to-many join table).
/// The 6-tuple (parent, parent column, child, child column, intermediate,
/// kind) is unique in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub id: i32,
    pub parent_entity: EntityRef,
    pub child_entity: EntityRef,
    pub inter_entity: Option<EntityRef>,
    pub parent_column: ColumnRef,
    pub child_column: ColumnRef,
    pub relation_type: RelationTypeId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_type_discriminants() {
        assert_eq!(
            RelationTypeId::from_discriminant(1),
            Some(RelationTypeId::OneToOne)
        );
        assert_eq!(
            RelationTypeId::from_discriminant(2),
            Some(RelationTypeId::OneToMany)
        );
        assert_eq!(
            RelationTypeId::from_discriminant(3),
            Some(RelationTypeId::ManyToMany)
        );
        assert_eq!(RelationTypeId::from_discriminant(0), None);
        assert_eq!(RelationTypeId::from_discriminant(4), None);
    }

    #[test]
    fn test_discriminant_round_trip() {
        for kind in [
            RelationTypeId::OneToOne,
            RelationTypeId::OneToMany,
            RelationTypeId::ManyToMany,
        ] {
            assert_eq!(
                RelationTypeId::from_discriminant(kind.discriminant()),
                Some(kind)
            );
        }
    }
}
