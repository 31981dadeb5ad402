//! Relation classification.
//!
//! Turns the two raw relation projections of one entity into entity-local,
//! directional, kind-tagged descriptors plus the composite field
//! declarations of its storage struct. The same underlying relation is
//! visible from both endpoints with different cardinality and field shape;
//! the branching below emits a complete set of navigable accessors on both
//! sides without ever declaring the association twice.

use relgen_core::{pluralize, to_pascal_case};
use relgen_meta::{Relation, RelationTypeId};

/// Kind tag of a classified relation descriptor.
///
/// One-to-one splits three ways depending on the viewpoint: `_normal` from
/// the parent side, `_self` for self-joins, `_reverse` from the child side.
/// The unrefined `OneToOne` appears only in the all-endpoint projection,
/// where the refinement is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    OneToOne,
    OneToOneNormal,
    OneToOneSelf,
    OneToOneReverse,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    /// Whether the dedicated fetch accessor for this kind returns a
    /// collection (and so carries a pluralized name).
    pub fn plural_accessor(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

/// One relation seen from the current entity's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRelation {
    pub kind: RelationKind,
    /// Transformed type name of the related entity.
    pub target: String,
    /// Composite field name on the owning struct (pluralized for
    /// collection-shaped relations).
    pub field: String,
    /// Anchoring column name.
    pub anchor: String,
}

/// A composite (relation-backed) field of the storage struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeField {
    pub name: String,
    pub go_type: String,
    pub gorm: String,
    pub json: String,
}

/// Classifier output for one entity.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedRelations {
    /// One descriptor per relation; drives the dedicated fetch accessors.
    pub per_endpoint: Vec<EntityRelation>,
    /// Forward one-to-one and one-to-many relations seen from the parent
    /// side; drives the combined filterable fetch accessor.
    pub all_endpoint: Vec<EntityRelation>,
    /// Composite field declarations for the model emitter.
    pub composite_fields: Vec<CompositeField>,
}

impl ClassifiedRelations {
    pub fn has_all_endpoint(&self) -> bool {
        !self.all_endpoint.is_empty()
    }

    /// Field names eligible for the combined accessor's allow-list.
    pub fn child_field_names(&self) -> Vec<&str> {
        self.all_endpoint.iter().map(|r| r.field.as_str()).collect()
    }
}

/// Classify one entity's relations.
///
/// `entity_name` is the current entity's transformed type name; a parent
/// relation whose child transforms to the same name is a self-join.
pub fn classify(
    entity_name: &str,
    parent_relations: &[Relation],
    child_relations: &[Relation],
) -> ClassifiedRelations {
    let mut out = ClassifiedRelations::default();

    for relation in parent_relations {
        let other = to_pascal_case(&relation.child_entity.display_name);
        let self_join = other == entity_name;
        let child_col = relation.child_column.name.clone();
        let parent_col = &relation.parent_column.name;

        match relation.relation_type {
            RelationTypeId::OneToOne => {
                out.composite_fields.push(CompositeField {
                    name: other.clone(),
                    go_type: if self_join {
                        format!("*{}", other)
                    } else {
                        other.clone()
                    },
                    gorm: format!(
                        "ForeignKey:{};AssociationForeignKey:{}",
                        child_col, parent_col
                    ),
                    json: relation.child_entity.display_name.clone(),
                });
                out.per_endpoint.push(EntityRelation {
                    kind: if self_join {
                        RelationKind::OneToOneSelf
                    } else {
                        RelationKind::OneToOneNormal
                    },
                    target: other.clone(),
                    field: other.clone(),
                    anchor: child_col.clone(),
                });
                out.all_endpoint.push(EntityRelation {
                    kind: RelationKind::OneToOne,
                    target: other.clone(),
                    field: other,
                    anchor: child_col,
                });
            }
            RelationTypeId::OneToMany => {
                let field = pluralize(&other);
                out.composite_fields.push(CompositeField {
                    name: field.clone(),
                    go_type: format!("[]{}", other),
                    gorm: format!(
                        "ForeignKey:{};AssociationForeignKey:{}",
                        child_col, parent_col
                    ),
                    json: pluralize(&relation.child_entity.display_name),
                });
                out.per_endpoint.push(EntityRelation {
                    kind: RelationKind::OneToMany,
                    target: other.clone(),
                    field: field.clone(),
                    anchor: child_col.clone(),
                });
                out.all_endpoint.push(EntityRelation {
                    kind: RelationKind::OneToMany,
                    target: other,
                    field,
                    anchor: child_col,
                });
            }
            RelationTypeId::ManyToMany => {
                // the parent side owns the association; the join table
                // names the gorm tag and the child side stays silent
                let field = pluralize(&other);
                let join_table = relation
                    .inter_entity
                    .as_ref()
                    .map(|e| e.name.as_str())
                    .unwrap_or_default();
                out.composite_fields.push(CompositeField {
                    name: field.clone(),
                    go_type: format!("[]{}", other),
                    gorm: format!("many2many:{}", join_table),
                    json: pluralize(&relation.child_entity.display_name),
                });
                out.per_endpoint.push(EntityRelation {
                    kind: RelationKind::ManyToMany,
                    target: other,
                    field,
                    anchor: child_col,
                });
            }
        }
    }

    for relation in child_relations {
        let other = to_pascal_case(&relation.parent_entity.display_name);
        let child_col = relation.child_column.name.clone();

        match relation.relation_type {
            RelationTypeId::OneToOne => {
                // self-joins are already covered on the parent side
                if other != entity_name {
                    out.per_endpoint.push(EntityRelation {
                        kind: RelationKind::OneToOneReverse,
                        target: other.clone(),
                        field: other,
                        anchor: child_col,
                    });
                }
            }
            RelationTypeId::OneToMany => {
                out.composite_fields.push(CompositeField {
                    name: other.clone(),
                    go_type: other.clone(),
                    gorm: format!("ForeignKey:{}", to_pascal_case(&child_col)),
                    json: other.clone(),
                });
                out.per_endpoint.push(EntityRelation {
                    kind: RelationKind::ManyToOne,
                    target: other.clone(),
                    field: other,
                    anchor: child_col,
                });
            }
            RelationTypeId::ManyToMany => {
                // nothing: the association is declared once, on the parent
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use relgen_meta::{ColumnRef, EntityRef};

    use super::*;

    fn entity_ref(id: i32, display_name: &str) -> EntityRef {
        EntityRef {
            id,
            name: display_name.to_string(),
            display_name: display_name.to_string(),
        }
    }

    fn relation(
        id: i32,
        parent: (i32, &str),
        child: (i32, &str),
        child_col: &str,
        kind: RelationTypeId,
    ) -> Relation {
        Relation {
            id,
            parent_entity: entity_ref(parent.0, parent.1),
            child_entity: entity_ref(child.0, child.1),
            inter_entity: None,
            parent_column: ColumnRef {
                id: 1,
                name: "id".to_string(),
            },
            child_column: ColumnRef {
                id: 2,
                name: child_col.to_string(),
            },
            relation_type: kind,
        }
    }

    #[test]
    fn test_one_to_many_parent_side() {
        let rel = relation(1, (1, "car"), (2, "wheel"), "car_id", RelationTypeId::OneToMany);

        let classified = classify("Car", &[rel], &[]);

        assert_eq!(classified.per_endpoint.len(), 1);
        let desc = &classified.per_endpoint[0];
        assert_eq!(desc.kind, RelationKind::OneToMany);
        assert_eq!(desc.target, "Wheel");
        assert_eq!(desc.field, "Wheels");
        assert_eq!(desc.anchor, "car_id");

        assert_eq!(classified.all_endpoint.len(), 1);
        assert_eq!(classified.child_field_names(), ["Wheels"]);

        assert_eq!(classified.composite_fields.len(), 1);
        let field = &classified.composite_fields[0];
        assert_eq!(field.name, "Wheels");
        assert_eq!(field.go_type, "[]Wheel");
        assert_eq!(field.gorm, "ForeignKey:car_id;AssociationForeignKey:id");
    }

    #[test]
    fn test_one_to_many_child_side_becomes_many_to_one() {
        let rel = relation(1, (1, "car"), (2, "wheel"), "car_id", RelationTypeId::OneToMany);

        let classified = classify("Wheel", &[], &[rel]);

        assert_eq!(classified.per_endpoint.len(), 1);
        let desc = &classified.per_endpoint[0];
        assert_eq!(desc.kind, RelationKind::ManyToOne);
        assert_eq!(desc.target, "Car");
        assert_eq!(desc.anchor, "car_id");

        // belongs-to field, no duplicate of the parent-side plural field
        assert_eq!(classified.composite_fields.len(), 1);
        let field = &classified.composite_fields[0];
        assert_eq!(field.name, "Car");
        assert_eq!(field.go_type, "Car");
        assert_eq!(field.gorm, "ForeignKey:CarId");

        // child side never feeds the combined accessor
        assert!(classified.all_endpoint.is_empty());
    }

    #[test]
    fn test_one_to_one_self_join() {
        let rel = relation(1, (1, "part"), (1, "part"), "parent_id", RelationTypeId::OneToOne);

        let classified = classify("Part", std::slice::from_ref(&rel), &[rel.clone()]);

        // parent side: refined self tag, optional-typed field
        let self_descs: Vec<_> = classified
            .per_endpoint
            .iter()
            .filter(|d| d.kind == RelationKind::OneToOneSelf)
            .collect();
        assert_eq!(self_descs.len(), 1);
        assert_eq!(classified.composite_fields.len(), 1);
        assert_eq!(classified.composite_fields[0].go_type, "*Part");

        // child side produces no reverse duplicate for a self-join
        assert!(
            classified
                .per_endpoint
                .iter()
                .all(|d| d.kind != RelationKind::OneToOneReverse)
        );

        // all-endpoint carries the unrefined tag
        assert_eq!(classified.all_endpoint.len(), 1);
        assert_eq!(classified.all_endpoint[0].kind, RelationKind::OneToOne);
    }

    #[test]
    fn test_one_to_one_reverse_is_accessor_only() {
        let rel = relation(1, (1, "person"), (2, "passport"), "person_id", RelationTypeId::OneToOne);

        let classified = classify("Passport", &[], &[rel]);

        assert_eq!(classified.per_endpoint.len(), 1);
        assert_eq!(classified.per_endpoint[0].kind, RelationKind::OneToOneReverse);
        // no field declaration: the parent side owns the field
        assert!(classified.composite_fields.is_empty());
        assert!(classified.all_endpoint.is_empty());
    }

    #[test]
    fn test_many_to_many_parent_side_only() {
        let mut rel = relation(1, (1, "car"), (2, "driver"), "id", RelationTypeId::ManyToMany);
        rel.inter_entity = Some(entity_ref(3, "car_driver"));

        let parent = classify("Car", std::slice::from_ref(&rel), &[]);
        let child = classify("Driver", &[], std::slice::from_ref(&rel));

        // parent side owns descriptor and field, excluded from all-endpoint
        assert_eq!(parent.per_endpoint.len(), 1);
        assert_eq!(parent.per_endpoint[0].kind, RelationKind::ManyToMany);
        assert!(parent.all_endpoint.is_empty());
        assert_eq!(parent.composite_fields[0].gorm, "many2many:car_driver");

        // child side emits nothing at all
        assert!(child.per_endpoint.is_empty());
        assert!(child.all_endpoint.is_empty());
        assert!(child.composite_fields.is_empty());
    }

    #[test]
    fn test_mixed_relations_keep_declaration_order() {
        let one_to_many =
            relation(1, (1, "car"), (2, "wheel"), "car_id", RelationTypeId::OneToMany);
        let one_to_one =
            relation(2, (1, "car"), (3, "engine"), "car_id", RelationTypeId::OneToOne);

        let classified = classify("Car", &[one_to_many, one_to_one], &[]);

        let kinds: Vec<RelationKind> = classified.per_endpoint.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, [RelationKind::OneToMany, RelationKind::OneToOneNormal]);
        assert_eq!(classified.child_field_names(), ["Wheels", "Engine"]);
    }
}
