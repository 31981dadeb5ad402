//! Per-entity generation context.
//!
//! Everything the emitters need for one entity, computed once: transformed
//! names, mapped scalar fields and the classified relations. The three
//! artifact emitters all read from the same context, which is what keeps
//! them mutually consistent.

use relgen_core::{pluralize, to_pascal_case};
use relgen_meta::EntityGraph;

use crate::classify::{ClassifiedRelations, RelationKind, classify};
use crate::type_mapper::GoTypeMapper;

/// One scalar column, mapped into all three artifact type contexts.
#[derive(Debug, Clone)]
pub struct ScalarField {
    /// Raw column name (json tags, schema-description fields).
    pub column: String,
    /// Transformed field name in the storage struct.
    pub go_name: String,
    /// Lower-cased field name in the query-layer struct.
    pub query_name: String,
    pub storage_type: &'static str,
    pub query_type: &'static str,
    pub schema_type: &'static str,
    pub is_id: bool,
}

/// One dedicated relation-fetch accessor.
#[derive(Debug, Clone)]
pub struct RelationAccessor {
    /// Model function / controller handler name.
    pub method: String,
    /// Route below the entity root, e.g. `/car/:id/wheels`.
    pub route: String,
    pub kind: RelationKind,
    /// Related entity type name.
    pub target: String,
    /// Composite field navigated by the many-to-many pattern.
    pub field: String,
    /// Anchoring column name.
    pub anchor: String,
}

/// Precomputed generation context for one entity.
#[derive(Debug, Clone)]
pub struct EntityContext {
    /// Transformed type name ("Car").
    pub type_name: String,
    /// Lower-cased type name; names files, routes and resolver structs.
    pub var_name: String,
    /// Machine name; the generated table name.
    pub table_name: String,
    /// Lower-cased display name; the query-root field name.
    pub query_field: String,
    pub fields: Vec<ScalarField>,
    pub relations: ClassifiedRelations,
}

impl EntityContext {
    pub fn build(graph: &EntityGraph) -> Self {
        let mapper = GoTypeMapper;
        let entity = &graph.entity;
        let type_name = to_pascal_case(&entity.display_name);

        let fields = entity
            .columns
            .iter()
            .map(|column| {
                let is_id = column.name == "id";
                let type_name = column.column_type.name.as_str();
                ScalarField {
                    column: column.name.clone(),
                    go_name: to_pascal_case(&column.name),
                    query_name: column.name.to_lowercase(),
                    storage_type: mapper.storage_type(type_name),
                    query_type: mapper.query_type(type_name, is_id),
                    schema_type: mapper.schema_type(type_name, is_id),
                    is_id,
                }
            })
            .collect();

        let relations = classify(&type_name, &graph.parent_relations, &graph.child_relations);

        Self {
            var_name: type_name.to_lowercase(),
            query_field: entity.display_name.to_lowercase(),
            table_name: entity.name.clone(),
            type_name,
            fields,
            relations,
        }
    }

    pub fn get_all_name(&self) -> String {
        format!("GetAll{}", pluralize(&self.type_name))
    }

    pub fn get_name(&self) -> String {
        format!("Get{}", self.type_name)
    }

    pub fn post_name(&self) -> String {
        format!("Post{}", self.type_name)
    }

    pub fn put_name(&self) -> String {
        format!("Put{}", self.type_name)
    }

    pub fn delete_name(&self) -> String {
        format!("Delete{}", self.type_name)
    }

    /// Name of the combined, filterable sub-entity accessor.
    pub fn all_method_name(&self) -> String {
        format!("GetAll{}SubEntities", pluralize(&self.type_name))
    }

    /// Name of the generated child-name allow-list variable.
    pub fn children_var(&self) -> String {
        format!("{}Children", self.type_name)
    }

    pub fn has_all_endpoint(&self) -> bool {
        self.relations.has_all_endpoint()
    }

    /// The dedicated fetch accessors, one per per-endpoint descriptor, in
    /// declaration order.
    pub fn relation_accessors(&self) -> Vec<RelationAccessor> {
        self.relations
            .per_endpoint
            .iter()
            .map(|desc| {
                let suffix = if desc.kind.plural_accessor() { "s" } else { "" };
                RelationAccessor {
                    method: format!("Get{}{}{}", self.type_name, desc.target, suffix),
                    route: format!(
                        "/{}/:id/{}{}",
                        self.var_name,
                        desc.target.to_lowercase(),
                        suffix
                    ),
                    kind: desc.kind,
                    target: desc.target.clone(),
                    field: desc.field.clone(),
                    anchor: desc.anchor.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use relgen_meta::{Column, ColumnRef, ColumnType, Entity, EntityRef, Relation, RelationTypeId};

    use super::*;

    fn car_graph() -> EntityGraph {
        let car = Entity {
            id: 1,
            name: "car".to_string(),
            display_name: "car".to_string(),
            columns: vec![
                Column {
                    id: 1,
                    name: "id".to_string(),
                    display_name: "id".to_string(),
                    size: 11,
                    column_type: ColumnType {
                        id: 1,
                        name: "int".to_string(),
                    },
                },
                Column {
                    id: 2,
                    name: "name".to_string(),
                    display_name: "name".to_string(),
                    size: 30,
                    column_type: ColumnType {
                        id: 2,
                        name: "varchar".to_string(),
                    },
                },
            ],
        };
        EntityGraph {
            entity: car,
            parent_relations: vec![Relation {
                id: 1,
                parent_entity: EntityRef {
                    id: 1,
                    name: "car".to_string(),
                    display_name: "car".to_string(),
                },
                child_entity: EntityRef {
                    id: 2,
                    name: "wheel".to_string(),
                    display_name: "wheel".to_string(),
                },
                inter_entity: None,
                parent_column: ColumnRef {
                    id: 1,
                    name: "id".to_string(),
                },
                child_column: ColumnRef {
                    id: 3,
                    name: "car_id".to_string(),
                },
                relation_type: RelationTypeId::OneToMany,
            }],
            child_relations: vec![],
        }
    }

    #[test]
    fn test_build_names() {
        let ctx = EntityContext::build(&car_graph());
        assert_eq!(ctx.type_name, "Car");
        assert_eq!(ctx.var_name, "car");
        assert_eq!(ctx.table_name, "car");
        assert_eq!(ctx.query_field, "car");
        assert_eq!(ctx.get_all_name(), "GetAllCars");
        assert_eq!(ctx.all_method_name(), "GetAllCarsSubEntities");
        assert_eq!(ctx.children_var(), "CarChildren");
    }

    #[test]
    fn test_scalar_field_mapping() {
        let ctx = EntityContext::build(&car_graph());
        let id = &ctx.fields[0];
        assert!(id.is_id);
        assert_eq!(id.go_name, "Id");
        assert_eq!(id.storage_type, "uint");
        assert_eq!(id.query_type, "graphql.ID");
        assert_eq!(id.schema_type, "ID");

        let name = &ctx.fields[1];
        assert_eq!(name.storage_type, "string");
        assert_eq!(name.query_type, "string");
        assert_eq!(name.schema_type, "String");
    }

    #[test]
    fn test_relation_accessors() {
        let ctx = EntityContext::build(&car_graph());
        let accessors = ctx.relation_accessors();
        assert_eq!(accessors.len(), 1);
        assert_eq!(accessors[0].method, "GetCarWheels");
        assert_eq!(accessors[0].route, "/car/:id/wheels");
        assert_eq!(accessors[0].anchor, "car_id");
    }
}
