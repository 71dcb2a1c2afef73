//! Entity model: the static definitions and lookup by path segment.

mod definitions;
mod entity;

pub use definitions::{ADVERTISEMENT, USER};
pub use entity::*;

use crate::error::ConfigError;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct Model {
    /// In creation order: referenced tables come first.
    pub entities: Vec<&'static EntityDef>,
    entity_by_path: HashMap<&'static str, &'static EntityDef>,
}

impl Model {
    pub fn new(entities: Vec<&'static EntityDef>) -> Self {
        let entity_by_path = entities.iter().map(|e| (e.path_segment, *e)).collect();
        Model {
            entities,
            entity_by_path,
        }
    }

    /// Users and advertisements.
    pub fn standard() -> Self {
        Self::new(vec![&USER, &ADVERTISEMENT])
    }

    pub fn entity_by_path(&self, path: &str) -> Option<&'static EntityDef> {
        self.entity_by_path.get(path).copied()
    }

    /// Every referenced table must come earlier in `entities` (or be the entity's own table).
    pub fn check_creation_order(&self) -> Result<(), ConfigError> {
        for (i, entity) in self.entities.iter().enumerate() {
            for references in entity.depends_on() {
                let created_before = references == entity.table
                    || self.entities[..i].iter().any(|e| e.table == references);
                if !created_before {
                    return Err(ConfigError::TableOrder {
                        table: entity.table,
                        references,
                    });
                }
            }
        }
        Ok(())
    }
}
