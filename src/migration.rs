//! Create entity tables at startup. Idempotent: existing tables are left alone.

use crate::error::AppError;
use crate::model::{EntityDef, Model};
use crate::sql::quoted;
use sqlx::PgPool;

/// CREATE TABLE IF NOT EXISTS with primary key, unique, not-null, default, and foreign-key clauses.
pub fn create_table_sql(entity: &EntityDef) -> String {
    let mut defs: Vec<String> = Vec::new();
    for f in entity.fields {
        let mut def = format!("{} {}", quoted(f.name), f.sql_type.ddl());
        if f.primary_key {
            def.push_str(" PRIMARY KEY");
        } else if !f.nullable {
            def.push_str(" NOT NULL");
        }
        if f.unique {
            def.push_str(" UNIQUE");
        }
        if let Some(d) = f.default {
            def.push_str(" DEFAULT ");
            def.push_str(d);
        }
        defs.push(def);
    }
    for fk in entity.foreign_keys {
        let mut def = format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            quoted(fk.column),
            quoted(fk.references_table),
            quoted(fk.references_column),
        );
        if fk.cascade {
            def.push_str(" ON DELETE CASCADE");
        }
        defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(entity.table),
        defs.join(",\n  ")
    )
}

/// Create every table in the model, referenced tables first.
pub async fn ensure_schema(pool: &PgPool, model: &Model) -> Result<(), AppError> {
    model.check_creation_order()?;
    for entity in &model.entities {
        let ddl = create_table_sql(entity);
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
        tracing::info!(table = entity.table, "table ready");
    }
    Ok(())
}
