//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from an entity definition.

use crate::model::{EntityDef, FieldDef, Projected};
use crate::sql::PgBindValue;

/// Validated column assignments, in entity field order.
pub type FieldValues = Vec<(&'static FieldDef, PgBindValue)>;

const MAIN_ALIAS: &str = "main";
const SUB_ALIAS: &str = "sub";

/// Quote identifier for PostgreSQL (safe: only from entity definitions).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn placeholder(field: &FieldDef, n: usize) -> String {
    format!("${}::{}", n, field.sql_type.cast())
}

/// SELECT the public projection for one row by primary key.
/// Lookups become scalar subqueries against the related table.
pub fn select_projection_by_id(entity: &EntityDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let parts: Vec<String> = entity
        .projection
        .iter()
        .map(|p| match p {
            Projected::Column(name) => {
                format!("{}.{} AS {}", MAIN_ALIAS, quoted(name), quoted(name))
            }
            Projected::Lookup {
                alias,
                related_table,
                column,
                our_key,
                their_key,
            } => format!(
                "(SELECT {sub}.{} FROM {} {sub} WHERE {sub}.{} = {main}.{}) AS {}",
                quoted(column),
                quoted(related_table),
                quoted(their_key),
                quoted(our_key),
                quoted(alias),
                sub = SUB_ALIAS,
                main = MAIN_ALIAS,
            ),
        })
        .collect();
    let n = q.push_param(PgBindValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} {} WHERE {}.{} = ${}",
        parts.join(", "),
        quoted(entity.table),
        MAIN_ALIAS,
        MAIN_ALIAS,
        quoted(entity.primary_key()),
        n
    );
    q
}

/// INSERT the given columns; omitted columns take their database default. Returns the new key.
pub fn insert(entity: &EntityDef, values: &FieldValues) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (field, value) in values {
        let n = q.push_param(value.clone());
        cols.push(quoted(field.name));
        placeholders.push(placeholder(field, n));
    }
    let pk = quoted(entity.primary_key());
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(entity.table),
            pk
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(entity.table),
            cols.join(", "),
            placeholders.join(", "),
            pk
        )
    };
    q
}

/// UPDATE by id: SET only the given columns. With nothing to set, selects the key so the row's existence is still checked.
pub fn update(entity: &EntityDef, id: i32, values: &FieldValues) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(entity.table);
    let pk = quoted(entity.primary_key());
    let mut sets = Vec::with_capacity(values.len());
    for (field, value) in values {
        let n = q.push_param(value.clone());
        sets.push(format!("{} = {}", quoted(field.name), placeholder(field, n)));
    }
    let id_param = q.push_param(PgBindValue::Int(id));
    q.sql = if sets.is_empty() {
        format!("SELECT {} FROM {} WHERE {} = ${}", pk, table, pk, id_param)
    } else {
        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            table,
            sets.join(", "),
            pk,
            id_param,
            pk
        )
    };
    q
}

/// DELETE by id.
pub fn delete(entity: &EntityDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = quoted(entity.primary_key());
    let n = q.push_param(PgBindValue::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        quoted(entity.table),
        pk,
        n,
        pk
    );
    q
}
