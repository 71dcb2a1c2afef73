//! Entity shape: columns, constraints, and the public projection.

/// Column storage type. Drives DDL, placeholder casts, and the JSON type accepted on write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    Serial,
    Integer,
    /// `VARCHAR(n)` when bounded, plain `VARCHAR` otherwise.
    Varchar(Option<u32>),
    Timestamp,
}

impl SqlType {
    pub fn ddl(&self) -> String {
        match self {
            SqlType::Serial => "SERIAL".into(),
            SqlType::Integer => "INTEGER".into(),
            SqlType::Varchar(Some(n)) => format!("VARCHAR({})", n),
            SqlType::Varchar(None) => "VARCHAR".into(),
            SqlType::Timestamp => "TIMESTAMP".into(),
        }
    }

    /// Cast applied to bound parameters. Never carries a length so over-long strings fail instead of truncating.
    pub fn cast(&self) -> &'static str {
        match self {
            SqlType::Serial | SqlType::Integer => "integer",
            SqlType::Varchar(_) => "varchar",
            SqlType::Timestamp => "timestamp",
        }
    }

    pub fn max_length(&self) -> Option<u32> {
        match self {
            SqlType::Varchar(n) => *n,
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub primary_key: bool,
    pub nullable: bool,
    pub unique: bool,
    /// SQL expression used as column default (e.g. `now()`).
    pub default: Option<&'static str>,
    /// Accepted in a create body.
    pub insertable: bool,
    /// Accepted in a partial update body.
    pub updatable: bool,
}

impl FieldDef {
    /// Required on create: not null, no server default, and not generated.
    pub fn required(&self) -> bool {
        self.insertable && !self.nullable && self.default.is_none()
    }
}

#[derive(Debug)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
    /// Rows referencing a deleted row are deleted with it.
    pub cascade: bool,
}

/// One key of the public JSON projection.
#[derive(Debug)]
pub enum Projected {
    Column(&'static str),
    /// Scalar from a related row: `related_table.column` where `related_table.their_key = our_key`.
    Lookup {
        alias: &'static str,
        related_table: &'static str,
        column: &'static str,
        our_key: &'static str,
        their_key: &'static str,
    },
}

impl Projected {
    pub fn key(&self) -> &'static str {
        match self {
            Projected::Column(name) => *name,
            Projected::Lookup { alias, .. } => *alias,
        }
    }
}

#[derive(Debug)]
pub struct EntityDef {
    /// Name used in error messages (`User not found`).
    pub name: &'static str,
    pub path_segment: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    pub foreign_keys: &'static [ForeignKey],
    pub projection: &'static [Projected],
}

impl EntityDef {
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn primary_key(&self) -> &'static str {
        self.fields
            .iter()
            .find(|f| f.primary_key)
            .map(|f| f.name)
            .unwrap_or("id")
    }

    /// Foreign key declared on `column`, if any.
    pub fn foreign_key(&self, column: &str) -> Option<&'static ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.column == column)
    }

    /// Tables this entity references; they must exist before this one is created.
    pub fn depends_on(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.foreign_keys.iter().map(|fk| fk.references_table)
    }
}
