//! The two persisted entities.

use super::entity::{EntityDef, FieldDef, ForeignKey, Projected, SqlType};

const fn id_field() -> FieldDef {
    FieldDef {
        name: "id",
        sql_type: SqlType::Serial,
        primary_key: true,
        nullable: false,
        unique: false,
        default: None,
        insertable: false,
        updatable: false,
    }
}

const fn text_field(name: &'static str, max: Option<u32>, unique: bool) -> FieldDef {
    FieldDef {
        name,
        sql_type: SqlType::Varchar(max),
        primary_key: false,
        nullable: false,
        unique,
        default: None,
        insertable: true,
        updatable: true,
    }
}

/// Passwords are stored as given; they are never hashed or checked.
pub static USER: EntityDef = EntityDef {
    name: "User",
    path_segment: "user",
    table: "users",
    fields: &[
        id_field(),
        text_field("name", Some(70), true),
        text_field("email", Some(100), true),
        text_field("password", Some(70), false),
    ],
    foreign_keys: &[],
    projection: &[
        Projected::Column("id"),
        Projected::Column("name"),
        Projected::Column("email"),
    ],
};

pub static ADVERTISEMENT: EntityDef = EntityDef {
    name: "Advertisement",
    path_segment: "advertisment",
    table: "advertisments",
    fields: &[
        id_field(),
        text_field("title", None, false),
        text_field("description", None, false),
        FieldDef {
            name: "date_created",
            sql_type: SqlType::Timestamp,
            primary_key: false,
            nullable: true,
            unique: false,
            default: Some("now()"),
            insertable: false,
            updatable: false,
        },
        FieldDef {
            name: "user_id",
            sql_type: SqlType::Integer,
            primary_key: false,
            nullable: false,
            unique: false,
            default: None,
            insertable: true,
            updatable: false,
        },
    ],
    foreign_keys: &[ForeignKey {
        column: "user_id",
        references_table: "users",
        references_column: "id",
        cascade: true,
    }],
    projection: &[
        Projected::Column("id"),
        Projected::Column("title"),
        Projected::Column("description"),
        Projected::Column("date_created"),
        Projected::Lookup {
            alias: "user",
            related_table: "users",
            column: "name",
            our_key: "user_id",
            their_key: "id",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_required_fields_exclude_id() {
        let required: Vec<_> = USER.fields.iter().filter(|f| f.required()).map(|f| f.name).collect();
        assert_eq!(required, vec!["name", "email", "password"]);
    }

    #[test]
    fn password_is_not_projected() {
        assert!(USER.projection.iter().all(|p| p.key() != "password"));
    }

    #[test]
    fn advertisement_owner_is_create_only() {
        let owner = ADVERTISEMENT.field("user_id").unwrap();
        assert!(owner.required());
        assert!(!owner.updatable);
        let created = ADVERTISEMENT.field("date_created").unwrap();
        assert!(!created.insertable && !created.updatable);
    }

    #[test]
    fn advertisement_depends_on_users() {
        assert_eq!(ADVERTISEMENT.depends_on().collect::<Vec<_>>(), vec!["users"]);
        assert!(ADVERTISEMENT.foreign_keys[0].cascade);
    }
}
