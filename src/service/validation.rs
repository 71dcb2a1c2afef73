//! Turns an untrusted JSON object into typed column assignments for one entity.

use crate::error::AppError;
use crate::model::{EntityDef, FieldDef, SqlType};
use crate::sql::{FieldValues, PgBindValue};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Create body: only insertable fields, every required field present and non-null.
    /// A missing owner key is reported the same way as an owner that does not exist.
    pub fn validate(entity: &EntityDef, body: &Map<String, Value>) -> Result<FieldValues, AppError> {
        for key in body.keys() {
            match entity.field(key) {
                Some(f) if f.insertable => {}
                Some(_) => {
                    return Err(AppError::Unprocessable(format!(
                        "{} is assigned by the server",
                        key
                    )))
                }
                None => return Err(unknown_field(entity, key)),
            }
        }
        let mut out = Vec::new();
        for field in entity.fields.iter().filter(|f| f.insertable) {
            match body.get(field.name) {
                None | Some(Value::Null) if field.required() => {
                    if entity.foreign_key(field.name).is_some() {
                        return Err(AppError::conflict(entity));
                    }
                    return Err(AppError::Unprocessable(format!("{} is required", field.name)));
                }
                None | Some(Value::Null) => {}
                Some(v) => out.push((field, bind_value(field, v)?)),
            }
        }
        Ok(out)
    }

    /// Partial update body: only updatable fields; absent fields are left as they are.
    pub fn validate_partial(
        entity: &EntityDef,
        body: &Map<String, Value>,
    ) -> Result<FieldValues, AppError> {
        for key in body.keys() {
            match entity.field(key) {
                Some(f) if f.updatable => {}
                Some(_) => {
                    return Err(AppError::Unprocessable(format!("{} cannot be updated", key)))
                }
                None => return Err(unknown_field(entity, key)),
            }
        }
        let mut out = Vec::new();
        for field in entity.fields.iter().filter(|f| f.updatable) {
            if let Some(v) = body.get(field.name) {
                if v.is_null() && !field.nullable {
                    return Err(AppError::Unprocessable(format!("{} is required", field.name)));
                }
                out.push((field, bind_value(field, v)?));
            }
        }
        Ok(out)
    }
}

fn unknown_field(entity: &EntityDef, key: &str) -> AppError {
    AppError::Unprocessable(format!("unknown field '{}' for {}", key, entity.name))
}

fn bind_value(field: &'static FieldDef, v: &Value) -> Result<PgBindValue, AppError> {
    match field.sql_type {
        SqlType::Varchar(_) => {
            let s = v.as_str().ok_or_else(|| {
                AppError::Unprocessable(format!("{} must be a string", field.name))
            })?;
            if let Some(max) = field.sql_type.max_length() {
                if s.chars().count() > max as usize {
                    return Err(AppError::Unprocessable(format!(
                        "{} must be at most {} characters",
                        field.name, max
                    )));
                }
            }
            Ok(PgBindValue::Text(s.to_string()))
        }
        SqlType::Integer | SqlType::Serial => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(PgBindValue::Int)
            .ok_or_else(|| AppError::Unprocessable(format!("{} must be an integer", field.name))),
        SqlType::Timestamp => Err(AppError::Unprocessable(format!(
            "{} is assigned by the server",
            field.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ADVERTISEMENT, USER};
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Unprocessable(m) => m,
            other => panic!("expected unprocessable, got {:?}", other),
        }
    }

    #[test]
    fn create_user_in_field_order() {
        let body = obj(json!({"password": "pw", "email": "a@x.io", "name": "ann"}));
        let values = RequestValidator::validate(&USER, &body).unwrap();
        let names: Vec<_> = values.iter().map(|(f, _)| f.name).collect();
        assert_eq!(names, vec!["name", "email", "password"]);
        assert_eq!(values[0].1, PgBindValue::Text("ann".into()));
    }

    #[test]
    fn create_rejects_unknown_key() {
        let body = obj(json!({"name": "a", "email": "b", "password": "c", "age": 3}));
        let err = RequestValidator::validate(&USER, &body).unwrap_err();
        assert_eq!(message(err), "unknown field 'age' for User");
    }

    #[test]
    fn create_requires_every_required_field() {
        let body = obj(json!({"name": "a", "email": null}));
        let err = RequestValidator::validate(&USER, &body).unwrap_err();
        assert_eq!(message(err), "email is required");
    }

    #[test]
    fn create_rejects_server_assigned_fields() {
        let body = obj(json!({"id": 5, "name": "a", "email": "b", "password": "c"}));
        let err = RequestValidator::validate(&USER, &body).unwrap_err();
        assert_eq!(message(err), "id is assigned by the server");
    }

    #[test]
    fn create_enforces_max_length_in_characters() {
        let body = obj(json!({"name": "é".repeat(70), "email": "b", "password": "c"}));
        assert!(RequestValidator::validate(&USER, &body).is_ok());
        let body = obj(json!({"name": "n".repeat(71), "email": "b", "password": "c"}));
        let err = RequestValidator::validate(&USER, &body).unwrap_err();
        assert_eq!(message(err), "name must be at most 70 characters");
    }

    #[test]
    fn create_advertisement_checks_owner_type() {
        let body = obj(json!({"title": "t", "description": "d", "user_id": "1"}));
        let err = RequestValidator::validate(&ADVERTISEMENT, &body).unwrap_err();
        assert_eq!(message(err), "user_id must be an integer");

        let body = obj(json!({"title": "t", "description": "d", "user_id": 1}));
        let values = RequestValidator::validate(&ADVERTISEMENT, &body).unwrap();
        assert_eq!(values[2].1, PgBindValue::Int(1));
    }

    #[test]
    fn create_advertisement_without_owner_conflicts() {
        for body in [
            json!({"title": "t", "description": "d"}),
            json!({"title": "t", "description": "d", "user_id": null}),
        ] {
            let err = RequestValidator::validate(&ADVERTISEMENT, &obj(body)).unwrap_err();
            assert!(matches!(err, AppError::Conflict(_)));
            assert_eq!(err.to_string(), "Advertisement error");
        }
    }

    #[test]
    fn partial_update_keeps_only_given_fields() {
        let body = obj(json!({"title": "new"}));
        let values = RequestValidator::validate_partial(&ADVERTISEMENT, &body).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].0.name, "title");
    }

    #[test]
    fn partial_update_refuses_key_and_relationship() {
        for key in ["id", "user_id", "date_created"] {
            let mut body = Map::new();
            body.insert(key.to_string(), json!(1));
            let err = RequestValidator::validate_partial(&ADVERTISEMENT, &body).unwrap_err();
            assert_eq!(message(err), format!("{} cannot be updated", key));
        }
    }

    #[test]
    fn partial_update_rejects_null_for_required_column() {
        let body = obj(json!({"email": null}));
        let err = RequestValidator::validate_partial(&USER, &body).unwrap_err();
        assert_eq!(message(err), "email is required");
    }

    #[test]
    fn empty_update_is_allowed() {
        let values = RequestValidator::validate_partial(&USER, &Map::new()).unwrap();
        assert!(values.is_empty());
    }
}
