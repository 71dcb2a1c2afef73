//! Generic CRUD over a session, one code path for every entity.

use crate::error::AppError;
use crate::model::EntityDef;
use crate::service::RequestValidator;
use crate::store::{Change, Session};
use serde_json::{Map, Value};

pub struct CrudService;

impl CrudService {
    /// Insert one row from a create body and return its projection.
    pub async fn create(
        session: &mut Session,
        entity: &'static EntityDef,
        body: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let values = RequestValidator::validate(entity, body)?;
        session.add(Change::Insert { entity, values });
        let id = session
            .commit()
            .await?
            .into_iter()
            .next()
            .flatten()
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(entity = entity.name, id, "created");
        Self::read(session, entity, id).await
    }

    /// Projection of one row, NotFound when absent.
    pub async fn read(
        session: &mut Session,
        entity: &'static EntityDef,
        id: i32,
    ) -> Result<Value, AppError> {
        session
            .get(entity, id)
            .await?
            .ok_or_else(|| AppError::not_found(entity))
    }

    /// Overwrite the given fields and return the merged projection.
    pub async fn update(
        session: &mut Session,
        entity: &'static EntityDef,
        id: i32,
        body: &Map<String, Value>,
    ) -> Result<Value, AppError> {
        let current = Self::read(session, entity, id).await?;
        let values = RequestValidator::validate_partial(entity, body)?;
        if values.is_empty() {
            return Ok(current);
        }
        session.add(Change::Update { entity, id, values });
        let written = session.commit().await?;
        if !matches!(written.first(), Some(Some(_))) {
            return Err(AppError::not_found(entity));
        }
        Self::read(session, entity, id).await
    }

    /// Remove one row. Owned rows go with it through the cascading foreign key.
    pub async fn delete(
        session: &mut Session,
        entity: &'static EntityDef,
        id: i32,
    ) -> Result<(), AppError> {
        Self::read(session, entity, id).await?;
        session.delete(entity, id);
        let written = session.commit().await?;
        if !matches!(written.first(), Some(Some(_))) {
            return Err(AppError::not_found(entity));
        }
        tracing::info!(entity = entity.name, id, "deleted");
        Ok(())
    }
}
