//! Read path over the contact mirror. The mirror is written only by the
//! reconciler; these queries are read-only.

use sea_orm::{ConnectionTrait, EntityTrait};

use crate::entities::contacts;
use crate::error::AppError;

/// Every mirrored contact, in stable but unspecified order.
pub async fn list_contacts(conn: &impl ConnectionTrait) -> Result<Vec<contacts::Model>, AppError> {
    contacts::Entity::find()
        .all(conn)
        .await
        .map_err(AppError::from)
}

/// Point lookup by directory id.
pub async fn get_contact(
    conn: &impl ConnectionTrait,
    id: i64,
) -> Result<contacts::Model, AppError> {
    contacts::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("CONTACT_NOT_FOUND", format!("Contact {id} not found")))
}
