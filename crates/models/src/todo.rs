use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const CONTENT_MIN_CHARS: usize = 3;
pub const CONTENT_MAX_CHARS: usize = 54;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub content: String,
    pub is_completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Content must be 3..=54 characters.
pub fn validate_content(content: &str) -> Result<(), errors::ModelError> {
    let len = content.chars().count();
    if !(CONTENT_MIN_CHARS..=CONTENT_MAX_CHARS).contains(&len) {
        return Err(errors::ModelError::Validation(format!(
            "content must be {CONTENT_MIN_CHARS} to {CONTENT_MAX_CHARS} characters, got {len}"
        )));
    }
    Ok(())
}

/// Insert a todo and return it with the database-assigned id.
pub async fn create(
    db: &DatabaseConnection,
    content: &str,
    is_completed: bool,
) -> Result<Model, errors::ModelError> {
    validate_content(content)?;
    let am = ActiveModel {
        content: Set(content.to_string()),
        is_completed: Set(is_completed),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite content and is_completed in place; id is never touched.
/// Returns `None` when no row has that id.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    content: &str,
    is_completed: bool,
) -> Result<Option<Model>, errors::ModelError> {
    validate_content(content)?;
    let Some(found) = get(db, id).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.content = Set(content.to_string());
    am.is_completed = Set(is_completed);
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Hard delete by id; `false` when no row matched.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
