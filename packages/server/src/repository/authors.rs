use sea_orm::*;
use uuid::Uuid;

use super::{RepositoryError, map_write_err};
use crate::entity::author;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

/// Fields to overwrite on an existing author. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl From<AuthorChanges> for NewAuthor {
    fn from(c: AuthorChanges) -> Self {
        Self {
            first_name: c.first_name,
            last_name: c.last_name,
            user_name: c.user_name,
        }
    }
}

pub async fn create_author<C: ConnectionTrait>(
    db: &C,
    new: NewAuthor,
) -> Result<author::Model, RepositoryError> {
    let model = author::ActiveModel {
        id: Set(Uuid::now_v7()),
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        user_name: Set(new.user_name),
    };

    model.insert(db).await.map_err(map_write_err)
}

pub(crate) async fn apply_author_changes<C: ConnectionTrait>(
    db: &C,
    existing: author::Model,
    changes: AuthorChanges,
) -> Result<author::Model, RepositoryError> {
    let mut active: author::ActiveModel = existing.clone().into();

    if let Some(first_name) = changes.first_name {
        active.first_name = Set(Some(first_name));
    }
    if let Some(last_name) = changes.last_name {
        active.last_name = Set(Some(last_name));
    }
    if let Some(user_name) = changes.user_name {
        active.user_name = Set(Some(user_name));
    }

    if !active.is_changed() {
        return Ok(existing);
    }

    active.update(db).await.map_err(map_write_err)
}
