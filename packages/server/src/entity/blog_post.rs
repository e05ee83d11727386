use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A comment embedded in its post. Stored inside the `comments` JSON array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub content: String,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Reference to `author.id`. No foreign key: the author may be gone.
    #[sea_orm(indexed)]
    pub author_id: Uuid,

    /// Comments in insertion order, stored as a JSON array of `{content}` objects.
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: serde_json::Value,

    pub created: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
