use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Unique when present; any number of authors may leave it unset.
    #[sea_orm(unique)]
    pub user_name: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
