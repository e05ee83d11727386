//! Storage operations for posts and authors.
//!
//! Every read path goes through [`posts::find_posts`] or [`posts::find_post`],
//! both of which resolve the author reference before returning. Nothing
//! outside this module can build a [`PopulatedPost`].

pub mod authors;
pub mod posts;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub use authors::{AuthorChanges, NewAuthor, create_author};
pub use posts::{
    NewPost, PopulatedPost, PostChanges, count_posts, create_post, delete_post, find_post,
    find_posts, update_post,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("User name is already taken")]
    UsernameTaken,

    #[error("Document not found")]
    NotFound,

    #[error("Stored comments are malformed: {0}")]
    InvalidComments(#[from] serde_json::Error),
}

/// Map a write error, turning unique-constraint violations into `UsernameTaken`.
///
/// `author.user_name` is the only unique column besides primary keys.
pub(crate) fn map_write_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique constraint rejected author write: {detail}");
            RepositoryError::UsernameTaken
        }
        _ => RepositoryError::Database(err),
    }
}
