use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use super::authors::{AuthorChanges, NewAuthor, apply_author_changes, create_author};
use super::RepositoryError;
use crate::entity::blog_post::Comment;
use crate::entity::{author, blog_post};

/// A post whose author reference has already been resolved.
///
/// `author` is `None` when the referenced author no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedPost {
    post: blog_post::Model,
    author: Option<author::Model>,
    comments: Vec<Comment>,
}

impl PopulatedPost {
    pub(crate) fn new(
        post: blog_post::Model,
        author: Option<author::Model>,
    ) -> Result<Self, RepositoryError> {
        let comments = decode_comments(&post.comments)?;
        Ok(Self {
            post,
            author,
            comments,
        })
    }

    pub fn post(&self) -> &blog_post::Model {
        &self.post
    }

    pub fn author(&self) -> Option<&author::Model> {
        self.author.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn into_parts(self) -> (blog_post::Model, Option<author::Model>, Vec<Comment>) {
        (self.post, self.author, self.comments)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: NewAuthor,
    /// Defaults to the time of insertion.
    pub created: Option<DateTime<Utc>>,
    pub comments: Vec<Comment>,
}

/// Partial update of a post. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorChanges>,
    /// Replaces the whole comment list when present.
    pub comments: Option<Vec<Comment>>,
}

fn decode_comments(value: &serde_json::Value) -> Result<Vec<Comment>, RepositoryError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value.clone())?)
}

fn encode_comments(comments: &[Comment]) -> Result<serde_json::Value, RepositoryError> {
    Ok(serde_json::to_value(comments)?)
}

/// Fetch all posts matching `condition`, oldest first, with authors resolved.
///
/// Issues one query for the posts and one for all referenced authors.
#[instrument(skip(db, condition))]
pub async fn find_posts<C: ConnectionTrait>(
    db: &C,
    condition: Condition,
) -> Result<Vec<PopulatedPost>, RepositoryError> {
    let posts = blog_post::Entity::find()
        .filter(condition)
        .order_by_asc(blog_post::Column::Created)
        .order_by_asc(blog_post::Column::Id)
        .all(db)
        .await?;

    populate(db, posts).await
}

/// Fetch one post with its author resolved.
#[instrument(skip(db))]
pub async fn find_post<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<PopulatedPost>, RepositoryError> {
    let Some(post) = blog_post::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    Ok(populate(db, vec![post]).await?.pop())
}

/// Resolve the author of every post with one query. A missing author is
/// logged and left as `None`.
async fn populate<C: ConnectionTrait>(
    db: &C,
    posts: Vec<blog_post::Model>,
) -> Result<Vec<PopulatedPost>, RepositoryError> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let author_ids: BTreeSet<Uuid> = posts.iter().map(|p| p.author_id).collect();
    let authors: HashMap<Uuid, author::Model> = author::Entity::find()
        .filter(author::Column::Id.is_in(author_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    posts
        .into_iter()
        .map(|post| {
            let author = authors.get(&post.author_id).cloned();
            if author.is_none() {
                tracing::warn!(
                    post_id = %post.id,
                    author_id = %post.author_id,
                    "Post references a missing author"
                );
            }
            PopulatedPost::new(post, author)
        })
        .collect()
}

pub async fn count_posts<C: ConnectionTrait>(db: &C) -> Result<u64, RepositoryError> {
    Ok(blog_post::Entity::find().count(db).await?)
}

/// Insert the author and the post in a single transaction.
#[instrument(skip(db, new), fields(title = %new.title))]
pub async fn create_post(
    db: &DatabaseConnection,
    new: NewPost,
) -> Result<PopulatedPost, RepositoryError> {
    let comments = encode_comments(&new.comments)?;

    let txn = db.begin().await?;

    let author = create_author(&txn, new.author).await?;

    let post = blog_post::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(new.title),
        content: Set(new.content),
        author_id: Set(author.id),
        comments: Set(comments),
        created: Set(new.created.unwrap_or_else(Utc::now)),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::debug!(post_id = %post.id, author_id = %author.id, "Created post");
    PopulatedPost::new(post, Some(author))
}

/// Apply `changes` to the post and its author in a single transaction.
///
/// Author fields update the referenced author in place. If the reference
/// dangles, a new author is created and the post is re-pointed at it.
#[instrument(skip(db, changes))]
pub async fn update_post(
    db: &DatabaseConnection,
    id: Uuid,
    changes: PostChanges,
) -> Result<(), RepositoryError> {
    let txn = db.begin().await?;

    let post = blog_post::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(RepositoryError::NotFound)?;
    let author_id = post.author_id;
    let mut active: blog_post::ActiveModel = post.into();

    if let Some(author_changes) = changes.author {
        match author::Entity::find_by_id(author_id).one(&txn).await? {
            Some(existing) => {
                apply_author_changes(&txn, existing, author_changes).await?;
            }
            None => {
                let created = create_author(&txn, author_changes.into()).await?;
                tracing::info!(
                    post_id = %id,
                    old_author_id = %author_id,
                    new_author_id = %created.id,
                    "Replaced missing author"
                );
                active.author_id = Set(created.id);
            }
        }
    }

    if let Some(title) = changes.title {
        active.title = Set(title);
    }
    if let Some(content) = changes.content {
        active.content = Set(content);
    }
    if let Some(comments) = changes.comments {
        active.comments = Set(encode_comments(&comments)?);
    }

    if active.is_changed() {
        active.update(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
}

#[instrument(skip(db))]
pub async fn delete_post<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), RepositoryError> {
    let result = blog_post::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
