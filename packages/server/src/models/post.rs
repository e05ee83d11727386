use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::blog_post::Comment;
use crate::error::AppError;
use crate::repository::{AuthorChanges, NewAuthor, NewPost, PopulatedPost, PostChanges};

/// A comment as it appears in request and response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentBody {
    #[schema(example = "Great post!")]
    pub content: String,
}

/// Author fields sent with a post.
///
/// Accepts either an object with name parts or a single display name string.
/// A display name is split at the first whitespace into first and last name,
/// and always sets both: a single word leaves the last name empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AuthorInput {
    Name(String),
    Fields(AuthorFields),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFields {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    /// Must be unique across all authors.
    #[schema(example = "ada")]
    pub user_name: Option<String>,
}

impl AuthorInput {
    pub fn into_fields(self) -> AuthorFields {
        match self {
            AuthorInput::Fields(fields) => fields,
            AuthorInput::Name(name) => {
                let name = name.trim();
                let (first, last) = name
                    .split_once(char::is_whitespace)
                    .map(|(first, last)| (first, last.trim()))
                    .unwrap_or((name, ""));
                AuthorFields {
                    first_name: Some(first.to_string()),
                    last_name: Some(last.to_string()),
                    user_name: None,
                }
            }
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[schema(example = "Hello, world")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "Lorem ipsum dolor sit amet.")]
    pub content: String,
    pub author: AuthorInput,
    /// Defaults to the time of creation.
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<CommentBody>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    /// When present, must equal the id in the request path.
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorInput>,
    /// Replaces the whole comment list when present.
    pub comments: Option<Vec<CommentBody>>,
}

/// Externally visible shape of a post.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    /// Display name of the author: first and last name, trimmed.
    #[schema(example = "Ada Lovelace")]
    pub author: String,
    pub content: String,
    pub title: String,
    pub comments: Vec<CommentBody>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    pub blogposts: Vec<PostResponse>,
}

/// Join the name parts with a single space and trim the result, so that a
/// missing part leaves no stray whitespace.
pub fn author_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    format!(
        "{} {}",
        first_name.unwrap_or_default(),
        last_name.unwrap_or_default()
    )
    .trim()
    .to_string()
}

impl From<PopulatedPost> for PostResponse {
    fn from(populated: PopulatedPost) -> Self {
        let (post, author, comments) = populated.into_parts();
        let author = author
            .map(|a| author_name(a.first_name.as_deref(), a.last_name.as_deref()))
            .unwrap_or_default();

        Self {
            id: post.id,
            author,
            content: post.content,
            title: post.title,
            comments: comments.into_iter().map(CommentBody::from).collect(),
            created: post.created,
        }
    }
}

impl From<Comment> for CommentBody {
    fn from(c: Comment) -> Self {
        Self { content: c.content }
    }
}

impl From<CommentBody> for Comment {
    fn from(c: CommentBody) -> Self {
        Self { content: c.content }
    }
}

impl From<AuthorFields> for NewAuthor {
    fn from(f: AuthorFields) -> Self {
        Self {
            first_name: f.first_name,
            last_name: f.last_name,
            user_name: f.user_name,
        }
    }
}

impl From<AuthorFields> for AuthorChanges {
    fn from(f: AuthorFields) -> Self {
        Self {
            first_name: f.first_name,
            last_name: f.last_name,
            user_name: f.user_name,
        }
    }
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author.into_fields().into(),
            created: req.created,
            comments: req.comments.into_iter().map(Comment::from).collect(),
        }
    }
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author.map(|a| a.into_fields().into()),
            comments: req
                .comments
                .map(|list| list.into_iter().map(Comment::from).collect()),
        }
    }
}

/// PostgreSQL text columns cannot store U+0000.
fn validate_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.contains('\0') {
        return Err(AppError::Validation(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}

fn validate_author(author: &AuthorInput) -> Result<(), AppError> {
    match author {
        AuthorInput::Name(name) => validate_text("author", name),
        AuthorInput::Fields(fields) => {
            for (field, value) in [
                ("author.firstName", &fields.first_name),
                ("author.lastName", &fields.last_name),
                ("author.userName", &fields.user_name),
            ] {
                if let Some(value) = value {
                    validate_text(field, value)?;
                }
            }
            Ok(())
        }
    }
}

fn validate_comments(comments: &[CommentBody]) -> Result<(), AppError> {
    comments
        .iter()
        .try_for_each(|c| validate_text("comments.content", &c.content))
}

pub fn validate_create_post(req: &CreatePostRequest) -> Result<(), AppError> {
    validate_text("title", &req.title)?;
    validate_text("content", &req.content)?;
    validate_author(&req.author)?;
    validate_comments(&req.comments)
}

pub fn validate_update_post(path_id: Uuid, req: &UpdatePostRequest) -> Result<(), AppError> {
    if let Some(body_id) = req.id
        && body_id != path_id
    {
        return Err(AppError::Validation(format!(
            "Request path id ({path_id}) and request body id ({body_id}) values must match"
        )));
    }
    if let Some(title) = &req.title {
        validate_text("title", title)?;
    }
    if let Some(content) = &req.content {
        validate_text("content", content)?;
    }
    if let Some(author) = &req.author {
        validate_author(author)?;
    }
    if let Some(comments) = &req.comments {
        validate_comments(comments)?;
    }
    Ok(())
}

/// Parse a post id from the request path. Anything that is not a UUID cannot
/// name a stored post, so it is reported as not found.
pub fn parse_post_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Post not found".into()))
}
