pub mod author;
pub mod blog_post;
