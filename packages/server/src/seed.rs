use rand::Rng;
use rand::seq::IndexedRandom;
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::entity::blog_post::Comment;
use crate::repository::{self, NewAuthor, NewPost, PopulatedPost, RepositoryError};

const FIRST_NAMES: &[&str] = &[
    "Andy", "Mike", "Estevan", "Whitney", "Emauni", "Grace", "Linus", "Margaret", "Ken", "Barbara",
];

const LAST_NAMES: &[&str] = &[
    "Hopper", "Torvalds", "Hamilton", "Thompson", "Liskov", "Ritchie", "Knuth", "Lamport",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
];

fn words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .filter_map(|_| WORDS.choose(&mut *rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.random_range(3..8);
    let mut s = words(rng, count);
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s.push('.');
    s
}

fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.random_range(2..5);
    (0..count)
        .map(|_| sentence(&mut *rng))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate a post with a random author, title, body and up to three comments.
pub fn fake_post<R: Rng + ?Sized>(rng: &mut R) -> NewPost {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Andy");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Hopper");
    // Suffix keeps user names unique across seeded authors.
    let user_name = format!(
        "{}.{}.{}",
        first.to_lowercase(),
        last.to_lowercase(),
        &Uuid::new_v4().simple().to_string()[..8]
    );

    let comment_count = rng.random_range(0..=3);
    let comments = (0..comment_count)
        .map(|_| Comment {
            content: sentence(&mut *rng),
        })
        .collect();

    NewPost {
        title: sentence(rng),
        content: paragraph(rng),
        author: NewAuthor {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            user_name: Some(user_name),
        },
        created: None,
        comments,
    }
}

/// Insert `count` randomly generated posts, each with its own author.
pub async fn seed_posts(
    db: &DatabaseConnection,
    count: usize,
) -> Result<Vec<PopulatedPost>, RepositoryError> {
    let posts: Vec<NewPost> = {
        let mut rng = rand::rng();
        (0..count).map(|_| fake_post(&mut rng)).collect()
    };

    let mut inserted = Vec::with_capacity(count);
    for post in posts {
        inserted.push(repository::create_post(db, post).await?);
    }

    info!("Seeded {} blog posts", inserted.len());
    Ok(inserted)
}
