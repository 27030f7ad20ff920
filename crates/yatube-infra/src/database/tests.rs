use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

use yatube_core::domain::{Group, Post};
use yatube_core::pagination::PageRequest;
use yatube_core::ports::{BaseRepository, GroupRepository, PostFilter, PostRepository};

use crate::database::entity::{group, post};
use crate::database::postgres_repo::{PostgresGroupRepository, PostgresPostRepository};

fn post_model(author_id: Uuid, group_id: Option<Uuid>, text: &str) -> post::Model {
    post::Model {
        id: Uuid::new_v4(),
        text: text.to_owned(),
        pub_date: chrono::Utc::now().into(),
        author_id,
        group_id,
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let author_id = Uuid::new_v4();
    let model = post_model(author_id, None, "Тест-пост");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
    assert_eq!(post.to_string(), "Тест-пост");
}

#[tokio::test]
async fn test_find_group_by_slug() {
    let model = group::Model {
        id: Uuid::new_v4(),
        title: "Тест-группа".to_owned(),
        slug: "test-slug".to_owned(),
        description: "Тест-описание".to_owned(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model.clone()]])
        .into_connection();

    let repo = PostgresGroupRepository::new(db);
    let group: Group = repo.find_by_slug("test-slug").await.unwrap().unwrap();

    assert_eq!(group.id, model.id);
    assert_eq!(group.to_string(), "Тест-группа");
}

#[tokio::test]
async fn test_find_page_clamps_to_last_page() {
    let author_id = Uuid::new_v4();
    let rows: Vec<post::Model> = (0..5)
        .map(|i| post_model(author_id, None, &format!("{i} пост")))
        .collect();

    // Count query first, then the page itself.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(15)]])
        .append_query_results([rows])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let page = repo
        .find_page(PostFilter::Author(author_id), PageRequest::new(7, 10))
        .await
        .unwrap();

    assert_eq!(page.number, 2);
    assert_eq!(page.total, 15);
    assert_eq!(page.len(), 5);
    assert!(!page.has_next());
}
