//! Creating and editing posts through the form.

mod common;

use actix_web::test;

use yatube_core::forms::messages;
use yatube_shared::dto::FormView;

use common::{TestApp, assert_redirect, login_redirect, page};

#[actix_rt::test]
async fn test_create_post_redirects_to_profile() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    let app = test::init_service(ctx.app()).await;
    let before = ctx.post_count().await;

    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(ctx.session(&author))
        .set_form([
            ("text", "Тестовый пост из формы"),
            ("group", group.id.to_string().as_str()),
        ])
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_redirect(&response, "/profile/auth/");
    assert_eq!(ctx.post_count().await, before + 1);

    let body = page(
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await,
    )
    .await;
    let page_obj: yatube_shared::dto::PageView<yatube_shared::dto::PostView> =
        body.get("page_obj").unwrap();
    let created = &page_obj.object_list[0];
    assert_eq!(created.text, "Тестовый пост из формы");
    assert_eq!(created.author.id, author.id);
    assert_eq!(created.group.as_ref().map(|g| g.id), Some(group.id));
}

#[actix_rt::test]
async fn test_anonymous_create_saves_nothing() {
    let ctx = TestApp::new();
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/create/")
        .set_form([("text", "Анонимный пост")])
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_redirect(&response, &login_redirect("/create/"));
    assert_eq!(ctx.post_count().await, 0);
}

#[actix_rt::test]
async fn test_invalid_form_is_redisplayed() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(ctx.session(&author))
        .set_form([("text", "   "), ("group", "")])
        .to_request();
    let body = page(test::call_service(&app, req).await).await;
    let form: FormView = body.get("form").unwrap();

    assert_eq!(body.template, "posts/create_post.html");
    assert!(form.is_bound);
    assert_eq!(form.errors["text"], [messages::REQUIRED]);
    assert_eq!(ctx.post_count().await, 0);
}

#[actix_rt::test]
async fn test_unknown_group_is_rejected() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let app = test::init_service(ctx.app()).await;

    let missing = uuid::Uuid::new_v4().to_string();
    let req = test::TestRequest::post()
        .uri("/create/")
        .cookie(ctx.session(&author))
        .set_form([("text", "Текст"), ("group", missing.as_str())])
        .to_request();
    let body = page(test::call_service(&app, req).await).await;
    let form: FormView = body.get("form").unwrap();

    assert_eq!(form.errors["group"], [messages::INVALID_CHOICE]);
    assert_eq!(form.field("text").unwrap().value.as_deref(), Some("Текст"));
    assert_eq!(ctx.post_count().await, 0);
}

#[actix_rt::test]
async fn test_author_edits_post_in_place() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    let post = ctx.post(&author, "Исходный текст", Some(&group)).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", post.id))
        .cookie(ctx.session(&author))
        .set_form([("text", "Изменённый текст"), ("group", "")])
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_redirect(&response, &format!("/posts/{}/", post.id));
    assert_eq!(ctx.post_count().await, 1);

    let stored = ctx.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Изменённый текст");
    assert_eq!(stored.group_id, None);
    assert_eq!(stored.author_id, author.id);
    assert_eq!(stored.pub_date, post.pub_date);
}

#[actix_rt::test]
async fn test_non_author_cannot_edit() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let other = ctx.user("not_author").await;
    let post = ctx.post(&author, "Исходный текст", None).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/edit/", post.id))
        .cookie(ctx.session(&other))
        .set_form([("text", "Чужая правка")])
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_redirect(&response, &format!("/posts/{}/", post.id));
    let stored = ctx.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Исходный текст");
}

#[actix_rt::test]
async fn test_anonymous_edit_saves_nothing() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let post = ctx.post(&author, "Исходный текст", None).await;
    let app = test::init_service(ctx.app()).await;

    let uri = format!("/posts/{}/edit/", post.id);
    let req = test::TestRequest::post()
        .uri(&uri)
        .set_form([("text", "Анонимная правка")])
        .to_request();
    let response = test::call_service(&app, req).await;

    assert_redirect(&response, &login_redirect(&uri));
    let stored = ctx.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "Исходный текст");
    assert_eq!(ctx.post_count().await, 1);
}
