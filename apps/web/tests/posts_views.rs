//! Context contents and pagination of the post pages.

mod common;

use actix_web::test;

use yatube_shared::dto::{FormView, GroupView, PageView, PostView, UserView};

use common::{TestApp, page};

/// GET `$uri` and decode the page.
macro_rules! get {
    ($app:expr, $uri:expr) => {
        page(test::call_service($app, test::TestRequest::get().uri($uri).to_request()).await).await
    };
}

#[actix_rt::test]
async fn test_index_lists_posts_newest_first() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    let older = ctx.post(&author, "Старый пост", None).await;
    let newer = ctx.post(&author, "Новый пост", Some(&group)).await;
    assert!(newer.pub_date > older.pub_date);
    let app = test::init_service(ctx.app()).await;

    let body = get!(&app, "/");
    let page_obj: PageView<PostView> = body.get("page_obj").unwrap();

    assert_eq!(page_obj.count, 2);
    assert_eq!(page_obj.object_list[0].text, "Новый пост");
    assert_eq!(page_obj.object_list[0].author.username, "auth");
    assert_eq!(
        page_obj.object_list[0].group.as_ref().map(|g| g.slug.as_str()),
        Some("test-slug")
    );
}

#[actix_rt::test]
async fn test_group_list_context() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    ctx.post(&author, "Тестовый пост", Some(&group)).await;
    let app = test::init_service(ctx.app()).await;

    let body = get!(&app, "/group/test-slug/");
    let group_view: GroupView = body.get("group").unwrap();
    let page_obj: PageView<PostView> = body.get("page_obj").unwrap();

    assert_eq!(group_view.title, "Тестовая группа");
    assert_eq!(group_view.description, "Тестовое описание");
    assert_eq!(page_obj.len(), 1);
    assert_eq!(page_obj.object_list[0].text, "Тестовый пост");
}

#[actix_rt::test]
async fn test_profile_context() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    ctx.post(&author, "Первый пост", None).await;
    ctx.post(&author, "Второй пост", None).await;
    let other = ctx.user("other").await;
    ctx.post(&other, "Чужой пост", None).await;
    let app = test::init_service(ctx.app()).await;

    let body = get!(&app, "/profile/auth/");
    let author_view: UserView = body.get("author").unwrap();
    let page_obj: PageView<PostView> = body.get("page_obj").unwrap();

    assert_eq!(author_view.username, "auth");
    assert_eq!(body.get::<u64>("posts_count"), Some(2));
    assert_eq!(page_obj.len(), 2);
    assert!(page_obj.object_list.iter().all(|p| p.author.id == author.id));
}

#[actix_rt::test]
async fn test_post_detail_context() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let post = ctx
        .post(&author, "Тестовый пост с длинным текстом", None)
        .await;
    ctx.post(&author, "Ещё один пост", None).await;
    let app = test::init_service(ctx.app()).await;

    let body = get!(&app, &format!("/posts/{}/", post.id));
    let post_view: PostView = body.get("post").unwrap();

    assert_eq!(post_view.id, post.id);
    assert_eq!(post_view.text, "Тестовый пост с длинным текстом");
    assert_eq!(post_view.short_text, "Тестовый пост с");
    assert_eq!(body.get::<u64>("author_posts_count"), Some(2));
}

#[actix_rt::test]
async fn test_create_form_context() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri("/create/")
        .cookie(ctx.session(&author))
        .to_request();
    let body = page(test::call_service(&app, req).await).await;
    let form: FormView = body.get("form").unwrap();

    assert_eq!(form.field("text").unwrap().kind, "char");
    let group_field = form.field("group").unwrap();
    assert_eq!(group_field.kind, "model_choice");
    assert_eq!(group_field.choices[0].value, group.id.to_string());
    assert_eq!(body.get::<bool>("is_edit"), None);
}

#[actix_rt::test]
async fn test_edit_form_context() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    let post = ctx.post(&author, "Тестовый пост", Some(&group)).await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/edit/", post.id))
        .cookie(ctx.session(&author))
        .to_request();
    let body = page(test::call_service(&app, req).await).await;
    let form: FormView = body.get("form").unwrap();

    assert_eq!(body.get::<bool>("is_edit"), Some(true));
    assert_eq!(body.get::<PostView>("post").unwrap().id, post.id);
    assert_eq!(
        form.field("text").unwrap().value.as_deref(),
        Some("Тестовый пост")
    );
    assert_eq!(form.field("group").unwrap().value, Some(group.id.to_string()));
}

#[actix_rt::test]
async fn test_post_appears_only_in_its_own_listings() {
    let ctx = TestApp::new();
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    ctx.group("Другая группа", "other-slug").await;
    let post = ctx.post(&author, "Тестовый пост", Some(&group)).await;
    let app = test::init_service(ctx.app()).await;

    for uri in ["/", "/group/test-slug/", "/profile/auth/"] {
        let page_obj: PageView<PostView> = get!(&app, uri).get("page_obj").unwrap();
        assert!(page_obj.object_list.iter().any(|p| p.id == post.id), "{uri}");
    }

    let page_obj: PageView<PostView> = get!(&app, "/group/other-slug/").get("page_obj").unwrap();
    assert!(page_obj.is_empty());
}

#[actix_rt::test]
async fn test_paginator_splits_listings() {
    let ctx = TestApp::with_page_size(10);
    let author = ctx.user("auth").await;
    let group = ctx.group("Тестовая группа", "test-slug").await;
    for i in 0..15 {
        ctx.post(&author, &format!("{i} тестовый пост"), Some(&group))
            .await;
    }
    let app = test::init_service(ctx.app()).await;

    for uri in ["/", "/group/test-slug/", "/profile/auth/"] {
        let first: PageView<PostView> = get!(&app, uri).get("page_obj").unwrap();
        assert_eq!(first.len(), 10, "{uri}");
        assert!(first.has_next);

        let second: PageView<PostView> = get!(&app, &format!("{uri}?page=2"))
            .get("page_obj")
            .unwrap();
        assert_eq!(second.len(), 5, "{uri}");
        assert_eq!(second.num_pages, 2);
        assert!(!second.has_next);
    }
}

#[actix_rt::test]
async fn test_paginator_tolerates_bad_page_numbers() {
    let ctx = TestApp::with_page_size(3);
    let author = ctx.user("auth").await;
    for i in 0..5 {
        ctx.post(&author, &format!("Пост {i}"), None).await;
    }
    let app = test::init_service(ctx.app()).await;

    let junk: PageView<PostView> = get!(&app, "/?page=abc").get("page_obj").unwrap();
    assert_eq!(junk.number, 1);
    assert_eq!(junk.per_page, 3);

    let past_end: PageView<PostView> = get!(&app, "/?page=99").get("page_obj").unwrap();
    assert_eq!(past_end.number, 2);
    assert_eq!(past_end.len(), 2);

    for uri in ["/?page=0", "/?page=-1"] {
        let below: PageView<PostView> = get!(&app, uri).get("page_obj").unwrap();
        assert_eq!(below.number, 2, "{uri}");
        assert_eq!(below.len(), 2, "{uri}");
    }
}
