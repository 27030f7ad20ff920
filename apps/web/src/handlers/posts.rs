//! Post pages: listings, detail, create and edit.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use yatube_core::domain::Post;
use yatube_core::error::DomainError;
use yatube_core::forms::{FormErrors, PostForm};
use yatube_core::pagination::PageRequest;
use yatube_core::ports::PostFilter;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::render::{Template, redirect};
use crate::state::AppState;
use crate::{urls, views};

const INDEX_TEMPLATE: &str = "posts/index.html";
const GROUP_LIST_TEMPLATE: &str = "posts/group_list.html";
const PROFILE_TEMPLATE: &str = "posts/profile.html";
const POST_DETAIL_TEMPLATE: &str = "posts/post_detail.html";
const POST_FORM_TEMPLATE: &str = "posts/create_post.html";

/// `?page=` of a listing. Kept raw so junk values fall back to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    fn request(&self, state: &AppState) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), state.settings.posts_per_page)
    }
}

/// Post ids are UUIDs; anything else names no post.
fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| DomainError::not_found("Post", raw).into())
}

async fn load_post(state: &AppState, raw_id: &str) -> AppResult<Post> {
    let post_id = parse_post_id(raw_id)?;
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id).into())
}

/// Every post, newest first.
///
/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .find_page(PostFilter::All, query.request(&state))
        .await?;

    Ok(Template::new(INDEX_TEMPLATE)
        .with("page_obj", views::post_page(&state, page).await?)?
        .render())
}

/// Posts of one group.
///
/// GET /group/{slug}/
pub async fn group_list(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| DomainError::not_found("Group", &slug))?;

    let page = state
        .posts
        .find_page(PostFilter::Group(group.id), query.request(&state))
        .await?;

    Ok(Template::new(GROUP_LIST_TEMPLATE)
        .with("group", views::group_view(&group))?
        .with("page_obj", views::post_page(&state, page).await?)?
        .render())
}

/// Posts of one author.
///
/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::not_found("User", &username))?;

    let page = state
        .posts
        .find_page(PostFilter::Author(author.id), query.request(&state))
        .await?;

    Ok(Template::new(PROFILE_TEMPLATE)
        .with("author", views::user_view(&author))?
        .with("posts_count", page.total)?
        .with("page_obj", views::post_page(&state, page).await?)?
        .render())
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = load_post(&state, &path).await?;
    let author_posts_count = state.posts.count(PostFilter::Author(post.author_id)).await?;
    let post = single_view(&state, post).await?;

    Ok(Template::new(POST_DETAIL_TEMPLATE)
        .with("post", post)?
        .with("author_posts_count", author_posts_count)?
        .render())
}

async fn single_view(state: &AppState, post: Post) -> AppResult<yatube_shared::dto::PostView> {
    let post_id = post.id;
    views::hydrate(state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal(format!("post {post_id} could not be rendered")))
}

/// Render the post form, possibly with the errors of a rejected submission.
async fn post_form_page(
    state: &AppState,
    form: &PostForm,
    bound: bool,
    errors: Option<&FormErrors>,
) -> AppResult<Template> {
    let groups = state.groups.list().await?;
    Template::new(POST_FORM_TEMPLATE)
        .with("form", views::form_view(form, bound, errors, &groups))
}

/// GET /create/
pub async fn post_create_form(
    _identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    Ok(post_form_page(&state, &PostForm::default(), false, None)
        .await?
        .render())
}

/// Publish a post as the current user, then show their profile.
///
/// POST /create/
pub async fn post_create(
    identity: Identity,
    state: web::Data<AppState>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let groups = state.groups.list().await?;

    let cleaned = match form.clean(&groups) {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            tracing::debug!(user = %identity.username, "Rejected post form");
            return Ok(post_form_page(&state, &form, true, Some(&errors))
                .await?
                .render());
        }
    };

    let post = state
        .posts
        .save(Post::new(identity.user_id, cleaned.text, cleaned.group_id))
        .await?;

    tracing::info!(post_id = %post.id, author = %identity.username, "Post created");
    Ok(redirect(urls::profile(&identity.username)))
}

/// Load a post for editing. Someone other than the author is sent to the
/// post's page instead.
async fn editable_post(
    identity: &Identity,
    state: &AppState,
    raw_id: &str,
) -> AppResult<Result<Post, HttpResponse>> {
    let post = load_post(state, raw_id).await?;
    if post.is_authored_by(identity.user_id) {
        Ok(Ok(post))
    } else {
        tracing::debug!(post_id = %post.id, user = %identity.username, "Edit by non-author refused");
        Ok(Err(redirect(urls::post_detail(post.id))))
    }
}

/// GET /posts/{post_id}/edit/
pub async fn post_edit_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = match editable_post(&identity, &state, &path).await? {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    let form = PostForm::from_post(&post);
    let page = post_form_page(&state, &form, false, None).await?;
    Ok(page
        .with("is_edit", true)?
        .with("post", single_view(&state, post).await?)?
        .render())
}

/// Update a post in place, then show it.
///
/// POST /posts/{post_id}/edit/
pub async fn post_edit(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let mut post = match editable_post(&identity, &state, &path).await? {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    let form = form.into_inner();
    let groups = state.groups.list().await?;

    let cleaned = match form.clean(&groups) {
        Ok(cleaned) => cleaned,
        Err(errors) => {
            let page = post_form_page(&state, &form, true, Some(&errors)).await?;
            return Ok(page
                .with("is_edit", true)?
                .with("post", single_view(&state, post).await?)?
                .render());
        }
    };

    post.text = cleaned.text;
    post.group_id = cleaned.group_id;
    let post = state.posts.save(post).await?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(redirect(urls::post_detail(post.id)))
}
