//! Conversions from domain entities to the context views pages receive.

use std::collections::HashMap;

use uuid::Uuid;

use yatube_core::domain::{Group, Post, User};
use yatube_core::forms::{FieldKind, Form, FormErrors};
use yatube_core::pagination::Page;
use yatube_shared::dto::{
    ChoiceView, FormFieldView, FormView, GroupView, PageView, PostView, UserView,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub fn user_view(user: &User) -> UserView {
    UserView {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        full_name: user.full_name(),
    }
}

pub fn group_view(group: &Group) -> GroupView {
    GroupView {
        id: group.id,
        title: group.title.clone(),
        slug: group.slug.clone(),
        description: group.description.clone(),
    }
}

pub fn post_view(post: &Post, author: &User, group: Option<&Group>) -> PostView {
    PostView {
        id: post.id,
        text: post.text.clone(),
        short_text: post.short_text().to_string(),
        pub_date: post.pub_date,
        author: user_view(author),
        group: group.map(group_view),
    }
}

/// Resolve authors and groups for a batch of posts, loading each distinct
/// one once.
pub async fn hydrate(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostView>> {
    let mut authors: HashMap<Uuid, User> = HashMap::new();
    let mut groups: HashMap<Uuid, Option<Group>> = HashMap::new();

    for post in &posts {
        if !authors.contains_key(&post.author_id) {
            let author = state.users.find_by_id(post.author_id).await?.ok_or_else(|| {
                AppError::Internal(format!("author {} of post {} is missing", post.author_id, post.id))
            })?;
            authors.insert(post.author_id, author);
        }
        if let Some(group_id) = post.group_id {
            if !groups.contains_key(&group_id) {
                let group = state.groups.find_by_id(group_id).await?;
                groups.insert(group_id, group);
            }
        }
    }

    Ok(posts
        .iter()
        .filter_map(|post| {
            let author = authors.get(&post.author_id)?;
            let group = post
                .group_id
                .and_then(|id| groups.get(&id))
                .and_then(Option::as_ref);
            Some(post_view(post, author, group))
        })
        .collect())
}

/// `page_obj` for a page of posts.
pub async fn post_page(state: &AppState, page: Page<Post>) -> AppResult<PageView<PostView>> {
    let num_pages = page.num_pages();
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let (number, per_page, count) = (page.number, page.per_page, page.total);

    Ok(PageView {
        object_list: hydrate(state, page.items).await?,
        number,
        num_pages,
        count,
        per_page,
        has_next,
        has_previous,
    })
}

/// Context view of a form. `groups` fills the choices of model choice
/// fields; `bound` is whether the form holds submitted data.
pub fn form_view<F: Form>(
    form: &F,
    bound: bool,
    errors: Option<&FormErrors>,
    groups: &[Group],
) -> FormView {
    let fields = F::fields()
        .into_iter()
        .map(|spec| {
            let choices = match spec.kind {
                FieldKind::ModelChoice => groups
                    .iter()
                    .map(|g| ChoiceView {
                        value: g.id.to_string(),
                        label: g.title.clone(),
                    })
                    .collect(),
                _ => Vec::new(),
            };
            FormFieldView {
                name: spec.name.to_string(),
                kind: field_kind_name(spec.kind).to_string(),
                label: spec.label.to_string(),
                help_text: spec.help_text.to_string(),
                required: spec.required,
                value: form.value(spec.name),
                choices,
            }
        })
        .collect();

    FormView {
        fields,
        is_bound: bound,
        errors: errors.map(|e| e.fields.clone()).unwrap_or_default(),
        non_field_errors: errors.map(|e| e.non_field.clone()).unwrap_or_default(),
    }
}

fn field_kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Char => "char",
        FieldKind::ModelChoice => "model_choice",
        FieldKind::Email => "email",
        FieldKind::Password => "password",
    }
}
