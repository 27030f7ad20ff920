//! Shared fixtures for the HTTP tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, web};
use chrono::TimeDelta;

use yatube_core::domain::{Group, Post, User};
use yatube_core::ports::TokenPurpose;
use yatube_infra::{InMemoryMailer, JwtConfig};
use yatube_shared::TemplateResponse;
use yatube_web::middleware::auth::SESSION_COOKIE;
use yatube_web::{AppState, Settings, configure_routes};

pub const PASSWORD: &str = "test-password-42";

/// In-memory application plus handles the tests inspect directly.
pub struct TestApp {
    pub state: AppState,
    pub mailer: Arc<InMemoryMailer>,
    clock: AtomicI64,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_page_size(posts_per_page: u64) -> Self {
        Self::with_settings(Settings {
            posts_per_page,
            ..Settings::default()
        })
    }

    fn with_settings(settings: Settings) -> Self {
        let mailer = Arc::new(InMemoryMailer::new());
        let state = AppState::in_memory(settings, JwtConfig::default(), mailer.clone());
        Self {
            state,
            mailer,
            clock: AtomicI64::new(0),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Response = ServiceResponse<impl MessageBody + use<>>,
            Config = (),
            InitError = (),
            Error = actix_web::Error,
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .configure(configure_routes)
    }

    pub async fn user(&self, username: &str) -> User {
        let hash = self.state.passwords.hash(PASSWORD).unwrap();
        self.state
            .users
            .save(User::new(username.to_string(), hash))
            .await
            .unwrap()
    }

    pub async fn user_with_email(&self, username: &str, email: &str) -> User {
        let hash = self.state.passwords.hash(PASSWORD).unwrap();
        self.state
            .users
            .save(User::new(username.to_string(), hash).with_email(Some(email.to_string())))
            .await
            .unwrap()
    }

    pub async fn group(&self, title: &str, slug: &str) -> Group {
        self.state
            .groups
            .save(Group::new(
                title.to_string(),
                slug.to_string(),
                "Тестовое описание".to_string(),
            ))
            .await
            .unwrap()
    }

    /// Save a post. Each one is published a second after the previous.
    pub async fn post(&self, author: &User, text: &str, group: Option<&Group>) -> Post {
        let mut post = Post::new(author.id, text.to_string(), group.map(|g| g.id));
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        post.pub_date = post.pub_date - TimeDelta::hours(1) + TimeDelta::seconds(tick);
        self.state.posts.save(post).await.unwrap()
    }

    pub async fn post_count(&self) -> u64 {
        self.state
            .posts
            .count(yatube_core::ports::PostFilter::All)
            .await
            .unwrap()
    }

    /// Session cookie for `user`, as login would set it.
    pub fn session(&self, user: &User) -> Cookie<'static> {
        let token = self
            .state
            .tokens
            .generate_token(user, TokenPurpose::Session)
            .unwrap();
        Cookie::new(SESSION_COOKIE, token)
    }
}

pub fn location<B>(response: &ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn assert_redirect<B>(response: &ServiceResponse<B>, to: &str) {
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(response), to);
}

pub fn login_redirect(next: &str) -> String {
    format!("/auth/login/?next={next}")
}

pub async fn page<B: MessageBody>(response: ServiceResponse<B>) -> TemplateResponse {
    assert_eq!(response.status(), StatusCode::OK);
    actix_web::test::read_body_json(response).await
}
