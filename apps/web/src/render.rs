//! Page responses: a template name plus its context, serialized as JSON.

use actix_web::{HttpResponse, http::header};
use serde::Serialize;
use serde_json::{Map, Value};
use yatube_shared::TemplateResponse;

use crate::middleware::error::{AppError, AppResult};

/// Builder for a template response.
#[derive(Debug)]
pub struct Template {
    name: &'static str,
    context: Map<String, Value>,
}

impl Template {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            context: Map::new(),
        }
    }

    /// Add a context entry. A value that cannot be serialized fails the
    /// whole page.
    pub fn with(mut self, key: &str, value: impl Serialize) -> AppResult<Self> {
        let value = serde_json::to_value(value).map_err(|e| {
            AppError::Internal(format!(
                "context entry `{key}` of {} failed to serialize: {e}",
                self.name
            ))
        })?;
        self.context.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn into_response(self) -> TemplateResponse {
        TemplateResponse {
            template: self.name.to_string(),
            context: self.context,
        }
    }

    /// 200 OK with the rendered page.
    pub fn render(self) -> HttpResponse {
        HttpResponse::Ok().json(self.into_response())
    }
}

/// 302 Found to `location`.
pub fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}
