//! Context views - what a page template receives.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A post with its author and group resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub text: String,
    /// First 15 characters of the text.
    pub short_text: String,
    pub pub_date: DateTime<Utc>,
    pub author: UserView,
    pub group: Option<GroupView>,
}

/// One page of a listing (`page_obj`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView<T> {
    pub object_list: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageView<T> {
    pub fn len(&self) -> usize {
        self.object_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_list.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldView {
    pub name: String,
    /// `char`, `model_choice`, `email` or `password`.
    pub kind: String,
    pub label: String,
    pub help_text: String,
    pub required: bool,
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceView>,
}

/// A form as shown to the user: its fields, submitted values and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub fields: Vec<FormFieldView>,
    pub is_bound: bool,
    pub errors: BTreeMap<String, Vec<String>>,
    pub non_field_errors: Vec<String>,
}

impl FormView {
    pub fn field(&self, name: &str) -> Option<&FormFieldView> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.non_field_errors.is_empty()
    }
}
