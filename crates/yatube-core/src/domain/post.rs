use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldMeta, lookup_field};

/// Number of characters of `text` in a post's short form.
pub const POST_STR_LEN: usize = 15;

/// Post entity - an authored text entry, optionally tagged to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
}

impl Post {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta {
            name: "text",
            verbose_name: "Запись",
            help_text: "Введите текст поста",
        },
        FieldMeta {
            name: "pub_date",
            verbose_name: "Дата публикации",
            help_text: "",
        },
        FieldMeta {
            name: "author",
            verbose_name: "Автор",
            help_text: "",
        },
        FieldMeta {
            name: "group",
            verbose_name: "Группа",
            help_text: "Группа, к которой будет относиться пост",
        },
    ];

    /// Create a new post published now.
    pub fn new(author_id: Uuid, text: String, group_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            pub_date: Utc::now(),
            author_id,
            group_id,
        }
    }

    pub fn field(name: &str) -> Option<&'static FieldMeta> {
        lookup_field(Self::FIELDS, name)
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// First [`POST_STR_LEN`] characters of the text.
    pub fn short_text(&self) -> &str {
        match self.text.char_indices().nth(POST_STR_LEN) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_text())
    }
}
