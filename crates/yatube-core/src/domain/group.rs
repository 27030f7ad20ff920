use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldMeta, lookup_field};

/// Maximum length of a group title.
pub const GROUP_TITLE_MAX_LEN: usize = 200;

/// Maximum length of a group slug.
pub const GROUP_SLUG_MAX_LEN: usize = 50;

/// Group entity - a community posts can be tagged to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl Group {
    pub const FIELDS: &'static [FieldMeta] = &[
        FieldMeta {
            name: "title",
            verbose_name: "Имя группы",
            help_text: "",
        },
        FieldMeta {
            name: "slug",
            verbose_name: "Адрес",
            help_text: "",
        },
        FieldMeta {
            name: "description",
            verbose_name: "Описание группы",
            help_text: "",
        },
    ];

    pub fn new(title: String, slug: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
        }
    }

    pub fn field(name: &str) -> Option<&'static FieldMeta> {
        lookup_field(Self::FIELDS, name)
    }

    /// ASCII letters, digits, hyphens and underscores, at most 50 of them.
    pub fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty()
            && slug.len() <= GROUP_SLUG_MAX_LEN
            && slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_title() {
        let group = Group::new("Тест-группа".into(), "test".into(), "Тест-описание".into());
        assert_eq!(group.to_string(), "Тест-группа");
    }

    #[test]
    fn test_verbose_names() {
        let expected = [
            ("title", "Имя группы"),
            ("slug", "Адрес"),
            ("description", "Описание группы"),
        ];
        for (field, verbose_name) in expected {
            assert_eq!(Group::field(field).map(|f| f.verbose_name), Some(verbose_name));
        }
        assert!(Group::field("missing").is_none());
    }

    #[test]
    fn test_slug_rules() {
        assert!(Group::is_valid_slug("test-slug_2"));
        assert!(!Group::is_valid_slug("Тест-слаг"));
        assert!(!Group::is_valid_slug("with space"));
        assert!(!Group::is_valid_slug(""));
        assert!(!Group::is_valid_slug(&"a".repeat(51)));
    }
}
