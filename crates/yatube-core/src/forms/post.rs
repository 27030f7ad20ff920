use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldKind, FieldSpec, Form, FormErrors, messages, required};
use crate::domain::{Group, Post};

/// Create/edit form for a post: required text and an optional group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
}

/// Values of a valid [`PostForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedPost {
    pub text: String,
    pub group_id: Option<Uuid>,
}

impl Form for PostForm {
    fn fields() -> Vec<FieldSpec> {
        let mut fields = Vec::with_capacity(2);
        if let Some(meta) = Post::field("text") {
            fields.push(FieldSpec::from_meta(meta, FieldKind::Char, true));
        }
        if let Some(meta) = Post::field("group") {
            fields.push(FieldSpec::from_meta(meta, FieldKind::ModelChoice, false));
        }
        fields
    }

    fn value(&self, field: &str) -> Option<String> {
        match field {
            "text" => Some(self.text.clone()),
            "group" => self.group.clone().filter(|g| !g.is_empty()),
            _ => None,
        }
    }
}

impl PostForm {
    /// Form pre-filled with a post's current values.
    pub fn from_post(post: &Post) -> Self {
        Self {
            text: post.text.clone(),
            group: post.group_id.map(|id| id.to_string()),
        }
    }

    /// Validate against the groups a post may be tagged to.
    pub fn clean(&self, groups: &[Group]) -> Result<CleanedPost, FormErrors> {
        let mut errors = FormErrors::new();
        let text = required(&mut errors, "text", &self.text);

        let group_id = match self.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let found = Uuid::parse_str(raw)
                    .ok()
                    .filter(|id| groups.iter().any(|g| g.id == *id));
                if found.is_none() {
                    errors.add("group", messages::INVALID_CHOICE);
                }
                found
            }
        };

        errors.into_result(CleanedPost { text, group_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::new("Тест-группа".into(), "test-slug".into(), "Тест-описание".into())
    }

    #[test]
    fn test_fields_are_text_and_group() {
        let fields = PostForm::fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "text");
        assert_eq!(fields[0].kind, FieldKind::Char);
        assert!(fields[0].required);
        assert_eq!(fields[0].help_text, "Введите текст поста");
        assert_eq!(fields[1].name, "group");
        assert_eq!(fields[1].kind, FieldKind::ModelChoice);
        assert!(!fields[1].required);
    }

    #[test]
    fn test_clean_valid_with_group() {
        let group = group();
        let form = PostForm {
            text: "  Текст поста  ".into(),
            group: Some(group.id.to_string()),
        };
        let cleaned = form.clean(&[group.clone()]).unwrap();
        assert_eq!(cleaned.text, "Текст поста");
        assert_eq!(cleaned.group_id, Some(group.id));
    }

    #[test]
    fn test_clean_empty_group_is_none() {
        let form = PostForm {
            text: "text".into(),
            group: Some(String::new()),
        };
        assert_eq!(form.clean(&[]).unwrap().group_id, None);
    }

    #[test]
    fn test_clean_rejects_blank_text() {
        let form = PostForm {
            text: "   ".into(),
            group: None,
        };
        let errors = form.clean(&[]).unwrap_err();
        assert_eq!(errors.get("text"), [messages::REQUIRED]);
    }

    #[test]
    fn test_clean_rejects_unknown_group() {
        let form = PostForm {
            text: "text".into(),
            group: Some(uuid::Uuid::new_v4().to_string()),
        };
        let errors = form.clean(&[group()]).unwrap_err();
        assert!(errors.has("group"));
    }

    #[test]
    fn test_from_post_prefills() {
        let group = group();
        let post = Post::new(Uuid::new_v4(), "Большой тест-пост".into(), Some(group.id));
        let form = PostForm::from_post(&post);
        assert_eq!(form.value("text").as_deref(), Some("Большой тест-пост"));
        assert_eq!(form.value("group"), Some(group.id.to_string()));
    }
}
