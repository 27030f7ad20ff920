//! Domain entities - the core business objects.

mod group;
mod post;
mod user;

pub use group::{GROUP_SLUG_MAX_LEN, GROUP_TITLE_MAX_LEN, Group};
pub use post::{POST_STR_LEN, Post};
pub use user::{USERNAME_MAX_LEN, User};

/// Static description of a model field, shown as form labels and hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: &'static str,
    pub verbose_name: &'static str,
    pub help_text: &'static str,
}

pub(crate) fn lookup_field(fields: &'static [FieldMeta], name: &str) -> Option<&'static FieldMeta> {
    fields.iter().find(|f| f.name == name)
}
