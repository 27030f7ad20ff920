//! # Yatube Core
//!
//! The domain layer of Yatube: users, groups and posts, the forms that bind
//! user input to them, pagination, and the ports infrastructure implements.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;

pub use error::DomainError;
pub use pagination::{Page, PageRequest};
