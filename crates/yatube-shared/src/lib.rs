//! # Yatube Shared
//!
//! Serializable page bodies shared by the server and its clients: the
//! context views a template receives and the error document.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, TemplateResponse};
