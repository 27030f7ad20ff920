//! Mail delivery - a log-backed mailer for servers without SMTP and an
//! in-memory outbox for tests.

mod log;
mod memory;

pub use log::LogMailer;
pub use memory::InMemoryMailer;
