//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` (or `--database-url`) and runs `up`, `down`,
//! `status`, `fresh`, `refresh` or `reset` against it.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    cli::run_cli(migration::Migrator).await;
}
