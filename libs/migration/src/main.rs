//! Migration CLI for the signup database.
//!
//! Reads `DATABASE_URL`, e.g. `migration up`, `migration status`, `migration down`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
