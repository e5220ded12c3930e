use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(hsi_registry_migration::Migrator).await;
}
