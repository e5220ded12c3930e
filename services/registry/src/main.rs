use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use hsi_core::config::Config;
use hsi_core::tracing::init_tracing;
use hsi_registry::config::RegistryConfig;
use hsi_registry::router::build_router;
use hsi_registry::state::AppState;
use hsi_registry::usecase::role::SeedRolesUseCase;
use hsi_registry_migration::Migrator;

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn");

    let config = RegistryConfig::from_env();
    info!(?config, "configuration loaded");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    if config.run_migrations() {
        Migrator::up(&state.db, None)
            .await
            .expect("failed to apply migrations");
        SeedRolesUseCase {
            repo: state.role_repo(),
        }
        .execute()
        .await
        .expect("failed to seed roles");
    }

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.registry_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("registry service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
