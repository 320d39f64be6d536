use axum_test::TestServer;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

use collabtrack::build_router;
use collabtrack::config::Config;
use collabtrack::entity;
use collabtrack::state::AppState;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory database
    pub async fn new() -> Self {
        let config = test_config();

        // A single pooled connection: every handle must see the same
        // in-memory database (avoids a running Postgres in tests)
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .expect("Failed to open in-memory database");
        create_schema(&db).await;

        let state = AppState::with_database(config, db);

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}

/// Build the same schema the migrations create in production, including the
/// unique (company_id, project_id) index the duplicate handling relies on.
async fn create_schema(db: &DatabaseConnection) {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let tables = [
        schema.create_table_from_entity(entity::company::Entity),
        schema.create_table_from_entity(entity::project::Entity),
        schema.create_table_from_entity(entity::app_user::Entity),
        schema.create_table_from_entity(entity::person::Entity),
        schema.create_table_from_entity(entity::collaboration::Entity),
    ];
    for table in tables {
        db.execute(backend.build(&table))
            .await
            .expect("Failed to create table");
    }

    let pairing = Index::create()
        .name("uq_collaborations_company_project")
        .table(entity::collaboration::Entity)
        .col(entity::collaboration::Column::CompanyId)
        .col(entity::collaboration::Column::ProjectId)
        .unique()
        .to_owned();
    db.execute(backend.build(&pairing))
        .await
        .expect("Failed to create pairing index");
}
