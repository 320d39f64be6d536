use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use collabtrack::config::Config;
use collabtrack::handlers::{
    BulkCreateRequest, BulkCreateResponse, CollaborationListResponse, CollaborationRequest,
    CollaborationResponse, CollaborationViewResponse, CompanyListResponse, CompanyResponse,
    CopyCollaborationsRequest, CopyCollaborationsResponse, CreateCompanyRequest,
    CreatePersonRequest, CreateProjectRequest, CreateUserRequest, PersonListResponse,
    PersonResponse, ProjectListResponse, ProjectResponse, ResolvedUserResponse,
    UpdateCompanyRequest, UpdatePersonRequest, UpdateProjectRequest, UserListResponse,
    UserResponse,
};
use collabtrack::state::AppState;
use collabtrack::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::collaboration::create_collaboration,
        handlers::collaboration::list_collaborations,
        handlers::collaboration::get_collaboration,
        handlers::collaboration::update_collaboration,
        handlers::collaboration::delete_collaboration,
        handlers::provision::bulk_create_collaborations,
        handlers::provision::copy_collaborations,
        handlers::company::create_company,
        handlers::company::list_companies,
        handlers::company::get_company,
        handlers::company::update_company,
        handlers::company::delete_company,
        handlers::project::create_project,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::person::create_person,
        handlers::person::list_people,
        handlers::person::get_person,
        handlers::person::update_person,
        handlers::person::delete_person,
        handlers::user::create_user,
        handlers::user::list_users,
        handlers::user::resolve_user,
    ),
    components(schemas(
        CollaborationRequest,
        CollaborationResponse,
        CollaborationViewResponse,
        CollaborationListResponse,
        BulkCreateRequest,
        BulkCreateResponse,
        CopyCollaborationsRequest,
        CopyCollaborationsResponse,
        CreateCompanyRequest,
        UpdateCompanyRequest,
        CompanyResponse,
        CompanyListResponse,
        CreateProjectRequest,
        UpdateProjectRequest,
        ProjectResponse,
        ProjectListResponse,
        CreatePersonRequest,
        UpdatePersonRequest,
        PersonResponse,
        PersonListResponse,
        CreateUserRequest,
        UserResponse,
        UserListResponse,
        ResolvedUserResponse,
    )),
    tags(
        (name = "Collaborations", description = "Collaboration provisioning: single, bulk and cross-project copy"),
        (name = "Companies", description = "Company management endpoints"),
        (name = "Projects", description = "Fundraising project management endpoints"),
        (name = "People", description = "Contact person management endpoints"),
        (name = "Users", description = "User registry and responsible-name resolution")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to the database, runs migrations)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .unwrap();
}
