pub mod collaboration;
pub mod common;
pub mod company;
pub mod person;
pub mod project;
pub mod provision;
pub mod user;

pub use collaboration::{
    create_collaboration, delete_collaboration, get_collaboration, list_collaborations,
    update_collaboration, CollaborationFilterParams, CollaborationListResponse,
    CollaborationRequest, CollaborationResponse, CollaborationViewResponse,
};
pub use common::{page_window, PaginationParams};
pub use company::{
    create_company, delete_company, get_company, list_companies, update_company,
    CompanyListResponse, CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest,
};
pub use person::{
    create_person, delete_person, get_person, list_people, update_person, CreatePersonRequest,
    PersonListResponse, PersonResponse, UpdatePersonRequest,
};
pub use project::{
    create_project, delete_project, get_project, list_projects, update_project,
    CreateProjectRequest, ProjectListResponse, ProjectResponse, UpdateProjectRequest,
};
pub use provision::{
    bulk_create_collaborations, copy_collaborations, BulkCreateRequest, BulkCreateResponse,
    CopyCollaborationsRequest, CopyCollaborationsResponse,
};
pub use user::{
    create_user, list_users, resolve_user, CreateUserRequest, ResolvedUserResponse,
    UserListResponse, UserResponse,
};
