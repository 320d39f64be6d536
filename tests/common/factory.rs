use rust_decimal::Decimal;
use uuid::Uuid;

use collabtrack::models::{
    AppUser, CollabType, CollaborationInput, CollaborationView, Company, CreateAppUser,
    CreateCompany, CreatePerson, CreateProject, Person, Priority, Project, TriState,
};
use collabtrack::repositories::{
    CompanyRepository, PersonRepository, ProjectRepository, UserRepository,
};
use collabtrack::services::ProvisioningService;
use collabtrack::state::AppState;

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test company
    pub async fn create_company(&self) -> Company {
        self.create_company_with_name(&format!("Test Company {}", Uuid::new_v4()))
            .await
    }

    /// Create a test company with specific name
    pub async fn create_company_with_name(&self, name: &str) -> Company {
        let input = CreateCompany {
            name: name.to_string(),
            website: None,
            notes: None,
        };

        CompanyRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create a test project
    pub async fn create_project(&self) -> Project {
        self.create_project_with_name(&format!("Test Project {}", Uuid::new_v4()))
            .await
    }

    /// Create a test project with specific name
    pub async fn create_project_with_name(&self, name: &str) -> Project {
        let input = CreateProject {
            name: name.to_string(),
            fr_goal: None,
            notes: None,
        };

        ProjectRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create a contact person employed by the given company
    pub async fn create_person(&self, company_id: Uuid) -> Person {
        let input = CreatePerson {
            company_id,
            name: format!("Test Person {}", Uuid::new_v4()),
            email: None,
            phone: None,
        };

        PersonRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create a registry user with the given display name
    pub async fn create_user(&self, full_name: &str) -> AppUser {
        let input = CreateAppUser {
            full_name: full_name.to_string(),
            email: format!("test-{}@example.com", Uuid::new_v4()),
            role: None,
        };

        UserRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Baseline input: optionals unset, flags false, tri-states unknown
    pub fn collaboration_input(company_id: Uuid, project_id: Uuid) -> CollaborationInput {
        CollaborationInput {
            company_id,
            project_id,
            person_id: None,
            responsible: None,
            comment: None,
            contacted: false,
            successful: TriState::Unknown,
            letter: false,
            meeting: TriState::Unknown,
            priority: Priority::Low,
            amount: None,
            contact_in_future: TriState::Unknown,
            collab_type: None,
        }
    }

    /// Create a bare collaboration between a company and a project
    pub async fn create_collaboration(
        &self,
        company_id: Uuid,
        project_id: Uuid,
    ) -> CollaborationView {
        let input = Self::collaboration_input(company_id, project_id);

        ProvisioningService::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create a collaboration with every settable field populated
    pub async fn create_full_collaboration(
        &self,
        company_id: Uuid,
        project_id: Uuid,
        person_id: Uuid,
    ) -> CollaborationView {
        let input = CollaborationInput {
            company_id,
            project_id,
            person_id: Some(person_id),
            responsible: Some("Erika Musterfrau".to_string()),
            comment: Some("Met at the spring gala".to_string()),
            contacted: true,
            successful: TriState::Yes,
            letter: true,
            meeting: TriState::Yes,
            priority: Priority::High,
            amount: Some(Decimal::new(250025, 2)),
            contact_in_future: TriState::Yes,
            collab_type: Some(CollabType::Financial),
        };

        ProvisioningService::create(&self.state.db, &input)
            .await
            .unwrap()
    }

    /// Create a full test setup: company and project linked by a collaboration
    pub async fn create_linked(&self) -> TestLink {
        let company = self.create_company().await;
        let project = self.create_project().await;
        let collaboration = self.create_collaboration(company.id, project.id).await;

        TestLink {
            company,
            project,
            collaboration,
        }
    }
}

/// A company, a project and the collaboration between them
#[allow(dead_code)]
pub struct TestLink {
    pub company: Company,
    pub project: Project,
    pub collaboration: CollaborationView,
}
