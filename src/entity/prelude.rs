pub use super::app_user::Entity as AppUser;
pub use super::collaboration::Entity as Collaboration;
pub use super::company::Entity as Company;
pub use super::person::Entity as Person;
pub use super::project::Entity as Project;
