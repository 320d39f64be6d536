pub mod collaboration;
pub mod company;
pub mod person;
pub mod project;
pub mod tristate;
pub mod user;

pub use collaboration::*;
pub use company::*;
pub use person::*;
pub use project::*;
pub use tristate::*;
pub use user::*;
