pub mod app_user;
pub mod collaboration;
pub mod company;
pub mod person;
pub mod project;

pub mod prelude;

pub use prelude::*;
