pub mod application;
pub mod job;
pub mod user;

pub use application::{Application, ApplicationStatus};
pub use job::{Company, Job, NewJob, ALL_DOMAINS, DOMAINS};
pub use user::{User, UserRole};
