pub mod environments;
pub mod memberships;
pub mod organizations;
pub mod projects;
pub mod sessions;
pub mod surveys;
pub mod teams;
pub mod users;

pub use sessions::Session;
pub use users::{NewUser, User};
