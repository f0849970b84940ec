pub mod environment_type;
pub mod ids;
pub mod notification_settings;
pub mod organization_role;

pub use environment_type::EnvironmentType;
pub use ids::{EnvironmentId, OrganizationId, ProjectId, SessionId, SurveyId, TeamId, UserId};
pub use notification_settings::{NotificationSettings, NotificationType};
pub use organization_role::OrganizationRole;
