//! Identifier newtypes. Every id wraps a ULID for non-sequential, sortable keys.

macro_rules! ulid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(ulid::Ulid);

        impl $name {
            /// Generate a new random ULID.
            pub fn new() -> Self {
                Self(ulid::Ulid::new())
            }

            /// Get as string for storage/display.
            pub fn as_str(&self) -> String {
                self.0.to_string()
            }

            /// Parse from string.
            pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
                Ok(Self(ulid::Ulid::from_string(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

ulid_id!(
    /// User ID.
    UserId
);
ulid_id!(
    /// Session ID, stored in the `session_id` cookie.
    SessionId
);
ulid_id!(OrganizationId);
ulid_id!(TeamId);
ulid_id!(ProjectId);
ulid_id!(EnvironmentId);
ulid_id!(SurveyId);
