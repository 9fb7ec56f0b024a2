pub const USERNAME: &str = "anna";
pub const PASSWORD: &str = "correct-horse-battery";
pub const EMAIL: &str = "anna@example.com";

pub const OTHER_USERNAME: &str = "bram";
pub const DELETED_USERNAME: &str = "carla";

/// Id no row will ever have in a fresh test database.
pub const MISSING_ID: i32 = 999_999;
