// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Herald

// Settings object
pub const HERALD_SETTINGS_NAME: &str = "HERALD_SETTINGS_NAME";

// Persistence
pub const HERALD_DATABASE_URL: &str = "HERALD_DATABASE_URL";

// Admin links
pub const HERALD_ADMIN_URL: &str = "HERALD_ADMIN_URL";

/// Name of the settings object when none is configured
pub const DEFAULT_SETTINGS_NAME: &str = "notify_users_e_mail";

/// SQLite database used when `HERALD_DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite://herald.db?mode=rwc";

pub const DEFAULT_ADMIN_URL: &str = "http://localhost/wp-admin/";
