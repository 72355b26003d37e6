//! User-facing texts shared by the CLI and the browser frontend.

pub const EMPTY_URL: &str = "Please enter a URL";
pub const INVALID_URL: &str = "Please enter a valid URL (e.g., https://example.com)";
pub const FILL_ALL_FIELDS: &str = "Please fill all fields";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const TERMS_REQUIRED: &str = "You must agree to the terms";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const USERNAME_REQUIRED: &str = "Username is required";

pub const LOGIN_REQUIRED: &str = "Please login first";
pub const NOT_FOUND: &str = "Resource not found";

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Register failed!";
pub const REGISTER_OK: &str = "Register success!";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";
pub const NETWORK_ERROR: &str = "Network error";

pub const SHORTEN_FAILED: &str = "Failed to shorten URL. Please try again.";
pub const DASHBOARD_FAILED: &str = "Failed to fetch dashboard stats";
pub const LINKS_FAILED: &str = "Failed to fetch links";

pub const UPDATE_LINK_FAILED: &str = "Failed to update link";
pub const UPDATE_LINK_ERROR: &str = "Update failed";
pub const LINK_UPDATED: &str = "Link updated";
pub const DELETE_LINK_FAILED: &str = "Failed to delete link";
pub const DELETE_LINK_ERROR: &str = "Error deleting link";
pub const LINK_DELETED: &str = "Link deleted";

pub const PROFILE_FAILED: &str = "Failed to load profile";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update";
pub const PROFILE_UPDATED: &str = "Updated successfully";
