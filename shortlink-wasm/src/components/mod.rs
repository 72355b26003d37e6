pub(crate) mod copy_button;
pub(crate) mod navbar;
