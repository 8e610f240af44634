//! User authentication: cookies, guards, and the log-in and log-out routes.

pub(crate) mod cookie;
mod log_in;
mod log_out;
pub(crate) mod middleware;
mod redirect;

pub use log_in::{LoginState, get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{admin_guard, admin_guard_hx, auth_guard, auth_guard_hx};
