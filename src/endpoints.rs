//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/registros/{record_id}/edit',
//! use [format_endpoint].

/// The root route which redirects to the summary or log in page.
pub const ROOT: &str = "/";
/// The landing page for logged in users: the monthly budget summary.
pub const SUMMARY_VIEW: &str = "/resumen";
/// The page for displaying the raw income/expense records.
pub const RECORDS_VIEW: &str = "/registros";
/// The page for creating a new record.
pub const NEW_RECORD_VIEW: &str = "/registros/new";
/// The page for editing an existing record.
pub const EDIT_RECORD_VIEW: &str = "/registros/{record_id}/edit";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for the monthly summary as JSON.
pub const SUMMARY_API: &str = "/api/resumen";
/// The route to create a record.
pub const RECORDS_API: &str = "/api/registros";
/// The route to delete a record.
pub const DELETE_RECORD: &str = "/api/registros/{record_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/registros/{record_id}/edit',
/// '{record_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
