use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into a proper HTML response.
/// Unauthorized becomes a redirect to the login page; everything else
/// renders an error page with the matching status code.
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => html_error_response(404, "Not Found"),
        ServerError::BadRequest(msg) => html_error_response(400, &msg),
        ServerError::Validation(msg) => html_error_response(400, &msg),
        ServerError::Unauthorized(_) => redirect_to_login(),
        ServerError::Forbidden(msg) => html_error_response(403, &msg),
        ServerError::DbError(msg) => {
            log::error!("database error: {msg}");
            html_error_response(500, "A database error occurred")
        }
        ServerError::XlsxError(msg) => {
            log::error!("spreadsheet error: {msg}");
            html_error_response(500, "Failed to build the export")
        }
        ServerError::MailError(msg) => {
            log::error!("mail error: {msg}");
            html_error_response(500, "Failed to send email")
        }
        ServerError::InternalError => html_error_response(500, "Internal Server Error"),
    }
}

fn redirect_to_login() -> Response {
    ResponseBuilder::new()
        .status(302)
        .header("Location", "/login")
        .body(Body::empty())
        .unwrap_or_else(|_| Response::new(Body::from("Redirecting to /login")))
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str) -> Response {
    let html = format!(
        "<!DOCTYPE html>
        <html lang=\"en\">
        <head><meta charset=\"utf-8\"><title>Error {status}</title></head>
        <body>
            <h1>Error {status}</h1>
            <p>{message}</p>
            <p><a href=\"/\">Back to home</a></p>
        </body>
        </html>"
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(html))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
