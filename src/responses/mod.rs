pub mod csv;
pub mod errors;
pub mod html;
pub mod redirect;
pub mod xlsx;

pub use crate::errors::ResultResp;
pub use csv::csv_response;
pub use errors::error_to_response;
pub use html::html_response;
pub use redirect::{redirect, redirect_with_cookie};
pub use xlsx::xlsx_response;
