// src/router.rs

use astra::Request;

use crate::errors::{ResultResp, ServerError};
use crate::routes::{admin, auth, campaigns, imports, leads, pages, App};

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => pages::home(req, app),
        ("GET", "/static/main.css") => pages::stylesheet(req, app),

        // auth
        ("GET", "/login") => auth::login_form(req, app),
        ("POST", "/login") => auth::login(req, app),
        ("POST", "/signup") => auth::signup(req, app),
        ("POST", "/logout") => auth::logout(req, app),
        ("POST", "/auth/reset-request") => auth::reset_request(req, app),
        ("GET", "/auth/reset") => auth::reset_redeem(req, app),
        ("POST", "/password") => auth::change_password(req, app),

        // dashboard & misc pages
        ("GET", "/dashboard") => pages::dashboard(req, app),
        ("GET", "/calendar") => pages::calendar(req, app),
        ("GET", "/notifications") => pages::notifications(req, app),
        ("GET", "/settings") => pages::settings(req, app),
        ("POST", "/settings/filters/save") => pages::save_filter_set(req, app),
        ("POST", "/settings/filters/delete") => pages::delete_filter_set(req, app),
        ("POST", "/prefs/view-mode") => pages::set_view_mode(req, app),

        // leads
        ("GET", "/leads") => leads::list(req, app),
        ("POST", "/leads") => leads::create(req, app),
        ("GET", "/leads/new") => leads::new_form(req, app),
        ("GET", "/leads/import") => imports::upload_form(req, app, None),
        ("POST", "/leads/import/preview") => imports::preview(req, app, None),
        ("POST", "/leads/import") => imports::run(req, app, None),
        ("GET", "/leads/template.csv") => leads::template(req, app),
        ("GET", "/leads/export.csv") => leads::export_csv(req, app),
        ("GET", "/leads/export.xlsx") => leads::export_xlsx(req, app),

        // campaigns
        ("GET", "/campaigns") => campaigns::list(req, app),
        ("POST", "/campaigns") => campaigns::create(req, app),

        // admin
        ("GET", "/admin/users") => admin::users_page(req, app),
        ("GET", "/admin/settings") => admin::settings(req, app),
        ("GET", "/admin/analytics") => admin::analytics(req, app),
        ("POST", "/admin/reset-activity") => admin::reset_activity(req, app),

        _ => dispatch_dynamic(req, app, &method, &path),
    }
}

/// Routes with path parameters, matched on their segments.
fn dispatch_dynamic(req: Request, app: &App, method: &str, path: &str) -> ResultResp {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("GET", ["leads", id]) => leads::detail(req, app, parse_id(id)?),
        ("GET", ["leads", id, "edit"]) => leads::edit_form(req, app, parse_id(id)?),
        ("POST", ["leads", id, "edit"]) => leads::edit(req, app, parse_id(id)?),
        ("POST", ["leads", id, "delete"]) => leads::delete(req, app, parse_id(id)?),
        ("POST", ["leads", id, "heirs"]) => leads::add_heir(req, app, parse_id(id)?),
        ("POST", ["leads", id, "heirs", heir_id, "delete"]) => {
            leads::delete_heir(req, app, parse_id(id)?, parse_id(heir_id)?)
        }
        ("POST", ["leads", id, "files"]) => leads::add_file(req, app, parse_id(id)?),
        ("POST", ["leads", id, "files", file_id, "delete"]) => {
            leads::delete_file(req, app, parse_id(id)?, parse_id(file_id)?)
        }
        ("POST", ["leads", id, "tags"]) => leads::add_tag(req, app, parse_id(id)?),
        ("POST", ["leads", id, "tags", "remove"]) => leads::remove_tag(req, app, parse_id(id)?),
        ("POST", ["leads", id, "call"]) => leads::call(req, app, parse_id(id)?),
        ("POST", ["leads", id, "sms"]) => leads::sms(req, app, parse_id(id)?),

        ("GET", ["campaigns", id]) => campaigns::detail(req, app, parse_id(id)?),
        ("GET", ["campaigns", id, "import"]) => {
            imports::upload_form(req, app, Some(parse_id(id)?))
        }
        ("POST", ["campaigns", id, "import", "preview"]) => {
            imports::preview(req, app, Some(parse_id(id)?))
        }
        ("POST", ["campaigns", id, "import"]) => imports::run(req, app, Some(parse_id(id)?)),

        ("POST", ["admin", "users", id, "role"]) => admin::set_role(req, app, parse_id(id)?),

        _ => Err(ServerError::NotFound),
    }
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid id: {raw}")))
}
