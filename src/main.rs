use std::net::SocketAddr;

use astra::Server;

use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::routes::App;

mod auth;
mod comms;
mod config;
mod db;
mod domain;
mod errors;
mod import;
mod prefs;
mod responses;
mod router;
mod routes;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cfg = AppConfig::from_env();
    let db = Database::new(cfg.db_path.clone());

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        log::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    let addr: SocketAddr = match cfg.addr.parse() {
        Ok(a) => a,
        Err(e) => {
            log::error!("invalid bind address {:?}: {e}", cfg.addr);
            std::process::exit(1);
        }
    };

    log::info!("starting server at http://{addr}");

    let app = App { db, cfg };
    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        log::error!("server ended with error: {e}");
    }

    log::info!("server shut down cleanly");
}
