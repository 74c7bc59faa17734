//! Backend entry-point: wires the HTTP surface to MongoDB-backed services.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use mongodb::Client;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::{TaskService, UserService};
use backend::inbound::http::HttpState;
use backend::outbound::persistence::{MongoTaskStore, MongoUserStore};
use backend::outbound::security::BcryptPasswordHasher;
use backend::server::{ServerConfig, build_app};

const DEFAULT_DATABASE: &str = "task_manager";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    let client = Client::with_uri_str(&config.mongodb_uri)
        .await
        .map_err(std::io::Error::other)?;
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

    let user_store = MongoUserStore::new(&database);
    user_store
        .ensure_indexes()
        .await
        .map_err(std::io::Error::other)?;
    let task_store = MongoTaskStore::new(&database);

    let user_service = Arc::new(UserService::new(
        Arc::new(user_store),
        Arc::new(BcryptPasswordHasher::default()),
    ));
    let task_service = Arc::new(TaskService::new(Arc::new(task_store)));

    let state = web::Data::new(HttpState {
        users_command: user_service.clone(),
        users_query: user_service,
        tasks_command: task_service.clone(),
        tasks_query: task_service,
    });

    info!(addr = %config.bind_addr, database = %database.name(), "starting server");
    HttpServer::new(move || build_app(state.clone()))
        .bind(config.bind_addr)?
        .run()
        .await
}
