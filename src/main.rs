use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use dggcrm_console::config::AppConfig;
use dggcrm_console::directory::{Directory, FixtureData, FixtureDirectory, FixtureSize};
use dggcrm_console::{handlers, session};

/// Load the JSON snapshot named by `FIXTURE_PATH`, or generate volunteers.
fn open_directory(config: &AppConfig) -> std::io::Result<FixtureDirectory> {
    if let Some(path) = &config.fixture_path {
        let raw = std::fs::read_to_string(path)?;
        let data = FixtureData::from_json(&raw)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        log::info!("Loaded {} people from {path}", data.people.len());
        return Ok(FixtureDirectory::new(data));
    }

    let size = FixtureSize { people: config.fixture_people, groups: config.fixture_groups };
    log::info!("Generating {} people across {} organizations", size.people, size.groups);
    Ok(FixtureDirectory::generate(size, config.fixture_seed))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let directory: Arc<dyn Directory> = Arc::new(open_directory(&config)?);
    let secret_key = session::key_from(config.session_key.as_deref());
    let addr = config.addr();

    log::info!("Starting server at http://{addr}");

    let config = web::Data::new(config);
    let directory = web::Data::from(directory);

    HttpServer::new(move || {
        App::new()
            .wrap(session::middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(directory.clone())
            .app_data(config.clone())
            .configure(handlers::routes)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(addr)?
    .run()
    .await
}
