use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use tasklog::config::Config;
use tasklog::routes::{self, pages};
use tasklog::AppContext;

fn startup_error(err: tasklog::AppError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(startup_error)?;
    let context = AppContext::from_config(&config)
        .await
        .map_err(startup_error)?;
    let context = web::Data::new(context);

    log::info!("Starting Tasklog at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            .wrap(Logger::default())
            .configure(routes::config)
            .default_service(web::route().to(pages::not_found))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
