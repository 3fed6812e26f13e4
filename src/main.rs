use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use env_logger::Env;
use log::info;
use octofit_backend::config::Config;
use octofit_backend::db::Store;
use octofit_backend::routes;
use std::collections::HashMap;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // Initialize the database pool
    let store = Store::connect(&config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    info!(
        "Starting server at {} with {} workers",
        config.bind_address, config.workers
    );

    // Set up Prometheus metrics
    let mut labels = HashMap::new();
    labels.insert("app".to_string(), "octofit_tracker".to_string());
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .const_labels(labels)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let store = web::Data::new(store);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(NormalizePath::trim())
            .wrap(Logger::default()) // Logging middleware
            .wrap(prometheus.clone()) // Prometheus metrics middleware
            .app_data(store.clone())
            .configure(routes::configure)
    })
    .workers(config.workers)
    .bind(&config.bind_address)?
    .run()
    .await
}
