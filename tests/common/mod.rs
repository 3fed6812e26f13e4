use octofit_backend::config::Config;
use octofit_backend::db::Store;
use std::path::Path;

/// Fresh in-memory database with migrations applied.
#[allow(dead_code)]
pub async fn test_store() -> Store {
    Store::connect(&Config::test_default())
        .await
        .expect("Failed to open in-memory database")
}

/// File-backed database under `dir`, pooled like the default server config.
#[allow(dead_code)]
pub async fn file_store(dir: &Path) -> Store {
    let config = Config {
        database_url: format!("sqlite://{}", dir.join("octofit.db").display()),
        max_connections: 5,
        bcrypt_cost: 4,
        ..Config::default()
    };
    Store::connect(&config)
        .await
        .expect("Failed to open file database")
}

/// Build the full app around `$store`, as the server does.
#[macro_export]
macro_rules! init_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($store.clone()))
                .configure(octofit_backend::routes::configure),
        )
        .await
    };
}
