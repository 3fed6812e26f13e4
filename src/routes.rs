use crate::errors::{json_error_handler, path_error_handler, query_error_handler};
use crate::handlers;
use actix_web::web;

/// Register extractor error handlers and every route.
///
/// Paths are declared without a trailing slash; the server wraps the app in
/// `NormalizePath::trim()` so `/api/users/` and `/api/users` both resolve.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(web::resource("/api").route(web::get().to(handlers::root::api_root)))
        .service(
            web::resource("/api/users")
                .route(web::get().to(handlers::user::list_users))
                .route(web::post().to(handlers::user::create_user)),
        )
        .service(
            web::resource("/api/users/{id}")
                .route(web::get().to(handlers::user::get_user))
                .route(web::put().to(handlers::user::replace_user))
                .route(web::patch().to(handlers::user::partial_update_user))
                .route(web::delete().to(handlers::user::delete_user)),
        )
        .service(
            web::resource("/api/teams")
                .route(web::get().to(handlers::team::list_teams))
                .route(web::post().to(handlers::team::create_team)),
        )
        .service(
            web::resource("/api/teams/{id}")
                .route(web::get().to(handlers::team::get_team))
                .route(web::put().to(handlers::team::replace_team))
                .route(web::patch().to(handlers::team::partial_update_team))
                .route(web::delete().to(handlers::team::delete_team)),
        )
        .service(
            web::resource("/api/teams/{id}/members")
                .route(web::get().to(handlers::team::list_members))
                .route(web::post().to(handlers::team::add_member)),
        )
        .service(
            web::resource("/api/teams/{id}/members/{user_id}")
                .route(web::delete().to(handlers::team::remove_member)),
        )
        .service(
            web::resource("/api/activities")
                .route(web::get().to(handlers::activity::get_activities))
                .route(web::post().to(handlers::activity::create_activity)),
        )
        .service(
            web::resource("/api/activities/{id}")
                .route(web::get().to(handlers::activity::get_activity))
                .route(web::put().to(handlers::activity::replace_activity))
                .route(web::patch().to(handlers::activity::update_activity))
                .route(web::delete().to(handlers::activity::delete_activity)),
        )
        .service(
            web::resource("/api/workouts")
                .route(web::get().to(handlers::workout::list_workouts))
                .route(web::post().to(handlers::workout::create_workout)),
        )
        .service(
            web::resource("/api/workouts/{id}")
                .route(web::get().to(handlers::workout::get_workout))
                .route(web::put().to(handlers::workout::replace_workout))
                .route(web::patch().to(handlers::workout::partial_update_workout))
                .route(web::delete().to(handlers::workout::delete_workout)),
        )
        .service(
            web::resource("/api/workouts/{id}/suggested_for")
                .route(web::get().to(handlers::workout::list_suggested_users))
                .route(web::post().to(handlers::workout::suggest_to_user)),
        )
        .service(
            web::resource("/api/workouts/{id}/suggested_for/{user_id}")
                .route(web::delete().to(handlers::workout::withdraw_suggestion)),
        )
        .service(
            web::resource("/api/leaderboard")
                .route(web::get().to(handlers::leaderboard::list_leaderboard))
                .route(web::post().to(handlers::leaderboard::create_entry)),
        )
        .service(
            web::resource("/api/leaderboard/{id}")
                .route(web::get().to(handlers::leaderboard::get_entry))
                .route(web::put().to(handlers::leaderboard::replace_entry))
                .route(web::patch().to(handlers::leaderboard::partial_update_entry))
                .route(web::delete().to(handlers::leaderboard::delete_entry)),
        )
        .service(web::resource("/admin").route(web::get().to(handlers::admin::index)))
        .service(
            web::resource("/admin/{model}").route(web::get().to(handlers::admin::changelist)),
        );
}
