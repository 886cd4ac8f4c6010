#[tokio::main]
async fn main() {
    use axum::{Router, middleware, routing::get};
    use campus_identity::RoleRegistry;
    use campus_server::{
        auth::{self, AppState},
        config::ServerConfig,
        routes,
    };
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Create database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    let app_state = Arc::new(AppState::new(db_pool, config.identity.clone()));

    // The default role must exist before any principal can be
    // auto-provisioned; refuse to start with a dangling name.
    app_state
        .role_registry()
        .find_by_name(&config.identity.default_role)
        .await
        .expect("configured default role does not exist in the role registry");
    tracing::info!(
        default_role = %config.identity.default_role,
        "Verified default role"
    );

    let app = Router::new()
        .merge(routes::router())
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::bridge_layer,
        ))
        .route("/healthz", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
