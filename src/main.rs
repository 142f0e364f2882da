use rsvp_server::core::{AppState, Config, database};
use rsvp_server::entities::User;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging: RUST_LOG wins, info otherwise
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Inizializza la configurazione
    let config = Config::from_env()?;
    config.print_info();

    let pool = database::connect(&config.database_url, config.max_connections).await?;

    let state = AppState::new(pool, config.jwt_secret.clone())
        .with_code_prefix(config.invitation_code_prefix.clone());

    match (&config.admin_email, &config.admin_password) {
        (Some(email), Some(password)) => {
            let hashed = User::hash_password(password)?;
            state.user.ensure_admin(&email.trim().to_lowercase(), &hashed).await?;
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("ADMIN_EMAIL and ADMIN_PASSWORD must both be set, admin bootstrap skipped");
        }
        (None, None) => {}
    }

    let app = rsvp_server::create_router(Arc::new(state));

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
