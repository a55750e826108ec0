use member_portal_client::config::load_config;
use member_portal_client::types::StartupError;
use member_portal_client::{PortalClient, SERVICE_NAME, VERSION};
use serde::Serialize;

const USAGE: &str = "portal_client <profile|events|members|stats>";

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    let config = load_config().map_err(|e| StartupError::Config(e.to_string()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    log::info!("{} v{} against {}", SERVICE_NAME, VERSION, config.base_url);

    let command = std::env::args().nth(1).ok_or_else(|| StartupError::Usage(USAGE.to_string()))?;

    let portal =
        PortalClient::from_config(&config).map_err(|e| StartupError::Client(e.to_string()))?;

    if let Ok(token) = std::env::var("PORTAL_TOKEN") {
        portal.session.login(token).map_err(|e| StartupError::Client(e.to_string()))?;
    }

    match command.as_str() {
        "profile" => print_json(portal.profile.user_profile().await),
        "events" => print_json(portal.events.upcoming_events().await),
        "members" => print_json(portal.directory.all_members().await),
        "stats" => print_json(portal.directory.member_stats().await),
        other => Err(StartupError::Usage(format!("unknown command '{}'; {}", other, USAGE))),
    }
}

fn print_json<T: Serialize>(
    result: Result<T, member_portal_client::ApiError>,
) -> Result<(), StartupError> {
    let value = result.map_err(|e| StartupError::Request(e.to_string()))?;
    let rendered = serde_json::to_string_pretty(&value)
        .map_err(|e| StartupError::Request(format!("Failed to render response: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
