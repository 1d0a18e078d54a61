//! Walks the users service through one illustrative session: fetch a page,
//! sort it, rename and patch the last user, delete them, then ask for an id
//! that does not exist.

use anyhow::Context;
use gorest_core::{
    GoRestClient, GoRestConfig, ReqwestTransport, SortDirection, SortField, UpdateUserName,
    UsersApi, UsersService,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEMO_PAGE: u32 = 3;
const MISSING_USER_ID: u64 = 5555;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GoRestConfig::from_env().context("loading upstream settings")?;
    let transport = ReqwestTransport::new(config.timeout).context("building HTTP client")?;
    let service = UsersService::new(GoRestClient::new(&config, transport));

    if let Err(e) = run(&service).await {
        error!("{e:#}");
    }
    info!("Process complete.");
    Ok(())
}

async fn run<A: UsersApi>(service: &UsersService<A>) -> anyhow::Result<()> {
    let users = service.find_all_on_page(DEMO_PAGE).await?;
    let mut sorted = users.clone();
    service.sort(&mut sorted, SortField::Name, SortDirection::Asc);

    let last = sorted
        .last()
        .cloned()
        .with_context(|| format!("page {DEMO_PAGE} is empty"))?;
    info!("Last name in sorted list: {:?}", last.name);

    let patch = UpdateUserName {
        name: "Bob Smith".to_string(),
    };
    match service.update(last.id, &patch.into()).await {
        Some(updated) => info!("Updated user: {}", serde_json::to_string_pretty(&updated)?),
        None => info!("Updated user: none"),
    }

    info!("Deleted user response: {}", service.remove(last.id).await?);
    service.find_one(MISSING_USER_ID).await?;
    Ok(())
}
