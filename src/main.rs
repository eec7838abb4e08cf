use std::net::TcpListener;

use blog_api::configuration::ApplicationConfiguration;
use blog_api::database::init_sqlite_connection;
use blog_api::{observability, startup};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = ApplicationConfiguration::from_env();

    let subscriber = observability::get_subscriber("info", configuration.log_format);
    observability::init_subscriber(subscriber)?;

    let database = init_sqlite_connection(&configuration).await?;

    let listener = TcpListener::bind(&configuration.listen_on)?;
    tracing::info!("Listening on {}", configuration.listen_on);

    startup::startup(database, listener).await?;

    Ok(())
}
