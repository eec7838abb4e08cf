use anyhow::Context;

use blog_api::configuration::ApplicationConfiguration;
use blog_api::database::init_sqlite_connection;
use blog_api::observability;
use blog_api::seed::seed;
use blog_api::services::articles::ArticleService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = ApplicationConfiguration::from_env();

    let subscriber = observability::get_subscriber("info", configuration.log_format);
    observability::init_subscriber(subscriber)?;

    let database = init_sqlite_connection(&configuration)
        .await
        .with_context(|| format!("Could not open {}", configuration.database_url))?;
    let service = ArticleService::new(database);

    let report = seed(&service).await.context("Seeding failed")?;

    println!("Created {} new sample articles.", report.created);
    println!("Total articles in database: {}", report.total);

    Ok(())
}
