use anyhow::bail;
use reqwest::Client;

use blog_api::configuration::ApplicationConfiguration;
use blog_api::observability;
use blog_api::smoke::SmokeClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = ApplicationConfiguration::from_env();

    let subscriber = observability::get_subscriber("info", configuration.log_format);
    observability::init_subscriber(subscriber)?;

    let report = SmokeClient::new(Client::new(), &configuration.base_url)
        .run()
        .await?;

    for outcome in &report.steps {
        let verdict = if outcome.ok { "ok" } else { "FAILED" };
        println!("{:<10} {} {}", outcome.step, outcome.status, verdict);
    }

    if !report.success() {
        bail!("Smoke test failed against {}", configuration.base_url);
    }

    Ok(())
}
