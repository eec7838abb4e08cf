use tracing::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::configuration::LogFormat;

pub fn get_subscriber(env_filter: &str, format: LogFormat) -> impl Subscriber + Sync + Send {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let fmt = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    Registry::default().with(env_filter).with(fmt)
}

/// Install the subscriber globally, `log` records included
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send + 'static) -> anyhow::Result<()> {
    subscriber.try_init()?;

    Ok(())
}
