use std::env::var;
use std::str::FromStr;

/// # Application configuration
///
/// Read from the environment, `.env` included.
#[derive(Debug, Clone)]
pub struct ApplicationConfiguration {
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_on: String,
    pub base_url: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for ApplicationConfiguration {
    fn default() -> Self {
        ApplicationConfiguration {
            database_url: String::from("sqlite://blog.db?mode=rwc"),
            database_max_connections: 5,
            listen_on: String::from("127.0.0.1:8000"),
            base_url: String::from("http://127.0.0.1:8000/api"),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ApplicationConfiguration {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        ApplicationConfiguration {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_or_default(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            listen_on: var("BLOG_API_LISTEN_ON").unwrap_or(defaults.listen_on),
            base_url: var("BLOG_API_BASE_URL").unwrap_or(defaults.base_url),
            log_format: match var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => defaults.log_format,
            },
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value {raw:?} for {key}, falling back to {default}");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;

    #[test]
    fn defaults_target_a_local_sqlite_file() {
        let configuration = ApplicationConfiguration::default();

        assert_that!(configuration.database_url).starts_with("sqlite://");
        assert_that!(configuration.database_max_connections).is_equal_to(5u32);
        assert_that!(configuration.log_format).is_equal_to(LogFormat::Pretty);
    }

    #[test]
    fn missing_variables_fall_back() {
        assert_that!(parse_or_default("BLOG_API_SURELY_UNSET_VARIABLE", 7u32)).is_equal_to(7u32);
    }
}
