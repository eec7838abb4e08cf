use std::net::TcpListener;

use reqwest::Client;

use blog_api::database::init_memory_connection;
use blog_api::startup;

pub struct TestApp {
    /// API root, `/api` included
    pub address: String,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Serve a fresh in-memory database on a random port
pub async fn spawn_app() -> TestApp {
    let database = init_memory_connection().await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = startup::run(database, listener).unwrap();
    tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}/api", port),
        client: Client::new(),
    }
}
