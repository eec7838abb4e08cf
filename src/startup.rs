use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer, Scope};

use crate::database::Pool;
use crate::routes;
use crate::services::articles::ArticleService;

#[derive(Clone)]
pub struct ApplicationServices {
    pub article_service: ArticleService,
}

pub fn build_services(database: &Pool) -> ApplicationServices {
    ApplicationServices {
        article_service: ArticleService::new(database.clone()),
    }
}

/// Every route of the API, under `/api`
pub fn api_scope() -> Scope {
    web::scope("/api").configure(routes::configure)
}

/// Build the server on the listener, without awaiting it
pub fn run(database: Pool, listener: TcpListener) -> std::io::Result<Server> {
    let services = Data::new(build_services(&database));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(services.clone())
            .service(api_scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub async fn startup(database: Pool, listener: TcpListener) -> std::io::Result<()> {
    run(database, listener)?.await
}
