//! Registry HTTP server

use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{middleware, web, App, HttpServer};
use tracing::info;

use onionnet_protocol::NetworkConfig;

use crate::api;
use crate::directory::NodeDirectory;
use crate::error::Result;

/// Serve `directory` on an already bound listener
pub fn serve_registry(directory: web::Data<NodeDirectory>, listener: TcpListener) -> Result<Server> {
    let address = listener.local_addr()?;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(directory.clone())
            .wrap(middleware::Logger::default())
            .wrap(actix_cors::Cors::permissive())
            .configure(api::configure_routes)
    })
    .listen(listener)?
    .run();

    info!("Registry listening on {}", address);
    Ok(server)
}

/// Bind the registry port from `config` and start serving an empty directory
pub fn launch_registry(config: &NetworkConfig) -> Result<(Server, web::Data<NodeDirectory>)> {
    let listener = TcpListener::bind((config.host.as_str(), config.registry_port))?;
    let directory = web::Data::new(NodeDirectory::new());
    let server = serve_registry(directory.clone(), listener)?;
    Ok((server, directory))
}
