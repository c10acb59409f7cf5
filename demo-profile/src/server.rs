use axum::Router;
use std::{env, net::SocketAddr};

const DEFAULT_PORT: u16 = 8080;

pub(crate) fn port_from_env() -> Result<u16, std::num::ParseIntError> {
    match env::var("PORT") {
        Ok(port) => port.parse(),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

pub(crate) async fn serve_http(port: u16, app: Router) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
}
