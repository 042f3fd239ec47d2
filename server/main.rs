use actix_files::Files;
use actix_web::{App, HttpServer, middleware};
use std::env;

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Get port from environment or default to 8080
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    let dist_dir = env_or("DIST_DIR", "./dist");
    let data_dir = env_or("DATA_DIR", "./data");

    log::info!("Serving {dist_dir} with datasets from {data_dir} on 0.0.0.0:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/data", &data_dir))
            .service(Files::new("/", &dist_dir).index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
