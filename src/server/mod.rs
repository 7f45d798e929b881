pub mod handlers;
pub mod page;

use crate::{
    config::{Config, PaymentConfig},
    generator::MarketingGenerator,
    logger,
};
use actix_web::{middleware, web, App, HttpServer};

/// Base64 logos arrive inside JSON bodies, so the default 32 KiB limit is too small.
pub const MAX_JSON_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub generator: MarketingGenerator,
    pub payment: PaymentConfig,
}

impl AppState {
    pub fn new(generator: MarketingGenerator, payment: PaymentConfig) -> Self {
        Self { generator, payment }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(MAX_JSON_BYTES))
        .route("/", web::get().to(handlers::index))
        .route("/generate", web::post().to(handlers::generate_form))
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                .route("/packages", web::get().to(handlers::list_packages))
                .route("/generate", web::post().to(handlers::generate_json)),
        );
}

pub async fn run(config: Config, generator: MarketingGenerator) -> std::io::Result<()> {
    let (host, port) = config.bind_address();
    let state = web::Data::new(AppState::new(generator, config.payment.clone()));

    logger::log_startup_info(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        &host,
        port,
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
