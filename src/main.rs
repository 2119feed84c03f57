use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use comment_board::{config::Config, store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let store = web::Data::from(store::open(&config.storage)?);

    let bind = (config.host.clone(), config.port);
    let cors_origin = config.cors_origin.clone();
    match &cors_origin {
        Some(origin) => tracing::info!("CORS allowed origin: {origin}"),
        None => tracing::warn!("CORS_ORIGIN not set, cross-origin requests are refused"),
    }
    tracing::info!("Comment board listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(comment_board::cors(cors_origin.as_deref()))
            .wrap(Logger::default())
            .configure(comment_board::config)
    })
    .bind(bind)
    .context("Failed to bind")?
    .run()
    .await?;

    Ok(())
}
