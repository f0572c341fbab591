use actix_web::{http::Method, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod client;
mod config;
mod cors;
mod error;
mod log;
mod models;
mod routes;

use client::{InnertubeClient, VideoLookup};
use config::Config;

pub struct AppState {
    pub lookup: Arc<dyn VideoLookup>,
}

async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Video Lookup Service is running")
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::video::get_video,
        routes::related::get_related,
        routes::formats::get_formats,
    ),
    components(schemas(
        routes::video::VideoInfoResponse,
        routes::related::RelatedResponse,
        routes::formats::FormatsResponse,
        models::RelatedVideo,
        models::CommentEntry,
        models::MediaFormat,
    ))
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log::init_logger();

    let config = Config::from_env();
    let port = config.port;

    // Refuse to serve at all if the client cannot be constructed.
    let client = Arc::new(
        InnertubeClient::new(&config).expect("Failed to construct YouTube client"),
    );

    // One initialization attempt; requests arriving before it completes
    // (or after it fails) are answered with 503.
    {
        let init = Arc::clone(&client);
        tokio::spawn(async move {
            init.initialize().await;
        });
    }

    let app_state = web::Data::new(AppState {
        lookup: client as Arc<dyn VideoLookup>,
    });

    log::info!("Starting Video Lookup Service on port {}...", port);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(cors::CrossOrigin)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::resource("/")
                    .route(web::get().to(index))
                    .route(web::method(Method::OPTIONS).to(cors::preflight)),
            )
            .service(
                web::resource("/get/{video_id:.*}")
                    .route(web::get().to(routes::video::get_video))
                    .route(web::method(Method::OPTIONS).to(cors::preflight)),
            )
            .service(
                web::resource("/related/{video_id:.*}")
                    .route(web::get().to(routes::related::get_related))
                    .route(web::method(Method::OPTIONS).to(cors::preflight)),
            )
            .service(
                web::resource("/formats/{video_id:.*}")
                    .route(web::get().to(routes::formats::get_formats))
                    .route(web::method(Method::OPTIONS).to(cors::preflight)),
            )
            .default_service(web::route().to(cors::fallback))
    })
    .bind(("0.0.0.0", port))?
    .run();

    log::info!("Server running at http://localhost:{}/", port);

    server.await
}
