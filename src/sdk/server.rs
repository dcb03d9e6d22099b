use crate::sdk::routing::route::DirectionsService;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};

pub const DIRECTIONS_PATH: &str = "/directions/v5/mapbox/driving-traffic";

/// Mapbox-compatible directions endpoint. Failures of any kind answer 200
/// with an empty body, which clients of this bridge already rely on.
#[get("/directions/v5/mapbox/driving-traffic/{coordinates}")]
pub async fn driving_traffic(
    path: web::Path<String>,
    service: web::Data<DirectionsService>,
) -> impl Responder {
    let coordinates = path.into_inner();
    log::info!("GetRoute {}/{}", DIRECTIONS_PATH, coordinates);

    let request = coordinates.clone();
    let result = web::block(move || service.directions_for_path(&request)).await;

    match result {
        Ok(Ok(response)) => HttpResponse::Ok().json(response),
        Ok(Err(e)) => {
            if e.is_upstream() {
                log::error!("Directions for {} failed upstream: {}", coordinates, e);
            } else {
                log::warn!("No directions for {}: {}", coordinates, e);
            }
            HttpResponse::Ok().finish()
        }
        Err(e) => {
            log::error!("Directions worker for {} failed: {}", coordinates, e);
            HttpResponse::Ok().finish()
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(driving_traffic);
}

/// Serves the directions endpoint until the server is stopped.
pub async fn run(
    service: DirectionsService,
    host: &str,
    port: u16,
    workers: Option<usize>,
) -> std::io::Result<()> {
    let service = web::Data::new(service);
    let mut builder = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .configure(configure)
    });
    if let Some(workers) = workers {
        builder = builder.workers(workers);
    }

    log::info!("Listening on {}:{}", host, port);
    builder.bind((host, port))?.run().await
}
