use crate::config::Settings;
use crate::db::Connector;
use crate::page::{self, PageQuery};
use crate::render;
use actix_web::{web, HttpResponse};

pub struct AppState<C> {
    pub settings: Settings,
    pub connector: C,
}

impl<C> AppState<C> {
    pub fn new(settings: Settings, connector: C) -> Self {
        AppState {
            settings,
            connector,
        }
    }
}

pub async fn index<C: Connector + 'static>(
    state: web::Data<AppState<C>>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    let page = page::load_page(&state.connector, &state.settings, &query).await;
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render::render_page(&page))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}

pub fn routes<C: Connector + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index::<C>))
        .route("/health", web::get().to(health));
}
