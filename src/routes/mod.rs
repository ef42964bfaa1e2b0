pub mod animais;
pub mod auth;
pub mod dashboard;
pub mod financeiro;
pub mod inicializar;
pub mod reproducao;
pub mod saude;
pub mod usuarios;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/auth/cadastro", post(auth::cadastro))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/perfil", get(auth::perfil))
        // Animais
        .route("/api/animais", get(animais::list).post(animais::create))
        .route("/api/animais/cadastrar", post(animais::cadastrar))
        .route(
            "/api/animais/{id}",
            get(animais::get)
                .put(animais::update)
                .delete(animais::delete),
        )
        // Saúde
        .route("/api/saude", get(saude::list).post(saude::create))
        .route(
            "/api/saude/{id}",
            get(saude::get).put(saude::update).delete(saude::delete),
        )
        // Financeiro
        .route(
            "/api/financeiro",
            get(financeiro::list).post(financeiro::create),
        )
        .route(
            "/api/financeiro/{id}",
            get(financeiro::get)
                .put(financeiro::update)
                .delete(financeiro::delete),
        )
        // Reprodução
        .route(
            "/api/reproducao",
            get(reproducao::list).post(reproducao::create),
        )
        .route(
            "/api/reproducao/{id}",
            get(reproducao::get)
                .put(reproducao::update)
                .delete(reproducao::delete),
        )
        // Usuários
        .route("/api/usuarios", get(usuarios::list).post(usuarios::create))
        .route(
            "/api/usuarios/{id}",
            axum::routing::put(usuarios::update).delete(usuarios::delete),
        )
        // Dashboard
        .route("/api/dashboard/resumo", get(dashboard::resumo))
        // Bootstrap
        .route("/api/inicializar", get(inicializar::inicializar))
}
