//! Genres resource.

pub mod models;
pub mod repo;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use cinema_db::{Database, TableDef};
use cinema_http::{AppError, AppResult};
use cinema_kernel::{InitCtx, Module};
use serde_json::json;

use crate::utils::{self, openapi};
use models::{Genre, GenreInput};
use repo::GenreRepo;

pub struct GenresModule;

impl GenresModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for GenresModule {
    fn name(&self) -> &'static str {
        "genres"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let rows = GenreRepo::count(ctx.db.pool()).await?;
        tracing::info!(
            prefix = %utils::log_prefix(self.name()),
            rows,
            "genres module initialized"
        );
        Ok(())
    }

    fn routes(&self, db: Database) -> Router {
        Router::new()
            .route("/genres", get(list_genres).post(create_genre))
            .route("/genres/", get(list_genres).post(create_genre))
            .route(
                "/genres/{pk}",
                get(get_genre).put(replace_genre).delete(delete_genre),
            )
            .with_state(db)
    }

    fn tables(&self) -> Vec<TableDef> {
        vec![TableDef {
            name: "genres",
            ddl: repo::CREATE_TABLE,
        }]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/genres/": {
                    "get": {
                        "summary": "List all genres",
                        "tags": ["Genres"],
                        "responses": {
                            "200": {
                                "description": "Every genre",
                                "content": openapi::json_content(json!({
                                    "type": "array",
                                    "items": openapi::schema_ref("Genre")
                                }))
                            }
                        }
                    },
                    "post": openapi::create_operation("Genres", "genre", "GenreInput")
                },
                "/genres/{pk}": openapi::item_operations("Genres", "genre", "Genre", "GenreInput")
            },
            "components": {
                "schemas": {
                    "Genre": openapi::schema_of::<Genre>(),
                    "GenreInput": openapi::schema_of::<GenreInput>()
                }
            }
        }))
    }
}

async fn list_genres(State(db): State<Database>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(GenreRepo::list_all(db.pool()).await?))
}

async fn get_genre(State(db): State<Database>, Path(pk): Path<i64>) -> AppResult<Json<Genre>> {
    match GenreRepo::find_by_id(db.pool(), pk).await? {
        Some(genre) => Ok(Json(genre)),
        None => Err(AppError::not_found(format!("genre {pk} not found"))),
    }
}

async fn create_genre(
    State(db): State<Database>,
    Json(input): Json<GenreInput>,
) -> AppResult<impl IntoResponse> {
    let mut tx = db.begin().await?;
    let id = GenreRepo::insert(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(genre_id = id, "genre created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/genres/{id}"))],
    ))
}

async fn replace_genre(
    State(db): State<Database>,
    Path(pk): Path<i64>,
    Json(input): Json<GenreInput>,
) -> AppResult<StatusCode> {
    let mut tx = db.begin().await?;
    let rows = GenreRepo::update(&mut *tx, pk, &input).await?;
    AppError::expect_single_row(rows, "genre", pk)?;
    tx.commit().await?;

    tracing::info!(genre_id = pk, rows, "genre replaced");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_genre(
    State(db): State<Database>,
    Path(pk): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = db.begin().await?;
    let rows = GenreRepo::delete(&mut *tx, pk).await?;
    AppError::expect_single_row(rows, "genre", pk)?;
    tx.commit().await?;

    tracing::info!(genre_id = pk, rows, "genre deleted");
    Ok(StatusCode::OK)
}

/// Create a new instance of the genres module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(GenresModule::new())
}
