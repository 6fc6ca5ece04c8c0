//! Directors resource: unpaginated listing plus by-id CRUD.

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
use models::{Director, DirectorInput};
use repo::DirectorRepo;

pub struct DirectorsModule;

impl DirectorsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for DirectorsModule {
    fn name(&self) -> &'static str {
        "directors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let rows = DirectorRepo::count(ctx.db.pool()).await?;
        tracing::info!(
            prefix = %utils::log_prefix(self.name()),
            rows,
            "directors module initialized"
        );
        Ok(())
    }

    fn routes(&self, db: Database) -> Router {
        Router::new()
            .route("/directors", get(list_directors).post(create_director))
            .route("/directors/", get(list_directors).post(create_director))
            .route(
                "/directors/{pk}",
                get(get_director).put(replace_director).delete(delete_director),
            )
            .with_state(db)
    }

    fn tables(&self) -> Vec<TableDef> {
        vec![TableDef {
            name: "directors",
            ddl: repo::CREATE_TABLE,
        }]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/directors/": {
                    "get": {
                        "summary": "List all directors",
                        "tags": ["Directors"],
                        "responses": {
                            "200": {
                                "description": "Every director",
                                "content": openapi::json_content(json!({
                                    "type": "array",
                                    "items": openapi::schema_ref("Director")
                                }))
                            }
                        }
                    },
                    "post": openapi::create_operation("Directors", "director", "DirectorInput")
                },
                "/directors/{pk}": openapi::item_operations("Directors", "director", "Director", "DirectorInput")
            },
            "components": {
                "schemas": {
                    "Director": openapi::schema_of::<Director>(),
                    "DirectorInput": openapi::schema_of::<DirectorInput>()
                }
            }
        }))
    }
}

async fn list_directors(State(db): State<Database>) -> AppResult<Json<Vec<Director>>> {
    Ok(Json(DirectorRepo::list_all(db.pool()).await?))
}

async fn get_director(
    State(db): State<Database>,
    Path(pk): Path<i64>,
) -> AppResult<Json<Director>> {
    DirectorRepo::find_by_id(db.pool(), pk)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("director {pk} not found")))
}

async fn create_director(
    State(db): State<Database>,
    Json(input): Json<DirectorInput>,
) -> AppResult<impl IntoResponse> {
    let mut tx = db.begin().await?;
    let id = DirectorRepo::insert(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(director_id = id, "director created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/directors/{id}"))],
    ))
}

async fn replace_director(
    State(db): State<Database>,
    Path(pk): Path<i64>,
    Json(input): Json<DirectorInput>,
) -> AppResult<StatusCode> {
    let mut tx = db.begin().await?;
    let rows = DirectorRepo::update(&mut *tx, pk, &input).await?;
    AppError::expect_single_row(rows, "director", pk)?;
    tx.commit().await?;

    tracing::info!(director_id = pk, rows, "director replaced");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_director(
    State(db): State<Database>,
    Path(pk): Path<i64>,
) -> AppResult<StatusCode> {
    let mut tx = db.begin().await?;
    let rows = DirectorRepo::delete(&mut *tx, pk).await?;
    AppError::expect_single_row(rows, "director", pk)?;
    tx.commit().await?;

    tracing::info!(director_id = pk, rows, "director deleted");
    Ok(StatusCode::OK)
}

/// Create a new instance of the directors module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(DirectorsModule::new())
}
