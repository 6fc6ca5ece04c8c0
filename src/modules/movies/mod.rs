//! Movies resource: paginated, filterable listing plus by-id CRUD.

pub mod models;
pub mod repo;

use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
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
use models::{Movie, MovieFilter, MovieInput};
use repo::MovieRepo;

pub struct MoviesModule;

impl MoviesModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for MoviesModule {
    fn name(&self) -> &'static str {
        "movies"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let rows = MovieRepo::count(ctx.db.pool()).await?;
        tracing::info!(
            prefix = %utils::log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            rows,
            "movies module initialized"
        );
        Ok(())
    }

    fn routes(&self, db: Database) -> Router {
        Router::new()
            .route("/movies", get(list_movies).post(create_movie))
            .route("/movies/", get(list_movies).post(create_movie))
            .route("/movies/page/{page}", get(list_movies_page))
            .route(
                "/movies/{pk}",
                get(get_movie).put(replace_movie).delete(delete_movie),
            )
            .with_state(db)
    }

    fn tables(&self) -> Vec<TableDef> {
        vec![TableDef {
            name: "movies",
            ddl: repo::CREATE_TABLE,
        }]
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let filters = json!([
            openapi::query_param("director_id", "Only movies by this director"),
            openapi::query_param("genre_id", "Only movies of this genre")
        ]);
        let page = json!({
            "description": format!("Up to {} movies, ordered by id", repo::PAGE_SIZE),
            "content": openapi::json_content(json!({
                "type": "array",
                "items": openapi::schema_ref("Movie")
            }))
        });
        let mut page_params = filters.clone();
        if let Some(params) = page_params.as_array_mut() {
            params.insert(0, openapi::path_param("page"));
        }

        Some(json!({
            "paths": {
                "/movies/": {
                    "get": {
                        "summary": "List the first page of movies",
                        "tags": ["Movies"],
                        "parameters": filters,
                        "responses": { "200": page }
                    },
                    "post": openapi::create_operation("Movies", "movie", "MovieInput")
                },
                "/movies/page/{page}": {
                    "get": {
                        "summary": "List a page of movies",
                        "tags": ["Movies"],
                        "parameters": page_params,
                        "responses": { "200": page }
                    }
                },
                "/movies/{pk}": openapi::item_operations("Movies", "movie", "Movie", "MovieInput")
            },
            "components": {
                "schemas": {
                    "Movie": openapi::schema_of::<Movie>(),
                    "MovieInput": openapi::schema_of::<MovieInput>()
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "movies module stopped");
        Ok(())
    }
}

async fn list_movies(
    State(db): State<Database>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list_page(db.pool(), &filter, 1).await?;
    Ok(Json(movies))
}

async fn list_movies_page(
    State(db): State<Database>,
    Path(page): Path<i64>,
    Query(filter): Query<MovieFilter>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list_page(db.pool(), &filter, page).await?;
    Ok(Json(movies))
}

async fn get_movie(State(db): State<Database>, Path(pk): Path<i64>) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::find_by_id(db.pool(), pk)
        .await?
        .ok_or_else(|| AppError::not_found(format!("movie {pk} not found")))?;
    Ok(Json(movie))
}

async fn create_movie(
    State(db): State<Database>,
    Json(input): Json<MovieInput>,
) -> AppResult<impl IntoResponse> {
    let mut tx = db.begin().await?;
    let id = MovieRepo::insert(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(movie_id = id, "movie created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/movies/{id}"))],
    ))
}

async fn replace_movie(
    State(db): State<Database>,
    Path(pk): Path<i64>,
    Json(input): Json<MovieInput>,
) -> AppResult<StatusCode> {
    let mut tx = db.begin().await?;
    let rows = MovieRepo::update(&mut *tx, pk, &input).await?;
    AppError::expect_single_row(rows, "movie", pk)?;
    tx.commit().await?;

    tracing::info!(movie_id = pk, rows, "movie replaced");
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_movie(State(db): State<Database>, Path(pk): Path<i64>) -> AppResult<StatusCode> {
    let mut tx = db.begin().await?;
    let rows = MovieRepo::delete(&mut *tx, pk).await?;
    AppError::expect_single_row(rows, "movie", pk)?;
    tx.commit().await?;

    tracing::info!(movie_id = pk, rows, "movie deleted");
    Ok(StatusCode::OK)
}

/// Create a new instance of the movies module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(MoviesModule::new())
}
