use async_graphql::{Context, ErrorExtensions, Object, Result, ID};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::types::SearchResult;
use crate::error::{upstream, ApiError};
use crate::models::Movie;
use crate::tmdb::TmdbApi;

pub struct QueryRoot;

#[Object(rename_args = "snake_case")]
impl QueryRoot {
    /// First page of TMDB discovery, most popular first.
    async fn movies(&self, ctx: &Context<'_>) -> Result<Option<Vec<Movie>>> {
        let tmdb = ctx.data::<Arc<dyn TmdbApi>>()?;
        info!("Resolving popular movies");
        let movies = tmdb.discover_movies().await.map_err(upstream)?;
        debug!("Discover returned {} movies", movies.len());
        Ok(Some(movies))
    }

    /// Look a movie up by TMDB id, or by IMDb id when no TMDB id is given.
    async fn movie(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        imdb_id: Option<String>,
    ) -> Result<Option<Movie>> {
        let tmdb = ctx.data::<Arc<dyn TmdbApi>>()?;

        if let Some(id) = id.filter(|id| !id.is_empty()) {
            info!("Resolving movie {}", id.as_str());
            let movie = tmdb.fetch_movie(id.as_str()).await.map_err(upstream)?;
            return Ok(Some(movie));
        }

        if let Some(imdb_id) = imdb_id.filter(|imdb| !imdb.is_empty()) {
            info!("Resolving movie for IMDb id {}", imdb_id);
            let found = tmdb.find_by_imdb(&imdb_id).await.map_err(upstream)?;
            let Some(first) = found.movie_results.first() else {
                debug!("No TMDB movie matches IMDb id {}", imdb_id);
                return Ok(None);
            };
            debug!("IMDb id {} -> TMDB id {}", imdb_id, first.id);
            let movie = tmdb
                .fetch_movie(&first.id.to_string())
                .await
                .map_err(upstream)?;
            return Ok(Some(movie));
        }

        debug!("movie called without id or imdb_id");
        Ok(None)
    }

    async fn search(&self, q: String) -> Result<Option<SearchResult>> {
        warn!("search({:?}) requested but not implemented", q);
        Err(ApiError::NotImplemented("search").extend())
    }
}
