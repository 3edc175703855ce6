use async_graphql::{Context, Object, Result, ID};
use std::sync::Arc;
use tracing::info;

use crate::error::upstream;
use crate::session::GuestSessionCache;
use crate::tmdb::TmdbApi;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Rate a movie as a TMDB guest. Returns the submitted rating.
    async fn rate_movie(&self, ctx: &Context<'_>, id: ID, rating: i32) -> Result<Option<i32>> {
        let tmdb = ctx.data::<Arc<dyn TmdbApi>>()?;
        let sessions = ctx.data::<Arc<GuestSessionCache>>()?;

        let session_id = sessions
            .get_or_create(tmdb.as_ref())
            .await
            .map_err(upstream)?;
        info!("Rating movie {} with {}", id.as_str(), rating);
        tmdb.rate_movie(id.as_str(), &session_id, rating)
            .await
            .map_err(upstream)?;
        Ok(Some(rating))
    }
}
