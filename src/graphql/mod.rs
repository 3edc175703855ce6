//! GraphQL schema over the TMDB REST API.
//!
//! - [`QueryRoot`]: `movies`, `movie(id, imdb_id)`, `search(q)`
//! - [`MutationRoot`]: `rateMovie(id, rating)`

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{Media, SearchResult};

use async_graphql::{EmptySubscription, Schema};
use std::sync::Arc;

use crate::session::GuestSessionCache;
use crate::tmdb::TmdbApi;

pub type MovieSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(tmdb: Arc<dyn TmdbApi>) -> MovieSchema {
    build_schema_with_sessions(tmdb, Arc::new(GuestSessionCache::new()))
}

/// Builds the schema around an existing guest session cache.
pub fn build_schema_with_sessions(
    tmdb: Arc<dyn TmdbApi>,
    sessions: Arc<GuestSessionCache>,
) -> MovieSchema {
    // `Media` is not returned by any field, so it has to be registered by hand.
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .register_output_type::<Media>()
        .data(tmdb)
        .data(sessions)
        .finish()
}
