//! Execute a GraphQL document against the live TMDB-backed schema and print the response.
//! Usage:
//!   cargo run --bin run_query -- '{ movie(imdb_id: "tt0133093") { id title budget } }'
//!   cargo run --bin run_query -- 'mutation($id: ID!) { rateMovie(id: $id, rating: 8) }' '{"id": "603"}'
//! Requires MOVIE_DB_API_KEY in the environment (.env supported).

use anyhow::{Context, Result};
use async_graphql::{Request, Variables};
use dotenvy::dotenv;
use moviegraph::graphql::build_schema;
use moviegraph::tmdb::{TmdbApi, TmdbClient};
use serde_json::Value;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let mut args = env::args().skip(1);
    let document = args
        .next()
        .context("usage: run_query '<graphql document>' ['<variables json>']")?;
    let variables = match args.next() {
        Some(raw) => {
            let value: Value = serde_json::from_str(&raw).context("variables must be JSON")?;
            Some(Variables::from_json(value))
        }
        None => None,
    };

    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::from_env()?);
    let schema = build_schema(tmdb);

    let mut request = Request::new(document);
    if let Some(vars) = variables {
        request = request.variables(vars);
    }
    let response = schema.execute(request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
