use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use tracing::debug;

use crate::models::Movie;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
const LANGUAGE: &str = "en-US";

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[async_trait]
pub trait TmdbApi: Send + Sync {
    async fn create_guest_session(&self) -> Result<GuestSession>;
    async fn fetch_movie(&self, id: &str) -> Result<Movie>;
    async fn find_by_imdb(&self, imdb_id: &str) -> Result<FindResults>;
    async fn discover_movies(&self) -> Result<Vec<Movie>>;
    /// Submits a rating; whatever JSON upstream answers with is discarded.
    async fn rate_movie(&self, id: &str, guest_session_id: &str, rating: i32) -> Result<()>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuestSession {
    pub guest_session_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindResults {
    #[serde(default)]
    pub movie_results: Vec<FindResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindResult {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct DiscoverPage {
    results: Vec<Movie>,
}

impl TmdbClient {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("MOVIE_DB_API_KEY").context("MOVIE_DB_API_KEY not set")?;
        Self::new(api_key, TMDB_BASE)
    }

    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("moviegraph/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn guest_session_url(&self) -> String {
        format!(
            "{}/authentication/guest_session/new?api_key={}&language={LANGUAGE}",
            self.base_url, self.api_key
        )
    }

    fn movie_url(&self, id: &str) -> String {
        format!(
            "{}/movie/{}?api_key={}&language={LANGUAGE}",
            self.base_url,
            urlencoding::encode(id),
            self.api_key
        )
    }

    fn find_url(&self, imdb_id: &str) -> String {
        format!(
            "{}/find/{}?api_key={}&language={LANGUAGE}&external_source=imdb_id",
            self.base_url,
            urlencoding::encode(imdb_id),
            self.api_key
        )
    }

    fn discover_url(&self) -> String {
        format!(
            "{}/discover/movie/?api_key={}&language={LANGUAGE}&sort_by=popularity.desc",
            self.base_url, self.api_key
        )
    }

    fn rating_url(&self, id: &str, guest_session_id: &str) -> String {
        format!(
            "{}/movie/{}/rating?api_key={}&guest_session_id={}&language={LANGUAGE}",
            self.base_url,
            urlencoding::encode(id),
            self.api_key,
            urlencoding::encode(guest_session_id)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("request failed")?;
        decode_response(url, res).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let res = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("request failed")?;
        decode_response(url, res).await
    }
}

async fn decode_response<T: DeserializeOwned>(url: &str, res: reqwest::Response) -> Result<T> {
    let status = res.status();
    let text = res.text().await.context("reading body failed")?;
    if !status.is_success() {
        return Err(anyhow!("{} -> {} {}", redact_secrets(url), status, text));
    }
    let parsed: T = serde_json::from_str(&text).context("JSON parse failed")?;
    Ok(parsed)
}

// Keeps credentials out of error messages that end up in GraphQL responses.
fn redact_secrets(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let params = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("api_key", _)) => "api_key=***",
            Some(("guest_session_id", _)) => "guest_session_id=***",
            _ => pair,
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{params}")
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn create_guest_session(&self) -> Result<GuestSession> {
        self.get_json(&self.guest_session_url()).await
    }

    async fn fetch_movie(&self, id: &str) -> Result<Movie> {
        debug!("Fetching TMDB movie {}", id);
        self.get_json(&self.movie_url(id)).await
    }

    async fn find_by_imdb(&self, imdb_id: &str) -> Result<FindResults> {
        debug!("Looking up TMDB movie for IMDb id {}", imdb_id);
        self.get_json(&self.find_url(imdb_id)).await
    }

    async fn discover_movies(&self) -> Result<Vec<Movie>> {
        let page: DiscoverPage = self.get_json(&self.discover_url()).await?;
        Ok(page.results)
    }

    async fn rate_movie(&self, id: &str, guest_session_id: &str, rating: i32) -> Result<()> {
        let url = self.rating_url(id, guest_session_id);
        let _response: Value = self.post_json(&url, &json!({ "value": rating })).await?;
        Ok(())
    }
}
