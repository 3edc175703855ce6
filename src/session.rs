//! Guest session state shared by rating mutations.
//!
//! TMDB only accepts ratings tied to a guest session. One session is created
//! lazily on the first rating and reused for the rest of the process; it is
//! never refreshed. The lock is held across the creation call so concurrent
//! first ratings still produce a single upstream session.

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::info;

use crate::tmdb::TmdbApi;

#[derive(Debug, Default)]
pub struct GuestSessionCache {
    session_id: Mutex<Option<String>>,
}

impl GuestSessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_create(&self, tmdb: &dyn TmdbApi) -> Result<String> {
        let mut guard = self.session_id.lock().await;
        if let Some(id) = guard.as_ref() {
            return Ok(id.clone());
        }
        // A failed creation leaves the cache empty so the next rating retries.
        let session = tmdb
            .create_guest_session()
            .await
            .context("Failed to create TMDB guest session")?;
        info!("Created TMDB guest session");
        *guard = Some(session.guest_session_id.clone());
        Ok(session.guest_session_id)
    }

    pub async fn cached(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;
    use crate::tmdb::{FindResults, GuestSession};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Default)]
    struct SessionOnlyTmdb {
        created: AtomicUsize,
        fail_first: bool,
    }

    #[async_trait]
    impl TmdbApi for SessionOnlyTmdb {
        async fn create_guest_session(&self) -> Result<GuestSession> {
            let n = self.created.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            if self.fail_first && n == 0 {
                anyhow::bail!("upstream unavailable");
            }
            Ok(GuestSession {
                guest_session_id: format!("guest-{n}"),
            })
        }
        async fn fetch_movie(&self, _id: &str) -> Result<Movie> {
            unreachable!("not used by session tests")
        }
        async fn find_by_imdb(&self, _imdb_id: &str) -> Result<FindResults> {
            unreachable!("not used by session tests")
        }
        async fn discover_movies(&self) -> Result<Vec<Movie>> {
            unreachable!("not used by session tests")
        }
        async fn rate_movie(&self, _id: &str, _session: &str, _rating: i32) -> Result<()> {
            unreachable!("not used by session tests")
        }
    }

    #[tokio::test]
    async fn starts_unset_and_reuses_first_session() {
        let tmdb = SessionOnlyTmdb::default();
        let cache = GuestSessionCache::new();
        assert_eq!(cache.cached().await, None);

        let first = cache.get_or_create(&tmdb).await.unwrap();
        let second = cache.get_or_create(&tmdb).await.unwrap();
        let third = cache.get_or_create(&tmdb).await.unwrap();

        assert_eq!(first, "guest-0");
        assert_eq!(second, first);
        assert_eq!(third, first);
        assert_eq!(tmdb.created.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached().await.as_deref(), Some("guest-0"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_calls_create_one_session() {
        let tmdb = Arc::new(SessionOnlyTmdb::default());
        let cache = Arc::new(GuestSessionCache::new());

        let handles = (0..8)
            .map(|_| {
                let tmdb = tmdb.clone();
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_or_create(tmdb.as_ref()).await })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "guest-0");
        }
        assert_eq!(tmdb.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_creation_is_retried_next_time() {
        let tmdb = SessionOnlyTmdb {
            fail_first: true,
            ..Default::default()
        };
        let cache = GuestSessionCache::new();

        let err = cache.get_or_create(&tmdb).await.unwrap_err();
        assert!(format!("{err:#}").contains("upstream unavailable"));
        assert_eq!(cache.cached().await, None);

        assert_eq!(cache.get_or_create(&tmdb).await.unwrap(), "guest-1");
        assert_eq!(tmdb.created.load(Ordering::SeqCst), 2);
    }
}
