//! In-memory editing sessions. Each session owns one [`ResumeStore`]; nothing
//! is persisted. A session ends when it is deleted, when it has been idle
//! longer than the configured TTL, or when the process exits.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::store::ResumeStore;

#[derive(Debug)]
pub struct Session {
    pub store: ResumeStore,
    pub created_at: DateTime<Utc>,
    /// Last read or write through the registry.
    pub last_touched: Instant,
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with an empty store.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            store: ResumeStore::new(),
            created_at: Utc::now(),
            last_touched: Instant::now(),
        };
        let mut sessions = self.inner.write().await;
        sessions.insert(id, session);
        info!(session_id = %id, active = sessions.len(), "Session created");
        id
    }

    /// Runs `f` against the session's store under the write lock.
    pub async fn with_store<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ResumeStore) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.last_touched = Instant::now();
        Ok(f(&mut session.store))
    }

    /// Owned copy of the session's current data. Counts as activity.
    pub async fn snapshot(&self, id: Uuid) -> Result<ResumeData, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.last_touched = Instant::now();
        Ok(session.store.snapshot().clone())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.remove(&id).ok_or_else(|| not_found(id))?;
        let age = Utc::now() - session.created_at;
        info!(
            session_id = %id,
            age_secs = age.num_seconds(),
            active = sessions.len(),
            "Session ended"
        );
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops every session untouched for at least `ttl`. Returns how many went.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let idle = session.last_touched.elapsed();
            if idle >= ttl {
                info!(session_id = %id, idle_secs = idle.as_secs(), "Session expired");
                false
            } else {
                true
            }
        });
        before - sessions.len()
    }

    /// Runs [`evict_idle`](Self::evict_idle) every `period` until the runtime shuts down.
    pub fn spawn_idle_sweeper(&self, ttl: Duration, period: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = registry.evict_idle(ttl).await;
                if evicted > 0 {
                    let active = registry.len().await;
                    info!(evicted, active, "Idle sessions swept");
                }
            }
        })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Section;

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = SessionRegistry::new();
        let a = registry.create().await;
        let b = registry.create().await;
        assert_ne!(a, b);

        registry
            .with_store(a, |store| store.add_entry(Section::Education))
            .await
            .unwrap();

        assert_eq!(registry.snapshot(a).await.unwrap().education.len(), 1);
        assert!(registry.snapshot(b).await.unwrap().education.is_empty());
    }

    #[tokio::test]
    async fn test_removed_session_is_gone() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        assert_eq!(registry.len().await, 1);

        registry.remove(id).await.unwrap();
        assert_eq!(registry.len().await, 0);
        assert!(matches!(
            registry.snapshot(id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            registry.remove(id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted_after_ttl() {
        let registry = SessionRegistry::new();
        let ttl = Duration::from_secs(60);
        let idle = registry.create().await;
        let active = registry.create().await;

        tokio::time::advance(Duration::from_secs(59)).await;
        registry.snapshot(active).await.unwrap();
        assert_eq!(registry.evict_idle(ttl).await, 0);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(registry.evict_idle(ttl).await, 1);
        assert!(matches!(
            registry.snapshot(idle).await,
            Err(AppError::NotFound(_))
        ));
        assert!(registry.snapshot(active).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_keep_a_session_alive() {
        let registry = SessionRegistry::new();
        let ttl = Duration::from_secs(30);
        let id = registry.create().await;

        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(20)).await;
            registry
                .with_store(id, |store| store.add_entry(Section::Projects))
                .await
                .unwrap();
            assert_eq!(registry.evict_idle(ttl).await, 0);
        }
        assert_eq!(registry.snapshot(id).await.unwrap().projects.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_abandoned_sessions() {
        let registry = SessionRegistry::new();
        registry.create().await;
        let sweeper = registry.spawn_idle_sweeper(Duration::from_secs(10), Duration::from_secs(1));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(registry.len().await, 1);

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(registry.len().await, 0);
        sweeper.abort();
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let registry = SessionRegistry::new();
        let result = registry.with_store(Uuid::new_v4(), |_| ()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
