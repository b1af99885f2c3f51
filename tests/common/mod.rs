//! Shared test doubles and fixtures for the integration suites.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use repocache::adapters::sqlite::{create_migrated_test_pool, SqliteRepoStore};
use repocache::domain::errors::{RemoteError, ServiceError, ServiceResult};
use repocache::domain::models::RepoRecord;
use repocache::{RemoteRepoSource, RepoDescriptor, RepoStore};

/// What the scripted remote should answer with.
pub enum RemoteMode {
    Repos(Vec<RepoDescriptor>),
    RateLimited,
    Unreachable,
}

/// Remote source double that counts calls and answers from a script.
pub struct ScriptedRemote {
    mode: RemoteMode,
    delay: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
}

impl ScriptedRemote {
    pub fn new(mode: RemoteMode) -> Self {
        Self {
            mode,
            delay: None,
            list_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
        }
    }

    /// Delay every answer, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst) + self.get_calls.load(Ordering::SeqCst)
    }

    fn scripted_error(&self) -> Option<RemoteError> {
        match self.mode {
            RemoteMode::Repos(_) => None,
            RemoteMode::RateLimited => Some(RemoteError::RateLimited {
                retry_after_secs: Some(60),
            }),
            RemoteMode::Unreachable => Some(RemoteError::Unreachable("scripted outage".into())),
        }
    }
}

#[async_trait]
impl RemoteRepoSource for ScriptedRemote {
    async fn list_repos(&self, _username: &str) -> Result<Vec<RepoDescriptor>, RemoteError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.scripted_error() {
            return Err(err);
        }
        match &self.mode {
            RemoteMode::Repos(repos) => Ok(repos.clone()),
            _ => unreachable!(),
        }
    }

    async fn get_repo(
        &self,
        _username: &str,
        repo_name: &str,
    ) -> Result<Option<RepoDescriptor>, RemoteError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.scripted_error() {
            return Err(err);
        }
        match &self.mode {
            RemoteMode::Repos(repos) => Ok(repos.iter().find(|r| r.name == repo_name).cloned()),
            _ => unreachable!(),
        }
    }
}

/// Store double over the real SQLite store that counts reads and writes
/// and can be told to fail writes.
pub struct CountingStore {
    inner: SqliteRepoStore,
    pub read_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl CountingStore {
    pub async fn new() -> Self {
        let pool = create_migrated_test_pool().await.unwrap();
        Self {
            inner: SqliteRepoStore::new(pool),
            read_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn total_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst) + self.write_calls.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> ServiceResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("scripted write failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RepoStore for CountingStore {
    async fn find_by_username(&self, username: &str) -> ServiceResult<Vec<RepoRecord>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_username(username).await
    }

    async fn find_by_username_and_name(
        &self,
        username: &str,
        repo_name: &str,
    ) -> ServiceResult<Option<RepoRecord>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_username_and_name(username, repo_name).await
    }

    async fn save(&self, record: &RepoRecord) -> ServiceResult<RepoRecord> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.inner.save(record).await
    }

    async fn save_all(&self, records: &[RepoRecord]) -> ServiceResult<Vec<RepoRecord>> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_write()?;
        self.inner.save_all(records).await
    }

    async fn find_all(&self) -> ServiceResult<Vec<RepoRecord>> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }
}

/// One-descriptor fixture matching GitHub's canonical example user.
pub fn octocat_descriptors() -> Vec<RepoDescriptor> {
    vec![RepoDescriptor {
        name: "Hello-World".to_string(),
        url: "https://github.com/octocat/Hello-World".to_string(),
    }]
}
