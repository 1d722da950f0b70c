//! In-memory repositories for tests
//!
//! Enabled for this crate's unit tests and, through the `testing` feature,
//! for the HTTP integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use userbind_common::auth::{hash_password, JwtService};
use userbind_core::entities::{ScoreboardRow, StudentInvite, User};
use userbind_core::error::DomainError;
use userbind_core::traits::{InviteRepository, RepoResult, ScoreboardRepository, UserRepository};
use userbind_core::value_objects::{Privileges, UserId};

use crate::services::{ServiceContext, ServiceContextBuilder};

/// Password given to accounts created through [`TestFixture::add_user`]
pub const TEST_PASSWORD: &str = "password123";

// ============================================================================
// Invites
// ============================================================================

/// Invites keyed by code. Redemption writes identities through `users`.
pub struct InMemoryInviteRepository {
    invites: Mutex<HashMap<String, StudentInvite>>,
    users: Arc<dyn UserRepository>,
    forced_collisions: AtomicUsize,
}

impl InMemoryInviteRepository {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            invites: Mutex::new(HashMap::new()),
            users,
            forced_collisions: AtomicUsize::new(0),
        }
    }

    /// Store an invite as-is, keeping its `created_at`
    pub fn insert(&self, invite: StudentInvite) {
        self.invites.lock().insert(invite.code.clone(), invite);
    }

    /// Make the next `n` calls to `create` report a code collision
    pub fn fail_next_creates(&self, n: usize) {
        self.forced_collisions.store(n, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.invites.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Undo a claim whose identity write failed
    fn release(&self, code: &str) {
        if let Some(invite) = self.invites.lock().get_mut(code) {
            invite.used = false;
            invite.used_by = None;
            invite.used_at = None;
        }
    }
}

#[async_trait]
impl InviteRepository for InMemoryInviteRepository {
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<StudentInvite>> {
        Ok(self.invites.lock().get(code).cloned())
    }

    async fn create(&self, invite: &StudentInvite) -> RepoResult<()> {
        let forced = self
            .forced_collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if forced.is_ok() {
            return Err(DomainError::InviteCodeExists);
        }

        let mut invites = self.invites.lock();
        if invites.contains_key(&invite.code) {
            return Err(DomainError::InviteCodeExists);
        }
        invites.insert(invite.code.clone(), invite.clone());
        Ok(())
    }

    async fn claim(&self, code: &str, user_id: UserId, at: DateTime<Utc>) -> RepoResult<bool> {
        let mut invites = self.invites.lock();
        Ok(invites
            .get_mut(code)
            .map(|invite| invite.mark_used(user_id, at))
            .unwrap_or(false))
    }

    async fn redeem(
        &self,
        code: &str,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> RepoResult<StudentInvite> {
        let invite = {
            let mut invites = self.invites.lock();
            let invite = invites
                .get_mut(code)
                .ok_or_else(|| DomainError::InviteNotFound(code.to_string()))?;
            if !invite.mark_used(user_id, at) {
                return Err(DomainError::InviteAlreadyUsed(code.to_string()));
            }
            invite.clone()
        };

        let bound = self
            .users
            .bind_if_unbound(user_id, &invite.student_id, &invite.student_name)
            .await;

        match bound {
            Ok(true) => Ok(invite),
            Ok(false) => {
                self.release(code);
                Err(DomainError::AlreadyBound(user_id))
            }
            Err(e) => {
                self.release(code);
                Err(e)
            }
        }
    }

    async fn list_page(&self, offset: i64, limit: i64) -> RepoResult<Vec<StudentInvite>> {
        let mut all: Vec<StudentInvite> = self.invites.lock().values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });
        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.invites.lock().len() as u64)
    }

    async fn delete(&self, code: &str) -> RepoResult<()> {
        self.invites.lock().remove(code);
        Ok(())
    }
}

// ============================================================================
// Users
// ============================================================================

pub struct InMemoryUserRepository {
    users: Mutex<Vec<(User, String)>>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_user<T>(&self, id: UserId, f: impl FnOnce(&mut User) -> T) -> RepoResult<T> {
        let mut users = self.users.lock();
        users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| {
                let out = f(u);
                u.updated_at = Utc::now();
                out
            })
            .ok_or(DomainError::UserNotFound(id))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_many(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .iter()
            .filter(|(u, _)| ids.contains(&u.id))
            .map(|(u, _)| u.clone())
            .collect())
    }

    async fn find_by_handle(&self, handle: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .iter()
            .find(|(u, _)| u.handle.eq_ignore_ascii_case(handle))
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .iter()
            .find(|(u, _)| u.email.eq_ignore_ascii_case(email))
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<User> {
        let mut users = self.users.lock();
        if users.iter().any(|(u, _)| u.handle.eq_ignore_ascii_case(&user.handle)) {
            return Err(DomainError::HandleAlreadyExists);
        }
        if users.iter().any(|(u, _)| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::EmailAlreadyExists);
        }

        let mut created = user.clone();
        created.id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn update_settings(
        &self,
        id: UserId,
        student_id: Option<&str>,
        student_name: Option<&str>,
        is_school_student: Option<bool>,
    ) -> RepoResult<User> {
        self.with_user(id, |u| {
            if let Some(v) = student_id {
                u.student_id = v.to_string();
            }
            if let Some(v) = student_name {
                u.student_name = v.to_string();
            }
            if let Some(v) = is_school_student {
                u.is_school_student = v;
            }
            u.clone()
        })
    }

    async fn set_student_identity(
        &self,
        id: UserId,
        student_id: &str,
        student_name: &str,
    ) -> RepoResult<()> {
        self.with_user(id, |u| u.bind(student_id.to_string(), student_name.to_string()))
    }

    async fn bind_if_unbound(
        &self,
        id: UserId,
        student_id: &str,
        student_name: &str,
    ) -> RepoResult<bool> {
        self.with_user(id, |u| {
            if u.is_bound() {
                return false;
            }
            u.bind(student_id.to_string(), student_name.to_string());
            true
        })
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self
            .users
            .lock()
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, hash)| hash.clone()))
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.users.lock().len() as u64)
    }
}

// ============================================================================
// Scoreboard
// ============================================================================

#[derive(Default)]
pub struct InMemoryScoreboardRepository {
    rows: Mutex<HashMap<i64, Vec<ScoreboardRow>>>,
}

impl InMemoryScoreboardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(&self, contest_id: i64, rows: Vec<ScoreboardRow>) {
        self.rows.lock().insert(contest_id, rows);
    }
}

#[async_trait]
impl ScoreboardRepository for InMemoryScoreboardRepository {
    async fn find_rows(&self, contest_id: i64) -> RepoResult<Vec<ScoreboardRow>> {
        let mut rows = self.rows.lock().get(&contest_id).cloned().unwrap_or_default();
        rows.sort_by_key(|r| r.rank);
        Ok(rows)
    }
}

// ============================================================================
// Fixture
// ============================================================================

/// A service context over fresh in-memory repositories
pub struct TestFixture {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUserRepository>,
    pub invites: Arc<InMemoryInviteRepository>,
    pub scoreboard: Arc<InMemoryScoreboardRepository>,
}

impl TestFixture {
    /// Create an account whose password is [`TEST_PASSWORD`]
    pub async fn add_user(&self, handle: &str, is_school_student: bool) -> User {
        let mut user = User::new(
            UserId::default(),
            handle.to_string(),
            format!("{handle}@example.com"),
        );
        user.is_school_student = is_school_student;
        self.insert_user(user).await
    }

    /// Create an account holding `MANAGE_DOMAIN`
    pub async fn add_admin(&self, handle: &str) -> User {
        let user = User::new(
            UserId::default(),
            handle.to_string(),
            format!("{handle}@example.com"),
        )
        .with_privileges(Privileges::DEFAULT | Privileges::MANAGE_DOMAIN);
        self.insert_user(user).await
    }

    async fn insert_user(&self, user: User) -> User {
        let hash = hash_password(TEST_PASSWORD).expect("hashing a fixed password");
        self.users
            .create(&user, &hash)
            .await
            .expect("fixture handles are unique")
    }
}

/// Fixture with the default page size
pub fn test_context() -> TestFixture {
    test_context_with_page_size(crate::services::context::DEFAULT_INVITE_PAGE_SIZE)
}

pub fn test_context_with_page_size(page_size: u32) -> TestFixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let invites = Arc::new(InMemoryInviteRepository::new(users.clone()));
    let scoreboard = Arc::new(InMemoryScoreboardRepository::new());

    let ctx = ServiceContextBuilder::new()
        .user_repo(users.clone())
        .invite_repo(invites.clone())
        .scoreboard_repo(scoreboard.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret-key-for-fixtures", 900)))
        .invite_page_size(page_size)
        .build()
        .expect("all dependencies provided");

    TestFixture {
        ctx,
        users,
        invites,
        scoreboard,
    }
}
