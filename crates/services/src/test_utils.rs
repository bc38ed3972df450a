// Test utilities for services crate
#![cfg(test)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::{AuthError, AuthGateway, AuthUser, SessionProvider, UserId};
use crate::conversations::{Conversation, ConversationId, ConversationStore, NewConversation};
use crate::maintenance::{
    CacheStore, KeyValueStore, PageHandle, WorkerRegistration, WorkerRegistry,
};
use crate::notifications::{NotificationGateway, PermissionState};

/// Auth gateway that either succeeds with a fixed identity or fails with a
/// fixed provider error, recording every call.
pub struct StubAuthGateway {
    outcome: StubOutcome,
    calls: Mutex<Vec<(String, String)>>,
}

enum StubOutcome {
    Ok { id: String, email: String },
    Err { code: String, message: String },
}

impl StubAuthGateway {
    pub fn succeeding(id: &str, email: &str) -> Self {
        Self {
            outcome: StubOutcome::Ok {
                id: id.to_string(),
                email: email.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(code: &str, message: &str) -> Self {
        Self {
            outcome: StubOutcome::Err {
                code: code.to_string(),
                message: message.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn resolve(&self, op: &str, email: &str) -> Result<AuthUser, AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push((op.to_string(), email.to_string()));
        match &self.outcome {
            StubOutcome::Ok { id, email } => Ok(AuthUser {
                id: UserId(id.clone()),
                email: email.clone(),
                id_token: "stub-id-token".to_string(),
                refresh_token: "stub-refresh-token".to_string(),
            }),
            StubOutcome::Err { code, message } => Err(AuthError::Remote {
                code: code.clone(),
                message: message.clone(),
            }),
        }
    }
}

#[async_trait]
impl AuthGateway for StubAuthGateway {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthUser, AuthError> {
        self.resolve("sign_in", email)
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthUser, AuthError> {
        self.resolve("sign_up", email)
    }
}

/// Session provider with a fixed answer.
pub struct StaticSession {
    user: Option<UserId>,
}

impl StaticSession {
    pub fn new(user: Option<UserId>) -> Self {
        Self { user }
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }
}

/// Conversation store backed by a Vec, assigning sequential ids.
pub struct InMemoryConversationStore {
    created: Mutex<Vec<Conversation>>,
    next_id: AtomicU64,
    fail_with: Option<String>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn created(&self) -> Vec<Conversation> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create(&self, draft: NewConversation) -> anyhow::Result<Conversation> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let conversation = Conversation {
            id: ConversationId(format!("conv-{n}")),
            members: draft.members,
            last_message: draft.last_message,
            last_sender: draft.last_sender,
            updated_at: Utc::now(),
        };
        self.created.lock().unwrap().push(conversation.clone());
        Ok(conversation)
    }

    async fn get(&self, id: &ConversationId) -> anyhow::Result<Option<Conversation>> {
        Ok(self
            .created
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn list_for_member(&self, member: &UserId) -> anyhow::Result<Vec<Conversation>> {
        Ok(self
            .created
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.members.contains(member))
            .cloned()
            .collect())
    }
}

/// Cache store that records deletion attempts and can fail selectively.
pub struct FakeCacheStore {
    names: Vec<String>,
    attempted: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    fail_for: Mutex<HashSet<String>>,
}

impl FakeCacheStore {
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            attempted: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            fail_for: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_delete_of(&self, name: &str) {
        self.fail_for.lock().unwrap().insert(name.to_string());
    }

    pub fn attempted(&self) -> Vec<String> {
        self.attempted.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheStore for FakeCacheStore {
    async fn names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.names.clone())
    }

    async fn delete(&self, name: &str) -> anyhow::Result<bool> {
        self.attempted.lock().unwrap().push(name.to_string());
        if self.fail_for.lock().unwrap().contains(name) {
            anyhow::bail!("cache {name} is stuck");
        }
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(true)
    }
}

/// Single service-worker registration fake.
pub struct FakeRegistration {
    scope: String,
    fail: bool,
    unregistered: AtomicBool,
}

impl FakeRegistration {
    pub fn new(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            fail: false,
            unregistered: AtomicBool::new(false),
        }
    }

    pub fn failing(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            fail: true,
            unregistered: AtomicBool::new(false),
        }
    }

    pub fn was_unregistered(&self) -> bool {
        self.unregistered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkerRegistration for FakeRegistration {
    fn scope(&self) -> String {
        self.scope.clone()
    }

    async fn unregister(&self) -> anyhow::Result<bool> {
        if self.fail {
            anyhow::bail!("unregistration of {} refused", self.scope);
        }
        self.unregistered.store(true, Ordering::SeqCst);
        Ok(true)
    }
}

pub struct FakeRegistry {
    registrations: Vec<Arc<dyn WorkerRegistration>>,
    fail: bool,
}

impl FakeRegistry {
    pub fn with_registrations(registrations: Vec<Arc<dyn WorkerRegistration>>) -> Self {
        Self {
            registrations,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            registrations: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl WorkerRegistry for FakeRegistry {
    async fn registrations(&self) -> anyhow::Result<Vec<Arc<dyn WorkerRegistration>>> {
        if self.fail {
            anyhow::bail!("service workers unavailable");
        }
        Ok(self.registrations.clone())
    }
}

pub struct FakeStorage {
    fail: bool,
    cleared: AtomicBool,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self {
            fail: false,
            cleared: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            cleared: AtomicBool::new(false),
        }
    }

    pub fn was_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for FakeStorage {
    async fn clear(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("storage locked");
        }
        self.cleared.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakePage {
    reloads: AtomicUsize,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            reloads: AtomicUsize::new(0),
        }
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageHandle for FakePage {
    async fn force_reload(&self) -> anyhow::Result<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakeNotificationGateway {
    supported: bool,
    state: Mutex<PermissionState>,
    fail: bool,
    requests: AtomicUsize,
}

impl FakeNotificationGateway {
    pub fn with_state(state: PermissionState) -> Self {
        Self {
            supported: true,
            state: Mutex::new(state),
            fail: false,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            state: Mutex::new(PermissionState::Default),
            fail: false,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            supported: true,
            state: Mutex::new(PermissionState::Default),
            fail: true,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationGateway for FakeNotificationGateway {
    fn supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> PermissionState {
        *self.state.lock().unwrap()
    }

    async fn request_permission(&self) -> anyhow::Result<PermissionState> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("prompt dismissed by the host");
        }
        *self.state.lock().unwrap() = PermissionState::Granted;
        Ok(PermissionState::Granted)
    }
}
