//! In-process fake of the record API.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use userbase_client::{ApiError, UserApi};
use userbase_flux::Flux;
use userbase_types::{User, UserFields};

/// Which operation a failure is injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
pub struct FakeApi {
    users: Mutex<Vec<User>>,
    next_id: AtomicUsize,
    failures: Mutex<Vec<(Op, u16, String)>>,
    calls: Mutex<Vec<Op>>,
    /// When set, `create` waits for a notification before answering.
    create_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, name: &str, email: &str, age: u32) -> User {
        let user = User::new(
            self.fresh_id(),
            UserFields {
                name: name.into(),
                email: email.into(),
                age,
            },
        );
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Make every later call to `op` fail with this status and message.
    pub fn fail(&self, op: Op, status: u16, message: &str) {
        self.failures.lock().unwrap().push((op, status, message.to_string()));
    }

    pub fn heal(&self) {
        self.failures.lock().unwrap().clear();
    }

    pub fn gate_create(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.create_gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn fresh_id(&self) -> String {
        format!("{:032x}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn enter(&self, op: Op) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(op);
        let failures = self.failures.lock().unwrap();
        match failures.iter().find(|(o, _, _)| *o == op) {
            Some((_, status, message)) => Err(ApiError::Server {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> ApiError {
        ApiError::Server {
            status: 404,
            message: "User not found".into(),
        }
    }
}

#[async_trait::async_trait]
impl UserApi for FakeApi {
    async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.enter(Op::List)?;
        Ok(self.users())
    }

    async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.enter(Op::Get)?;
        self.users()
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(Self::not_found)
    }

    async fn create(&self, fields: &UserFields) -> Result<User, ApiError> {
        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.enter(Op::Create)?;
        let user = User::new(self.fresh_id(), fields.clone());
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, fields: &UserFields) -> Result<User, ApiError> {
        self.enter(Op::Update)?;
        let mut users = self.users.lock().unwrap();
        let slot = users.iter_mut().find(|u| u.id == id).ok_or_else(Self::not_found)?;
        *slot = User::new(id, fields.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<User, ApiError> {
        self.enter(Op::Delete)?;
        let mut users = self.users.lock().unwrap();
        let pos = users.iter().position(|u| u.id == id).ok_or_else(Self::not_found)?;
        Ok(users.remove(pos))
    }
}

pub fn flux_with(api: &Arc<FakeApi>) -> Flux {
    users_bff::build(api.clone())
}
