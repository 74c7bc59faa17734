//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{TasksCommand, TasksQuery, UsersCommand, UsersQuery};

/// Trait objects for the driving ports, shared across workers.
///
/// Handlers depend on the ports, never on concrete services, so tests swap in
/// mocks without touching any storage.
#[derive(Clone)]
pub struct HttpState {
    /// User mutations.
    pub users_command: Arc<dyn UsersCommand>,
    /// User reads.
    pub users_query: Arc<dyn UsersQuery>,
    /// Task mutations.
    pub tasks_command: Arc<dyn TasksCommand>,
    /// Task reads.
    pub tasks_query: Arc<dyn TasksQuery>,
}
