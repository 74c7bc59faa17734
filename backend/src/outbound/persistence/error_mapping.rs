//! Shared MongoDB driver error mapping for the store adapters.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::debug;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// True when the driver error reports a unique index violation.
pub fn is_duplicate_key(error: &MongoError) -> bool {
    match &*error.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Map driver error variants into query/connection constructors.
///
/// Reachability failures map to connection errors; everything else, the
/// duplicate-key case excluded, is a query error. Callers interested in
/// duplicate keys must check [`is_duplicate_key`] first.
pub fn map_mongo_error<E, Q, C>(error: MongoError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    debug!(error = %error, "mongodb operation failed");
    match &*error.kind {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. } => connection(error.to_string()),
        _ => query(error.to_string()),
    }
}
