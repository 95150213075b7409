//! Credential Verifier
//!
//! The form talks to a [`Verifier`]; [`SqliteVerifier`] answers from the
//! configured SQLite database with one connection per check.

use std::path::PathBuf;
use std::time::Duration;

use rusqlite::ErrorCode;

use crate::config::DatabaseSettings;
use crate::db::{self, DbError, DbResult, Phase};

use super::{Credentials, VerificationOutcome};

pub trait Verifier: Send + Sync {
    /// Look the credentials up. `timeout` bounds connection establishment.
    fn check(&self, credentials: &Credentials, timeout: Duration) -> VerificationOutcome;
}

#[derive(Debug, Clone)]
pub struct SqliteVerifier {
    path: PathBuf,
    query_timeout: Duration,
}

impl SqliteVerifier {
    pub fn new(settings: &DatabaseSettings) -> Self {
        Self {
            path: settings.path.clone(),
            query_timeout: settings.query_timeout(),
        }
    }

    fn lookup(&self, credentials: &Credentials, timeout: Duration) -> DbResult<Option<i64>> {
        let conn = db::open_read_only(&self.path, timeout, timeout + self.query_timeout)?;
        db::find_user_id(&conn, credentials.identifier(), credentials.secret())
    }
}

impl Verifier for SqliteVerifier {
    fn check(&self, credentials: &Credentials, timeout: Duration) -> VerificationOutcome {
        tracing::debug!(database = %self.path.display(), ?timeout, "looking up credentials");
        match self.lookup(credentials, timeout) {
            Ok(Some(user_id)) => VerificationOutcome::Matched(user_id),
            Ok(None) => VerificationOutcome::NotMatched,
            Err(err) => classify(&err, timeout + self.query_timeout),
        }
    }
}

fn is_connectivity_code(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::CannotOpen
            | ErrorCode::NotADatabase
            | ErrorCode::PermissionDenied
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::OperationInterrupted
    )
}

/// Map a database failure onto the three user-facing buckets.
fn classify(err: &DbError, deadline: Duration) -> VerificationOutcome {
    if err.code() == Some(ErrorCode::OperationInterrupted) {
        return VerificationOutcome::ConnectionFailed(format!(
            "timed out after {}s",
            deadline.as_secs()
        ));
    }

    let detail = err.to_string();
    let connectivity = err.code().is_some_and(is_connectivity_code);
    match err.phase {
        Phase::Open => VerificationOutcome::ConnectionFailed(detail),
        _ if connectivity => VerificationOutcome::ConnectionFailed(detail),
        Phase::Prepare => VerificationOutcome::SchemaError(detail),
        Phase::Query => VerificationOutcome::UnexpectedError(detail),
    }
}
