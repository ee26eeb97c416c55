// ============================================================================
// Store Errors
// ============================================================================

/// Failures surfaced by the order store. Every failure is terminal for the
/// request that triggered it; the store never retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("order not found: {0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    Connectivity(String),

    #[error("row decode failed: {0}")]
    Scan(String),
}

impl StoreError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::NotFound(_) => "not_found",
            Self::Connectivity(_) => "connectivity",
            Self::Scan(_) => "scan",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                if db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation()
                {
                    Self::ConstraintViolation(db.to_string())
                } else {
                    Self::Connectivity(db.to_string())
                }
            }
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => Self::Scan(err.to_string()),
            // Io, Tls, Protocol, pool exhaustion/shutdown and anything the
            // driver adds later: the taxonomy is closed and handlers treat
            // non-constraint failures uniformly as server-side.
            other => Self::Connectivity(other.to_string()),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
