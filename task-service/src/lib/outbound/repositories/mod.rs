pub mod task;
pub mod user;

pub use task::PostgresTaskRepository;
pub use user::PostgresUserRepository;

/// Integrity-violation category of a failed statement (SQLSTATE class 23).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegrityViolation {
    Unique,
    ForeignKey,
    Other,
}

/// Classify `err` by its SQLSTATE. `None` when it is not an integrity violation.
pub(crate) fn integrity_violation(err: &sqlx::Error) -> Option<IntegrityViolation> {
    let db_err = err.as_database_error()?;
    let code = db_err.code()?;
    classify_sqlstate(&code)
}

fn classify_sqlstate(code: &str) -> Option<IntegrityViolation> {
    match code {
        "23505" => Some(IntegrityViolation::Unique),
        "23503" => Some(IntegrityViolation::ForeignKey),
        c if c.starts_with("23") => Some(IntegrityViolation::Other),
        _ => None,
    }
}
