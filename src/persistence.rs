//! Shared `PostgreSQL` plumbing for the repository adapters.
//!
//! Each bounded context owns its Diesel schema and repository; this module
//! only provides the pool type, pool construction, and schema bootstrap.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by all repositories.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// DDL creating every table used by the service. Idempotent.
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-18-000000_create_kanban_tables/up.sql");

/// Errors raised while preparing the database.
#[derive(Debug, Error)]
pub enum PersistenceSetupError {
    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// Applying the schema failed.
    #[error("schema setup failed: {0}")]
    Schema(#[from] diesel::result::Error),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PersistenceSetupError::Pool`] when the initial connections
/// cannot be established.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PersistenceSetupError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Applies [`SCHEMA_SQL`] using a pooled connection.
///
/// This is a blocking operation that should be called from `spawn_blocking`
/// or a synchronous context.
///
/// # Errors
///
/// Returns [`PersistenceSetupError`] when no connection is available or the
/// DDL fails.
pub fn apply_schema(pool: &PgPool) -> Result<(), PersistenceSetupError> {
    let mut connection = pool.get()?;
    connection.batch_execute(SCHEMA_SQL)?;
    Ok(())
}

/// Attempts a membership-changing delete makes before giving up on a record
/// that keeps moving between parents.
pub(crate) const DELETE_ATTEMPTS: usize = 3;

/// Tables whose rows parent an ordered sibling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParentTable {
    /// Users own sidebar boards.
    Users,
    /// Boards hold sections.
    Boards,
    /// Sections hold tasks.
    Sections,
}

impl ParentTable {
    const fn lock_sql(self) -> &'static str {
        match self {
            Self::Users => "SELECT id FROM users WHERE id = ANY($1) ORDER BY id FOR NO KEY UPDATE",
            Self::Boards => "SELECT id FROM boards WHERE id = ANY($1) ORDER BY id FOR NO KEY UPDATE",
            Self::Sections => "SELECT id FROM sections WHERE id = ANY($1) ORDER BY id FOR NO KEY UPDATE",
        }
    }
}

/// Locks the parent rows of one or more sibling groups until the enclosing
/// transaction ends.
///
/// Appends, deletes, and reorders take this lock before reading a group's
/// membership, so they serialize per parent.
pub(crate) fn lock_parents(
    connection: &mut PgConnection,
    table: ParentTable,
    ids: &[uuid::Uuid],
) -> diesel::QueryResult<usize> {
    use diesel::RunQueryDsl;
    use diesel::sql_types::{Array, Uuid};

    diesel::sql_query(table.lock_sql())
        .bind::<Array<Uuid>, _>(ids)
        .execute(connection)
}

/// Converts a persisted `INTEGER` position into the domain type.
pub(crate) fn position_from_column(
    value: i32,
) -> Result<crate::ordering::Position, std::num::TryFromIntError> {
    u32::try_from(value).map(crate::ordering::Position::new)
}

/// Converts a domain position into the persisted `INTEGER` representation.
pub(crate) fn position_to_column(
    position: crate::ordering::Position,
) -> Result<i32, std::num::TryFromIntError> {
    i32::try_from(position.value())
}
