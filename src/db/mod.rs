//! Database layer (Supabase PostgREST).

pub mod tasks;

pub use tasks::TasksTable;

/// Table names as constants.
pub mod tables {
    pub const TASKS: &str = "tasks";
}
