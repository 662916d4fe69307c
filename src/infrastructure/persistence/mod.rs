//! Entry store implementations.
//!
//! # Repositories
//!
//! - [`PgEntryRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryEntryRepository`] - In-process storage for tests and `DATABASE_URL=memory://`

pub mod memory_entry_repository;
pub mod pg_entry_repository;

pub use memory_entry_repository::MemoryEntryRepository;
pub use pg_entry_repository::PgEntryRepository;
