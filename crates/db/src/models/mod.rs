//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts where the table takes caller input

pub mod bank_state;
pub mod event;
pub mod journey;
pub mod question;
pub mod response;
pub mod session;
