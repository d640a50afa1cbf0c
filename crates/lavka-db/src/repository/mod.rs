//! # Repositories
//!
//! Read surface over the entity tables and the append-only logs.
//!
//! Repositories never mutate: every write in the system goes through the
//! transaction engine so that stock checks, log appends and statistics
//! updates happen inside one transaction.

pub mod customer;
pub mod product;
pub mod sale;
pub mod supply;
