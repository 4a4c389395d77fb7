//! Lead Intake API Library
//!
//! Validates website contact-form submissions, emails a lead notification
//! and optionally records the lead in PostgreSQL.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP router and request handlers.
//! - `mailer`: Mail dispatch (SMTP).
//! - `models`: Submission, lead and record types.
//! - `notification`: Lead notification formatting.
//! - `store`: Lead persistence.
//! - `validation`: Lead intake validation rules.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod notification;
pub mod store;
pub mod validation;
