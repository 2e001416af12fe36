//! Unified application error type.
//! All modules (db, import, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database integrity check failed: {0}")]
    Integrity(String),

    // ---------------------------
    // Input shape errors (import aborts before any write)
    // ---------------------------
    #[error("Input appears empty: {0}")]
    EmptyInput(String),

    #[error("No 'Day N' columns recognized in header; cannot write any cells")]
    NoDayColumns,

    #[error("Label column index {index} is out of range (header has {width} columns)")]
    InvalidLabelColumn { index: usize, width: usize },

    // ---------------------------
    // Request errors
    // ---------------------------
    #[error("Unknown section: {0}")]
    InvalidSection(String),

    #[error("Invalid sheet name: {0:?}")]
    InvalidSheetName(String),

    #[error("Invalid day range: {0}")]
    InvalidDayRange(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
