//! Natural-language questions over the campaign metrics database.
//!
//! [`analyst::Analyst`] is the entry point: it guards non-data messages,
//! asks the model for SQL, runs it against SQLite and has the model phrase
//! the result, falling back to a canned answer when any step fails.

pub mod analyst;
pub mod chart;
pub mod config;
pub mod db;
pub mod error;
pub mod fallback;
pub mod keywords;
pub mod llm;
pub mod prompts;
pub mod rows_to_tsv;
pub mod sql_extract;

#[cfg(test)]
pub(crate) mod testing;
