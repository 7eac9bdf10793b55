//! DLE Extractor - Convert DLE dictionary articles to structured records.
//!
//! This crate provides functionality to fetch entries from the DLE
//! (Diccionario de la lengua española) data API and convert the
//! semi-structured article markup into normalized JSON records with
//! headword, etymology, sense definitions and verb conjugations.
//!
//! # Example
//!
//! ```
//! use dle_extractor::entities;
//!
//! // Escaped accented characters are decoded, superscript markers removed
//! assert_eq!(entities::normalize("cami&#xF3;n<sup>2</sup>"), "camión");
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (`WordRecord`, `Definition`, `ConjugationMode`)
//! - [`error`]: Error types and Result alias
//! - [`entities`]: Escaped-entity decoding and markup cleanup
//! - [`definitions`]: Sense paragraph extraction
//! - [`conjugation`]: Verb conjugation table parsing
//! - [`article`]: Article record assembly and serialization
//! - [`client`]: HTTP client for the upstream DLE data API

pub mod article;
pub mod client;
pub mod config;
pub mod conjugation;
pub mod definitions;
pub mod entities;
pub mod error;
pub mod types;

// Re-export main functions
pub use article::{extract_document, parse_article};
pub use client::DleClient;

// Re-export commonly used items
pub use error::{ExtractorError, Result};
pub use types::{ConjugationMode, Definition, WordRecord};
