//! Springseq: tolerant text normalization for spring-test command programs.
//!
//! Turns messy specification text (OCR, PDF extraction, hand typing) into
//! structured fields, classifies and mines chat messages for parameters, and
//! reshapes free-form model responses into canonical seven-column sequence
//! tables. Everything is a pure text transformation; no I/O happens outside
//! [`config`] and [`logging`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;

pub mod patterns;

pub mod chat;
pub mod parser;
pub mod sequence;
pub mod specification;
