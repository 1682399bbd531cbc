//! Library crate for league-fixtures-back, exposing modules for binaries and tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod scheduler;
pub mod services;
pub mod state;
