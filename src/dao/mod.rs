/// League persistence backends.
pub mod league_store;
/// Persisted league records.
pub mod models;
/// Backend-agnostic storage errors.
pub mod storage;
