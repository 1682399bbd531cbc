/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// League management and schedule persistence.
pub mod league_service;
/// Schedule generation and mapping to stored games.
pub mod schedule_service;
/// Storage connection supervisor toggling degraded mode.
pub mod storage_supervisor;
