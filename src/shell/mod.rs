// Composition root for the attendance service.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the spreadsheet reader, participation store and notification sinks.
// - Wire them into the ingest and auto-process handlers.
// - Expose the HTTP router.

pub mod config;
pub mod http;
pub mod state;
