//! End-to-end tests against the full router and a real PostgreSQL
//! instance. Configure the database through `HEMOLINK__DATABASE__URL`
//! or `config/test.toml` before running.

mod helpers;

mod lifecycle_test;
mod notification_test;
mod ws_test;
