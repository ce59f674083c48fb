// Library root
// -----------
// This crate exposes the fitness tracker as a library so the interactive
// binary (`main.rs`) stays a thin shell and the record store can be tested
// without a terminal.
//
// Module responsibilities:
// - `config`: where the data files live and how fast the typing effect runs.
// - `model`: the `User` record, BMI math and input validators.
// - `plan`: maps a BMI category to a workout plan, honoring custom overrides.
// - `codec`: the line-oriented record block format of the user file.
// - `store`: find / upsert over the flat user file with atomic rewrites.
// - `export`: the fixed-width human readable table.
// - `exercise_log`: append-only log of exercises for subscribed users.
// - `session`: the operations a logged-in user can perform.
// - `ui`: terminal menus built on `dialoguer`.
pub mod codec;
pub mod config;
pub mod error;
pub mod exercise_log;
pub mod export;
pub mod model;
pub mod plan;
pub mod session;
pub mod store;
pub mod ui;
