//! Integration test modules

mod process_session_tests;
mod support;
