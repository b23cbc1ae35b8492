//! Integration tests for Sitescribe
//!
//! These tests use wiremock to serve small sites and run the full
//! validate, traverse and render cycle end-to-end.

mod common;
mod crawl_tests;
mod render_tests;
