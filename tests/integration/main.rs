//! Integration tests

mod common;
mod index_properties;
mod index_scenarios;
mod service_tests;
