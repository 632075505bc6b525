//! Unit tests for individual components

mod api_test;
mod audit_test;
mod builders_test;
mod error_test;
