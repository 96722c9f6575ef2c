//! Unit tests for the datasource layer.
