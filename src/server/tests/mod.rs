//! Unit tests for the HTTP shell helpers.
