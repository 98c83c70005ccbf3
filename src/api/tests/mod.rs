//! Unit tests for configuration parsing and error translation.
