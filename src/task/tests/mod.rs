//! Unit tests for the task ledger.

mod support;
