//! Unit tests for the review catalog.
