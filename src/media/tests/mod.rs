//! Unit tests for media storage and signed links.
