//! End-to-end tests for httperr live in `tests/`
