//! Contract validation harness; all checks live in `tests/`.
