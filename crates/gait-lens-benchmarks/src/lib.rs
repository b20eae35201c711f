//! Benchmark harness; the smoke checks live in `tests/`.
