//! Test-only crate; see `tests/nfr_smoke.rs`.
