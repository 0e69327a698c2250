//! Test-only crate; see `tests/contract_validation.rs`.
