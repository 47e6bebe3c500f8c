//! Cross-crate scenarios for the idm workspace live under `tests/`.
