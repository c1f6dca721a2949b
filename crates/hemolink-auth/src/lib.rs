//! # hemolink-auth
//!
//! Authentication boundary for Hemolink. Credential storage and token
//! issuance belong to the external account system; this crate verifies
//! the tokens it mints and extracts the `(identity, role)` pair the
//! engine consumes. The encoder exists for the handshake tests and
//! local development tooling.

pub mod jwt;
