//! Service integrations for external APIs and clients.
//!
//! Each service module defines a generic trait and a concrete implementation, so the
//! handlers can be exercised against mocks.

pub mod github;
