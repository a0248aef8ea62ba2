// src/integrations/identity/mod.rs

pub mod client;
pub mod local;
pub mod password;

pub use client::IdentityProvider;
pub use local::LocalIdentityProvider;

#[cfg(test)]
pub use client::MockIdentityProvider;
