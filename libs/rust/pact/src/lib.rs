//! Pact contract testing support.
//!
//! Provides the pieces of consumer-driven contract testing used by the
//! date-validation consumer and provider:
//! - Pact V3 contract model with file load/save
//! - A consumer-side interaction builder
//! - A provider verifier that replays a contract over HTTP
//! - A mock provider for consumer tests (`mock-server` feature)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod contract;
#[cfg(feature = "mock-server")]
pub mod mock_server;
pub mod verification;

pub use builder::{InteractionBuilder, PactBuilder, ResponseBuilder};
pub use contract::{
    Contract, ContractMetadata, Interaction, PACT_SPECIFICATION_VERSION, PactSpecification,
    Participant, ProviderState, Request, Response,
};
#[cfg(feature = "mock-server")]
pub use mock_server::MockProvider;
pub use verification::{
    InteractionResult, Mismatch, ProviderVerifier, StatePhase, VerificationResult,
};
