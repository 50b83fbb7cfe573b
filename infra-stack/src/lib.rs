//! Infra Stack
//!
//! The fastify application stack: configuration, network, load-balanced
//! service with autoscaling, image build project and the delivery pipeline,
//! assembled into a single declaration and rendered as a JSON manifest.

pub mod build;
pub mod buildspec;
pub mod config;
pub mod error;
pub mod manifest;
pub mod network;
pub mod props;
pub mod service;
pub mod stack;

pub use config::StackConfig;
pub use error::{ConfigError, Result, StackError};
pub use manifest::Manifest;
pub use props::StackProps;
pub use stack::FastifyAppStack;
