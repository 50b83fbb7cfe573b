//! Declaration domain types
//!
//! This module contains the building blocks of a stack declaration:
//! artifacts and actions, the stages and pipeline that order them, and the
//! service descriptor that a deploy action targets. All of them are plain
//! data, created once during assembly and serialised into the manifest.

pub mod action;
pub mod artifact;
pub mod pipeline;
pub mod scaling;
pub mod secret;
pub mod service;
pub mod stage;
