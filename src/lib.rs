//! # Courier
//!
//! A message construction and publishing toolkit for durable AMQP queues.
//!
//! Courier provides three independent activities, each a pure
//! validate-then-publish function: normalize the flat inputs, validate every
//! field against its rule, assemble a single JSON envelope, and hand it to a
//! publisher that declares a durable queue and marks the delivery persistent.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌────────────┐
//! │  Activities  │──▶│  Validate + │──▶│ Publisher  │
//! │ complete /   │   │  Assemble   │   │ AMQP queue │
//! │ source / doc │   │  (serde)    │   │ (durable)  │
//! └──────────────┘   └─────────────┘   └────────────┘
//! ```
//!
//! No state is retained between invocations: each call opens one broker
//! connection, publishes exactly one message, and closes the connection.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Message envelopes and receipts |
//! | [`validate`] | Field-level validation rules |
//! | [`publish`] | Publisher trait, AMQP and in-memory backends |
//! | [`complete`] | Complete chat message activity |
//! | [`source_status`] | Data-source status activity |
//! | [`document_status`] | Document-processing status activity |

pub mod complete;
pub mod config;
pub mod document_status;
pub mod error;
pub mod models;
pub mod publish;
pub mod source_status;
pub mod validate;
