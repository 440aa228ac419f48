//! Payload synthesis for hash-collision denial-of-service tests.
//!
//! Given a djb-style hash used by a victim's map implementation, the crate
//! builds two comparable requests from one message template: a tampered one
//! whose keys all land in the same bucket, and an untampered one with the
//! same number of equally long keys that never share a bucket. Comparing the
//! server's response times for the two isolates the cost of collisions from
//! the cost of payload size.
//!
//! ```no_run
//! use hashdos::{AttackConfig, MessageTemplate, OriginalRequest, PlacementMode, RequestSynthesizer};
//!
//! let synth = RequestSynthesizer::new(AttackConfig::new(10_000, PlacementMode::Attributes))?;
//! let template = MessageTemplate::new("<soap:Header><h $$PAYLOADATTR$$/></soap:Header>");
//! let original = OriginalRequest::new("http://localhost/ws").header("Content-Type", "text/xml");
//! let pair = synth.build_pair(&template, &original)?;
//! assert_eq!(pair.tampered.body().len(), pair.untampered.body().len());
//! # Ok::<(), hashdos::HashDosError>(())
//! ```

pub mod charset;
pub mod collision;
pub mod config;
pub mod control;
pub mod error;
pub mod hash;
pub mod payload;
pub mod request;
pub mod template;

pub use collision::{CollisionGenerator, SeedChain};
pub use config::AttackConfig;
pub use control::ControlSetGenerator;
pub use error::{HashDosError, Result};
pub use hash::{DjbVariant, HashValue};
pub use payload::{PayloadFragment, PlacementMode};
pub use request::{AttackPair, HeaderMap, OriginalRequest, RequestKind, RequestObject, RequestSynthesizer};
pub use template::{MessageTemplate, DEFAULT_PLACEHOLDER};

/// Hard ceiling on keys per message.
pub const MAX_COUNT: usize = 99_999_999;
/// Keys per message when none is configured.
pub const DEFAULT_COUNT: usize = 10_000;
