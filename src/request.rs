//! Assembly of the tampered and untampered request objects.

use std::collections::BTreeMap;

use tracing::debug;

use crate::collision::CollisionGenerator;
use crate::config::AttackConfig;
use crate::control::ControlSetGenerator;
use crate::error::{HashDosError, Result};
use crate::payload::PayloadFragment;
use crate::template::MessageTemplate;

/// Transport headers, keys compared case-sensitively.
pub type HeaderMap = BTreeMap<String, String>;

/// The request the attack is derived from. Only read, never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalRequest {
    pub headers: HeaderMap,
    pub endpoint: String,
}

impl OriginalRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            headers: HeaderMap::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parse a `Name: value` header line.
    pub fn parse_header(line: &str) -> Result<(String, String)> {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| HashDosError::config(format!("header '{line}' is missing ':'")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(HashDosError::config(format!("header '{line}' has no name")));
        }
        Ok((name.to_string(), value.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Colliding keys.
    Tampered,
    /// Control keys of the same shape.
    Untampered,
}

/// A finished request. Owns its headers outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestObject {
    kind: RequestKind,
    headers: HeaderMap,
    endpoint: String,
    body: String,
}

impl RequestObject {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Hex MD5 of the body.
    pub fn fingerprint(&self) -> String {
        hex::encode(md5::compute(self.body.as_bytes()).0)
    }

    pub fn into_parts(self) -> (HeaderMap, String, String) {
        (self.headers, self.endpoint, self.body)
    }
}

/// The two requests of one attack execution.
#[derive(Debug, Clone)]
pub struct AttackPair {
    pub tampered: RequestObject,
    pub untampered: RequestObject,
}

/// Builds request objects from a validated [`AttackConfig`].
#[derive(Debug, Clone)]
pub struct RequestSynthesizer {
    config: AttackConfig,
    collisions: CollisionGenerator,
    controls: ControlSetGenerator,
}

impl RequestSynthesizer {
    pub fn new(config: AttackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            collisions: CollisionGenerator::new(config.variant, config.max_count),
            controls: ControlSetGenerator::new(config.variant, config.max_count),
        })
    }

    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    pub fn collision_generator(&self) -> &CollisionGenerator {
        &self.collisions
    }

    /// Request carrying `count` colliding keys.
    pub fn build_tampered(
        &self,
        template: &MessageTemplate,
        original: &OriginalRequest,
    ) -> Result<RequestObject> {
        self.build(RequestKind::Tampered, template, original)
    }

    /// Baseline request with `count` non-colliding keys of the same length.
    pub fn build_untampered(
        &self,
        template: &MessageTemplate,
        original: &OriginalRequest,
    ) -> Result<RequestObject> {
        self.build(RequestKind::Untampered, template, original)
    }

    pub fn build_pair(
        &self,
        template: &MessageTemplate,
        original: &OriginalRequest,
    ) -> Result<AttackPair> {
        Ok(AttackPair {
            tampered: self.build_tampered(template, original)?,
            untampered: self.build_untampered(template, original)?,
        })
    }

    fn build(
        &self,
        kind: RequestKind,
        template: &MessageTemplate,
        original: &OriginalRequest,
    ) -> Result<RequestObject> {
        // Fail on a bad template before generating anything.
        template.validate()?;

        let count = self.config.count;
        let keys = match kind {
            RequestKind::Tampered => self.collisions.generate(count)?,
            RequestKind::Untampered => self.controls.generate(count)?,
        };
        let fragment = PayloadFragment::new(self.config.placement, keys).serialize();
        let body = template.fill(&fragment);

        debug!(
            ?kind,
            count,
            placement = %self.config.placement,
            variant = %self.config.variant,
            body_len = body.len(),
            "built request"
        );

        Ok(RequestObject {
            kind,
            headers: original.headers.clone(),
            endpoint: original.endpoint.clone(),
            body,
        })
    }
}
