use super::Builder;
use crate::error::Result;
use serde_json::{Map, Value};

/// How a serialized body is wrapped at top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{ <kind>: body }`
    Keyed,
    /// The body is the document.
    Bare,
}

/// A set of option keys that together form one way of expressing a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepresentationGroup {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

impl RepresentationGroup {
    pub const fn new(name: &'static str, keys: &'static [&'static str]) -> Self {
        Self { name, keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }
}

/// Post-walk hook: receives the serialized inner body and returns the value
/// that will be wrapped by the envelope.
pub type ShapeFn = fn(&Builder, Map<String, Value>) -> Result<Value>;

/// Static capability descriptor shared by every instance of one concrete
/// builder type.
#[derive(Clone, Copy)]
pub struct Variant {
    pub name: &'static str,
    pub kind: &'static str,
    pub envelope: Envelope,
    pub disabled: &'static [&'static str],
    pub representations: &'static [RepresentationGroup],
    pub require_representation: bool,
    pub required: &'static [&'static str],
    pub outer: &'static [&'static str],
    pub shape: Option<ShapeFn>,
}

impl Variant {
    pub const fn keyed(name: &'static str, kind: &'static str) -> Self {
        Self {
            name,
            kind,
            envelope: Envelope::Keyed,
            disabled: &[],
            representations: &[],
            require_representation: false,
            required: &[],
            outer: &[],
            shape: None,
        }
    }

    pub const fn bare(name: &'static str, kind: &'static str) -> Self {
        Self {
            envelope: Envelope::Bare,
            ..Self::keyed(name, kind)
        }
    }

    pub const fn disabling(self, disabled: &'static [&'static str]) -> Self {
        Self { disabled, ..self }
    }

    pub const fn with_representations(self, groups: &'static [RepresentationGroup]) -> Self {
        Self {
            representations: groups,
            ..self
        }
    }

    pub const fn requiring_representation(self) -> Self {
        Self {
            require_representation: true,
            ..self
        }
    }

    pub const fn requiring(self, required: &'static [&'static str]) -> Self {
        Self { required, ..self }
    }

    pub const fn with_outer(self, outer: &'static [&'static str]) -> Self {
        Self { outer, ..self }
    }

    pub const fn shaped(self, shape: ShapeFn) -> Self {
        Self {
            shape: Some(shape),
            ..self
        }
    }

    pub fn group_of(&self, key: &str) -> Option<&'static RepresentationGroup> {
        self.representations.iter().find(|g| g.contains(key))
    }

    pub fn group_named(&self, name: &str) -> Option<&'static RepresentationGroup> {
        self.representations.iter().find(|g| g.name == name)
    }

    pub fn is_outer(&self, key: &str) -> bool {
        self.outer.contains(&key)
    }
}

impl std::fmt::Debug for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("envelope", &self.envelope)
            .field("disabled", &self.disabled)
            .field("representations", &self.representations)
            .field("required", &self.required)
            .field("outer", &self.outer)
            .finish()
    }
}
