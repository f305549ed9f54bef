use super::Query;
use crate::builder::{buildable, Builder, Variant};
use crate::script::Script;

static SCRIPT_QUERY: Variant = Variant::keyed("ScriptQuery", "script").requiring(&["script"]);

/// Filter documents with a script returning a boolean.
#[derive(Debug, Clone)]
pub struct ScriptQuery(Builder);

buildable!(ScriptQuery);

impl Query for ScriptQuery {}

impl ScriptQuery {
    pub fn new(script: Script) -> Self {
        Self::empty().script(script)
    }

    pub fn empty() -> Self {
        Self(Builder::new(&SCRIPT_QUERY))
    }

    pub fn script(mut self, script: Script) -> Self {
        self.0.put("script", script);
        self
    }
}
