//! JSON wire format for operations.
//!
//! ```text
//! {
//!   "steps": [{"retain": 5}, {"insert": " there"}, {"retain": 6}],
//!   "baseLength": 11,
//!   "targetLength": 17
//! }
//! ```
//!
//! Decoding is strict: unknown fields, unknown step kinds and negative counts
//! are rejected by serde, and the decoded steps must account for exactly
//! `baseLength` input and `targetLength` output characters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::error::{OtError, Result};
use crate::operation::{Operation, Step};

/// Serialized shape of an [`Operation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WireOperation {
    steps: Vec<Step>,
    base_length: usize,
    target_length: usize,
}

impl WireOperation {
    fn from_operation(op: &Operation) -> Self {
        Self {
            steps: op.steps().into_owned(),
            base_length: op.base_len(),
            target_length: op.target_len(),
        }
    }

    /// Replay the steps through the builder and check the declared lengths.
    fn into_operation(self) -> Result<Operation> {
        let declared_steps = self.steps.len();
        let mut op = Operation::new(self.base_length);

        for step in self.steps {
            op.try_push(step).inspect_err(|e| {
                log::warn!("Rejected operation payload: {e}");
            })?;
        }

        let covered = op.consumed();
        if covered != self.base_length {
            let reason = format!(
                "steps cover {covered} characters but baseLength is {}",
                self.base_length
            );
            log::warn!("Rejected operation payload: {reason}");
            return Err(OtError::InvalidPayload(reason));
        }
        if op.target_len() != self.target_length {
            let reason = format!(
                "steps produce {} characters but targetLength is {}",
                op.target_len(),
                self.target_length
            );
            log::warn!("Rejected operation payload: {reason}");
            return Err(OtError::InvalidPayload(reason));
        }

        if op.steps().len() != declared_steps {
            log::debug!(
                "Canonicalized operation payload: {declared_steps} steps -> {}",
                op.steps().len()
            );
        }
        Ok(op)
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        WireOperation::from_operation(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let wire = WireOperation::deserialize(deserializer)?;
        wire.into_operation().map_err(serde::de::Error::custom)
    }
}

fn step_to_json(step: &Step) -> Value {
    let (key, value) = match step {
        Step::Retain(n) => ("retain", Value::from(*n)),
        Step::Insert(text) => ("insert", Value::from(text.as_str())),
        Step::Delete(n) => ("delete", Value::from(*n)),
    };
    let mut object = Map::with_capacity(1);
    object.insert(key.to_string(), value);
    Value::Object(object)
}

impl Operation {
    /// `{steps, baseLength, targetLength}` as a JSON value.
    pub fn to_json(&self) -> Value {
        let steps: Vec<Value> = self.steps().iter().map(step_to_json).collect();
        json!({
            "steps": steps,
            "baseLength": self.base_len(),
            "targetLength": self.target_len()
        })
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate an operation from a JSON value.
    pub fn from_json(value: Value) -> Result<Self> {
        let wire: WireOperation = serde_json::from_value(value)?;
        wire.into_operation()
    }

    pub fn from_json_str(payload: &str) -> Result<Self> {
        let wire: WireOperation = serde_json::from_str(payload)?;
        wire.into_operation()
    }
}
