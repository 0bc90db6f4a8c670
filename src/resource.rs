//! Value sources the evaluators read from.
//!
//! Display-mode evaluation reads a loaded [`Resource`]; request-mode
//! evaluation reads submitted [`RequestValues`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::ResourceKind;

/// A loaded resource, read by display-mode evaluation and field resolution.
pub trait Resource {
    /// Value of the named attribute, or `None` when absent.
    fn attribute(&self, key: &str) -> Option<Value>;

    /// Whether this resource is a plain map or a model object.
    fn kind(&self) -> ResourceKind {
        ResourceKind::Model
    }
}

/// Submitted form input, read by request-mode evaluation and field fills.
pub trait RequestValues {
    /// True when the key was submitted, whatever its value.
    fn has(&self, key: &str) -> bool;

    /// Submitted value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Option<Value>;
}

impl Resource for Map<String, Value> {
    fn attribute(&self, key: &str) -> Option<Value> {
        Map::get(self, key).cloned()
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Map
    }
}

impl RequestValues for Map<String, Value> {
    fn has(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Value> {
        Map::get(self, key).cloned()
    }
}

impl RequestValues for Value {
    fn has(&self, key: &str) -> bool {
        self.as_object().is_some_and(|obj| obj.contains_key(key))
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|obj| obj.get(key)).cloned()
    }
}

/// A model object with named attributes.
///
/// Polymorphic relations store their target class under a sibling
/// `{relation}_type` attribute, which display-mode equality consults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model {
    attributes: Map<String, Value>,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    /// Builds a model from a JSON object. Returns `None` for any other value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(attributes) => Some(Model { attributes }),
            _ => None,
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn get_attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Type tag of the polymorphic relation `relation`, if the model has one.
    pub fn morph_type(&self, relation: &str) -> Option<&Value> {
        self.attributes.get(&format!("{}_type", relation))
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

impl From<Map<String, Value>> for Model {
    fn from(attributes: Map<String, Value>) -> Self {
        Model { attributes }
    }
}

impl Resource for Model {
    fn attribute(&self, key: &str) -> Option<Value> {
        self.attributes.get(key).cloned()
    }
}
