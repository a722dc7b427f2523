//! Decoding objects by their `type` member.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{Object, UnknownObject};

/// Errors produced while building or installing a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("object type {0:?} is already registered")]
    Duplicate(String),
    #[error("a global object registry is already installed")]
    AlreadyInstalled,
}

/// Errors produced while decoding an object.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("JSON does not contain a log object")]
    NoLogObject,
    #[error("invalid log object: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DecodeResult<T> = Result<T, DecodeError>;

type DecodeFn = fn(Value) -> Result<Box<dyn Object>, serde_json::Error>;

fn decode_as<T>(value: Value) -> Result<Box<dyn Object>, serde_json::Error>
where
    T: Object + DeserializeOwned,
{
    Ok(Box::new(serde_json::from_value::<T>(value)?))
}

/// Collects object types before freezing them into an [`ObjectRegistry`].
#[derive(Default)]
pub struct ObjectRegistryBuilder {
    decoders: HashMap<String, DecodeFn>,
}

impl ObjectRegistryBuilder {
    /// Decode objects whose `type` is `type_name` as `T`.
    pub fn register<T>(mut self, type_name: impl Into<String>) -> Result<Self, RegistryError>
    where
        T: Object + DeserializeOwned,
    {
        let type_name = type_name.into();
        if self.decoders.contains_key(&type_name) {
            return Err(RegistryError::Duplicate(type_name));
        }
        self.decoders.insert(type_name, decode_as::<T>);
        Ok(self)
    }

    pub fn build(self) -> ObjectRegistry {
        ObjectRegistry {
            decoders: self.decoders,
        }
    }
}

/// Frozen table from object type names to decoders.
pub struct ObjectRegistry {
    decoders: HashMap<String, DecodeFn>,
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.type_names().collect();
        names.sort_unstable();
        f.debug_struct("ObjectRegistry").field("types", &names).finish()
    }
}

impl ObjectRegistry {
    pub fn builder() -> ObjectRegistryBuilder {
        ObjectRegistryBuilder::default()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.decoders.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    /// Decode a JSON object by dispatching on its `type` member.
    ///
    /// Objects of unregistered types decode to [`UnknownObject`].
    pub fn decode(&self, value: Value) -> DecodeResult<Box<dyn Object>> {
        let Some(type_name) = value.get("type").and_then(Value::as_str) else {
            return Err(DecodeError::NoLogObject);
        };
        match self.decoders.get(type_name) {
            Some(decode) => Ok(decode(value)?),
            None => {
                debug!(type_name, "unregistered object type, decoding as unknown object");
                Ok(Box::new(UnknownObject::from_json(value)?))
            }
        }
    }

    pub fn decode_str(&self, json: &str) -> DecodeResult<Box<dyn Object>> {
        self.decode(serde_json::from_str(json)?)
    }
}

static GLOBAL: OnceLock<ObjectRegistry> = OnceLock::new();

/// Install the process-wide registry. Only the first call succeeds.
pub fn install_global(registry: ObjectRegistry) -> Result<(), RegistryError> {
    GLOBAL.set(registry).map_err(|_| RegistryError::AlreadyInstalled)
}

/// The process-wide registry, if one was installed.
pub fn global() -> Option<&'static ObjectRegistry> {
    GLOBAL.get()
}
