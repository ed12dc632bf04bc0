use crate::{
    log::{Error, UNSERIALIZABLE},
    value::{Map, Value},
};
use serde::Serialize;
use serde_json::to_value;

/// Provides the data that a template is compiled against.
///
/// The scope is the root map of the value tree; paths such as
/// `object.data[0]` start by looking up their first segment here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    data: Map<String, Value>,
}

impl Scope {
    /// Create a new, empty [`Scope`].
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Scope;
    ///
    /// let scope = Scope::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self { data: Map::new() }
    }

    /// Create a [`Scope`] from any serializable data.
    ///
    /// A map becomes the root of the scope, and a list is keyed by the index
    /// of each item. Any other data, or data that fails to serialize, results
    /// in an empty scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Scope;
    /// use std::collections::BTreeMap;
    ///
    /// let data = BTreeMap::from([("name", "taylor")]);
    /// let scope = Scope::from_serialize(&data);
    ///
    /// assert_eq!(scope.get("name").unwrap(), "taylor");
    /// ```
    pub fn from_serialize<T>(data: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match to_value(data) {
            Ok(value) => Self::from(value),
            Err(error) => {
                tracing::warn!(%error, "scope data is unserializable, using an empty scope");
                Self::new()
            }
        }
    }

    /// Inserts a key-value pair into the [`Scope`].
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Scope;
    ///
    /// let mut scope = Scope::new();
    /// let result = scope.insert("name", "taylor");
    ///
    /// assert!(result.is_ok());
    /// ```
    pub fn insert<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        let key = key.into();
        let value = to_value(&value).map_err(|error| {
            Error::build(UNSERIALIZABLE)
                .with_help(format!("value for key `{key}` cannot be serialized: {error}"))
        })?;
        self.data.insert(key, value);

        Ok(())
    }

    /// Inserts a key-value pair into the [`Scope`].
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Scope;
    ///
    /// let mut scope = Scope::new();
    /// scope.insert_must("name", "taylor");
    /// ```
    #[inline]
    pub fn insert_must<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Serialize,
    {
        if let Err(error) = self.insert(key, value) {
            panic!("{error:#}");
        }
    }

    /// Inserts a key-value pair into the [`Scope`].
    ///
    /// Returns the `Scope`, so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Scope;
    ///
    /// let scope = Scope::new().with("name", "taylor");
    ///
    /// assert!(scope.is_ok());
    /// ```
    #[inline]
    pub fn with<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert(key, value)?;

        Ok(self)
    }

    /// Inserts a key-value pair into the [`Scope`].
    ///
    /// Returns the `Scope`, so additional methods may be chained.
    ///
    /// # Panics
    ///
    /// Panics if the serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Scope;
    ///
    /// let scope = Scope::new().with_must("name", "taylor");
    /// ```
    #[inline]
    pub fn with_must<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Serialize,
    {
        self.insert_must(key, value);

        self
    }

    /// Returns a reference to the [`Value`] corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Scope;
    ///
    /// let scope = Scope::new().with_must("name", "taylor");
    /// let result = scope.get("name");
    ///
    /// assert_eq!(result.unwrap(), "taylor")
    /// ```
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Return the root map.
    #[inline]
    pub(crate) fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl From<Map<String, Value>> for Scope {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

impl From<Value> for Scope {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            Value::Array(items) => Self {
                data: items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect(),
            },
            _ => Self::new(),
        }
    }
}
