//! HDA attribute values

use chrono::NaiveDateTime;

use crate::com::FileTime;
use crate::error::Result;
use crate::security::TimeConfig;
use crate::value::Value;

/// The value of an attribute at a point in time
///
/// The timestamp carries no zone. `time_as_utc` on the
/// [`ApplicationInstance`](crate::ApplicationInstance) decides whether it is
/// UTC or local time when it crosses the marshalling boundary.
///
/// No equality is defined: two readings are never interchangeable just
/// because their contents match.
#[derive(Debug)]
pub struct AttributeValue {
    value: Value,
    timestamp: NaiveDateTime,
}

impl Default for AttributeValue {
    fn default() -> Self {
        Self {
            value: Value::Empty,
            timestamp: NaiveDateTime::MIN,
        }
    }
}

impl AttributeValue {
    /// Create an empty value with the minimum timestamp
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<Value>, timestamp: NaiveDateTime) -> Self {
        Self {
            value: value.into(),
            timestamp,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Take the payload, leaving `Value::Empty`
    pub fn take_value(&mut self) -> Value {
        std::mem::take(&mut self.value)
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: NaiveDateTime) {
        self.timestamp = timestamp;
    }

    /// False while the timestamp is still the minimum instant
    pub fn has_timestamp(&self) -> bool {
        self.timestamp != NaiveDateTime::MIN
    }

    /// Creates a deep copy
    ///
    /// On failure the payload's error is returned and `self` is untouched.
    pub fn deep_clone(&self) -> Result<Self> {
        Ok(Self {
            value: self.value.deep_clone()?,
            timestamp: self.timestamp,
        })
    }

    pub fn marshal_timestamp(&self, time: &TimeConfig) -> Result<FileTime> {
        FileTime::from_timestamp(self.timestamp, time.as_utc)
    }

    pub fn unmarshal_timestamp(&mut self, filetime: FileTime, time: &TimeConfig) -> Result<()> {
        self.timestamp = filetime.to_timestamp(time.as_utc)?;
        Ok(())
    }
}
