//! Attribute payloads
//!
//! A [`Value`] is either plain data, copied by value, or a composite whose
//! copy semantics are explicit:
//!
//! - `Array`: element-wise deep copy, order preserved
//! - `Object`: the payload's own [`DeepClone`] capability
//! - `Shared`: shallow copy of an `Arc`; clones alias the same object

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::NaiveDateTime;
use tracing::trace;

use crate::error::Result;

/// Capability of payloads that know how to copy themselves
///
/// A failure is returned to the caller of [`Value::deep_clone`] unchanged.
pub trait DeepClone: Any + fmt::Debug + Send + Sync {
    fn deep_clone(&self) -> Result<Box<dyn DeepClone>>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Payload of an attribute value
#[derive(Debug, Default)]
pub enum Value {
    #[default]
    Empty,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
    Date(NaiveDateTime),
    Bytes(Bytes),
    Array(Vec<Value>),
    Object(Box<dyn DeepClone>),
    Shared(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wrap a payload that provides its own deep copy
    pub fn object(value: impl DeepClone) -> Self {
        Self::Object(Box::new(value))
    }

    /// Wrap a payload without a copy capability
    pub fn shared(value: impl Any + Send + Sync) -> Self {
        Self::Shared(Arc::new(value))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Shared(_) => "shared",
        }
    }

    /// Copy this value without aliasing any mutable state it owns
    ///
    /// `Shared` payloads are the exception: their `Arc` is shared.
    pub fn deep_clone(&self) -> Result<Value> {
        let value = match self {
            Self::Empty => Self::Empty,
            Self::Bool(v) => Self::Bool(*v),
            Self::I8(v) => Self::I8(*v),
            Self::I16(v) => Self::I16(*v),
            Self::I32(v) => Self::I32(*v),
            Self::I64(v) => Self::I64(*v),
            Self::U8(v) => Self::U8(*v),
            Self::U16(v) => Self::U16(*v),
            Self::U32(v) => Self::U32(*v),
            Self::U64(v) => Self::U64(*v),
            Self::F32(v) => Self::F32(*v),
            Self::F64(v) => Self::F64(*v),
            Self::Text(v) => Self::Text(v.clone()),
            Self::Date(v) => Self::Date(*v),
            Self::Bytes(v) => Self::Bytes(v.clone()),
            Self::Array(items) => Self::Array(
                items
                    .iter()
                    .map(Value::deep_clone)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Self::Object(object) => Self::Object(object.deep_clone()?),
            Self::Shared(shared) => {
                trace!("shallow copy of shared payload");
                Self::Shared(Arc::clone(shared))
            }
        };
        Ok(value)
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Object(object) => object.as_any().downcast_ref(),
            _ => None,
        }
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        match self {
            Self::Object(object) => object.as_any_mut().downcast_mut(),
            _ => None,
        }
    }

    pub fn downcast_shared<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Shared(shared) => Arc::clone(shared).downcast::<T>().ok(),
            _ => None,
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Text,
    NaiveDateTime => Date,
    Bytes => Bytes,
    Vec<Value> => Array,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::I8(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::U8(v) => write!(f, "{}", v),
            Self::U16(v) => write!(f, "{}", v),
            Self::U32(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
            Self::Date(v) => write!(f, "{}", v),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Object(object) => write!(f, "{:?}", object),
            Self::Shared(_) => f.write_str("<shared>"),
        }
    }
}
