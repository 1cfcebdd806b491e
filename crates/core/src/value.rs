//! Dynamic values passed through dispatch, and conversions to and from
//! plain Rust types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{CallError, ConversionError};
use crate::kind::ParamKind;

/// A shared, type-erased host object.
///
/// Used both as an argument value and as the receiver of instance bindings.
/// The type name is what member catalogs are keyed on.
#[derive(Clone)]
pub struct ObjectRef {
    type_name: Arc<str>,
    object: Arc<dyn Any + Send + Sync>,
}

impl ObjectRef {
    /// Wraps `object` under `type_name`.
    pub fn new<T, S>(type_name: S, object: T) -> Self
    where
        T: Any + Send + Sync,
        S: Into<Arc<str>>,
    {
        Self::from_arc(type_name, Arc::new(object))
    }

    /// Wraps an already shared object.
    pub fn from_arc<T, S>(type_name: S, object: Arc<T>) -> Self
    where
        T: Any + Send + Sync,
        S: Into<Arc<str>>,
    {
        Self {
            type_name: type_name.into(),
            object,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.object.is::<T>()
    }

    /// True when both handles point at the same object.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.ptr_eq(other)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Object(ObjectRef),
}

impl Value {
    pub fn kind(&self) -> ParamKind {
        match self {
            Value::Null => ParamKind::Any,
            Value::Bool(_) => ParamKind::Boolean,
            Value::Int(_) => ParamKind::Integer,
            Value::Float(_) => ParamKind::Float,
            Value::String(_) => ParamKind::String,
            Value::Bytes(_) => ParamKind::ByteArray,
            Value::Array(_) => ParamKind::Array,
            Value::Object(object) => ParamKind::object(object.type_name()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Rust types with a fixed [`ParamKind`].
pub trait ValueType {
    fn kind() -> ParamKind;
}

/// Conversion of a Rust value into a dispatch [`Value`].
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Conversion of a dispatch [`Value`] back into a Rust value.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ConversionError>;
}

macro_rules! impl_value_type {
    ($ty:ty, $kind:expr, $variant:ident) => {
        impl ValueType for $ty {
            fn kind() -> ParamKind {
                $kind
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ConversionError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ConversionError::mismatch($kind, other.kind())),
                }
            }
        }
    };
}

impl_value_type!(bool, ParamKind::Boolean, Bool);
impl_value_type!(i64, ParamKind::Integer, Int);
impl_value_type!(f64, ParamKind::Float, Float);
impl_value_type!(String, ParamKind::String, String);
impl_value_type!(Vec<u8>, ParamKind::ByteArray, Bytes);
impl_value_type!(Vec<Value>, ParamKind::Array, Array);

impl ValueType for i32 {
    fn kind() -> ParamKind {
        ParamKind::Integer
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| ConversionError::OutOfRange {
            kind: ParamKind::Integer,
            value: wide.to_string(),
        })
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl ValueType for () {
    fn kind() -> ParamKind {
        ParamKind::Void
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

// Results of void methods are discarded, whatever the binding returned.
impl FromValue for () {
    fn from_value(_value: Value) -> Result<Self, ConversionError> {
        Ok(())
    }
}

impl ValueType for Value {
    fn kind() -> ParamKind {
        ParamKind::Any
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

impl IntoValue for ObjectRef {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl FromValue for ObjectRef {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(ConversionError::mismatch(
                ParamKind::object("object"),
                other.kind(),
            )),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map(IntoValue::into_value).unwrap_or(Value::Null)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Checks the argument count of a call.
pub fn expect_arity(args: &[Value], expected: usize) -> Result<(), CallError> {
    if args.len() != expected {
        return Err(CallError::Arity {
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

/// Converts the argument at `index`.
pub fn arg<T: FromValue>(args: &[Value], index: usize) -> Result<T, CallError> {
    let value = args.get(index).cloned().ok_or(CallError::Arity {
        expected: index + 1,
        found: args.len(),
    })?;
    T::from_value(value).map_err(|source| CallError::Argument { index, source })
}
