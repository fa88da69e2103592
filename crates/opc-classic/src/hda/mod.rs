//! OPC Historical Data Access types

mod attribute;

pub use attribute::AttributeValue;
