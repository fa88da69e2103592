//! OPC Data Access types

mod browse;

pub use browse::{BrowseFilter, Classify, NodeKind};
