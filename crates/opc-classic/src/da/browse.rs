//! Browse filters (OPC DA 3.0 `OPCBROWSEFILTER`)

use std::fmt;
use std::str::FromStr;

use crate::error::{OpcError, Result};

/// Classification of a single address-space node
///
/// Every node is exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Contains other elements
    Branch,
    /// Represents an item with a value
    Item,
}

impl NodeKind {
    /// Classify from the element flags reported by a browse
    ///
    /// A node that has children is a branch, even if it also exposes a value.
    pub fn from_flags(has_children: bool, is_item: bool) -> Self {
        if has_children || !is_item {
            Self::Branch
        } else {
            Self::Item
        }
    }
}

/// Anything a browse filter can be applied to
pub trait Classify {
    fn node_kind(&self) -> NodeKind;
}

impl Classify for NodeKind {
    fn node_kind(&self) -> NodeKind {
        *self
    }
}

impl<T: Classify + ?Sized> Classify for &T {
    fn node_kind(&self) -> NodeKind {
        (**self).node_kind()
    }
}

/// The type of browse elements to return during a browse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrowseFilter {
    /// Return all types of browse elements
    #[default]
    All,
    /// Return only elements that contain other elements
    Branch,
    /// Return only elements that represent items
    Item,
}

impl BrowseFilter {
    pub const ALL: [BrowseFilter; 3] = [Self::All, Self::Branch, Self::Item];

    /// Whether `node` passes this filter
    pub fn admits<N: Classify + ?Sized>(self, node: &N) -> bool {
        match self {
            Self::All => true,
            Self::Branch => node.node_kind() == NodeKind::Branch,
            Self::Item => node.node_kind() == NodeKind::Item,
        }
    }

    /// Keep only the nodes this filter admits
    pub fn apply<I>(self, nodes: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
        I::Item: Classify,
    {
        nodes.into_iter().filter(move |node| self.admits(node))
    }

    /// `OPCBROWSEFILTER` value used by `IOPCBrowse::Browse`
    pub fn to_wire(self) -> u32 {
        match self {
            Self::All => 1,
            Self::Branch => 2,
            Self::Item => 3,
        }
    }

    pub fn from_wire(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::All),
            2 => Ok(Self::Branch),
            3 => Ok(Self::Item),
            _ => Err(OpcError::InvalidEnumValue {
                kind: "browse filter",
                value,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Branch => "branch",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for BrowseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrowseFilter {
    type Err = OpcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpcError::UnknownVariant {
                kind: "browse filter",
                name: s.to_string(),
            })
    }
}
