//! DCOM authentication and impersonation levels
//!
//! Values match `RPC_C_AUTHN_LEVEL_*` and `RPC_C_IMP_LEVEL_*` and are passed
//! unchanged to the process security call.

use std::fmt;
use std::str::FromStr;

use crate::error::{OpcError, Result};

/// Authentication levels (`RPC_C_AUTHN_LEVEL`)
///
/// Ordinals are ordered by strength, so `Ord` can be used to pick a
/// minimum acceptable level. `Default` is the "unspecified" sentinel and
/// sorts below every real level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u32)]
pub enum AuthenticationLevel {
    /// Let DCOM choose using its normal security blanket negotiation
    #[default]
    Default = 0,
    /// No authentication
    None = 1,
    /// Authenticate when the client establishes a relationship with the server
    Connect = 2,
    /// Authenticate at the beginning of each remote procedure call
    Call = 3,
    /// Authenticate that all data received is from the expected client
    Packet = 4,
    /// Packet authentication plus verification that no data was modified
    Integrity = 5,
    /// Integrity plus encryption of every call's arguments
    Privacy = 6,
}

impl AuthenticationLevel {
    /// Every level, weakest first
    pub const ALL: [AuthenticationLevel; 7] = [
        Self::Default,
        Self::None,
        Self::Connect,
        Self::Call,
        Self::Packet,
        Self::Integrity,
        Self::Privacy,
    ];

    /// Minimum level accepted by hardened DCOM servers (KB5004442)
    pub const HARDENED_MINIMUM: AuthenticationLevel = Self::Integrity;

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Default),
            1 => Some(Self::None),
            2 => Some(Self::Connect),
            3 => Some(Self::Call),
            4 => Some(Self::Packet),
            5 => Some(Self::Integrity),
            6 => Some(Self::Privacy),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// False only for `Default`
    pub fn is_specified(self) -> bool {
        self != Self::Default
    }

    /// Returns true if this level requires message signing
    pub fn requires_signing(self) -> bool {
        matches!(self, Self::Integrity | Self::Privacy)
    }

    /// Returns true if this level requires message encryption
    pub fn requires_encryption(self) -> bool {
        matches!(self, Self::Privacy)
    }

    /// Level actually used on a datagram transport
    ///
    /// Datagram transports have no connection or call boundary to
    /// authenticate at, so Connect and Call are raised to Packet.
    pub fn effective_for_datagram(self) -> Self {
        match self {
            Self::Connect | Self::Call => Self::Packet,
            other => other,
        }
    }

    /// Whether this level satisfies `minimum`
    ///
    /// An unspecified level only satisfies an unspecified minimum.
    pub fn meets(self, minimum: AuthenticationLevel) -> bool {
        if !self.is_specified() {
            return !minimum.is_specified();
        }
        self >= minimum
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::None => "none",
            Self::Connect => "connect",
            Self::Call => "call",
            Self::Packet => "packet",
            Self::Integrity => "integrity",
            Self::Privacy => "privacy",
        }
    }
}

impl TryFrom<u32> for AuthenticationLevel {
    type Error = OpcError;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_u32(value).ok_or(OpcError::InvalidEnumValue {
            kind: "authentication level",
            value,
        })
    }
}

impl fmt::Display for AuthenticationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuthenticationLevel {
    type Err = OpcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpcError::UnknownVariant {
                kind: "authentication level",
                name: s.to_string(),
            })
    }
}

/// Impersonation levels (`RPC_C_IMP_LEVEL`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u32)]
pub enum ImpersonationLevel {
    /// Let DCOM choose
    Default = 0,
    /// The client is anonymous to the server
    Anonymous = 1,
    /// The server may obtain the client's identity
    #[default]
    Identify = 2,
    /// The server may impersonate the client on its own machine
    Impersonate = 3,
    /// The server may impersonate the client on other machines
    Delegate = 4,
}

impl ImpersonationLevel {
    pub const ALL: [ImpersonationLevel; 5] = [
        Self::Default,
        Self::Anonymous,
        Self::Identify,
        Self::Impersonate,
        Self::Delegate,
    ];

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Default),
            1 => Some(Self::Anonymous),
            2 => Some(Self::Identify),
            3 => Some(Self::Impersonate),
            4 => Some(Self::Delegate),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Anonymous => "anonymous",
            Self::Identify => "identify",
            Self::Impersonate => "impersonate",
            Self::Delegate => "delegate",
        }
    }
}

impl fmt::Display for ImpersonationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImpersonationLevel {
    type Err = OpcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpcError::UnknownVariant {
                kind: "impersonation level",
                name: s.to_string(),
            })
    }
}
