//! COM `FILETIME` timestamps
//!
//! Timestamps are held as zone-less `NaiveDateTime`s. Whether one is UTC or
//! process-local is decided here, at the marshalling boundary, by the
//! `as_utc` flag.

use std::fmt;

use bytes::{Buf, BufMut};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::{OpcError, Result};

/// Seconds between 1601-01-01 and 1970-01-01
const EPOCH_DIFFERENCE_SECS: i64 = 11_644_473_600;

/// 100 ns ticks per second
const TICKS_PER_SEC: i64 = 10_000_000;

/// 100 ns intervals since 1601-01-01 UTC
///
/// `FileTime(0)` stands for "no timestamp" and maps to
/// `NaiveDateTime::MIN`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FileTime(pub u64);

impl FileTime {
    /// Size of FILETIME in bytes
    pub const SIZE: usize = 8;

    pub const ZERO: FileTime = FileTime(0);

    pub fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Low and high words (`dwLowDateTime`, `dwHighDateTime`)
    pub fn to_parts(&self) -> (u32, u32) {
        (self.0 as u32, (self.0 >> 32) as u32)
    }

    pub fn from_parts(low: u32, high: u32) -> Self {
        Self(((high as u64) << 32) | low as u64)
    }

    /// Encode to buffer
    pub fn encode<B: BufMut>(&self, buf: &mut B, little_endian: bool) {
        let (low, high) = self.to_parts();
        if little_endian {
            buf.put_u32_le(low);
            buf.put_u32_le(high);
        } else {
            buf.put_u32(low);
            buf.put_u32(high);
        }
    }

    /// Decode from buffer
    pub fn decode<B: Buf>(buf: &mut B, little_endian: bool) -> Result<Self> {
        if buf.remaining() < Self::SIZE {
            return Err(OpcError::Marshal(format!(
                "FILETIME needs {} bytes, have {}",
                Self::SIZE,
                buf.remaining()
            )));
        }
        let (low, high) = if little_endian {
            (buf.get_u32_le(), buf.get_u32_le())
        } else {
            (buf.get_u32(), buf.get_u32())
        };
        Ok(Self::from_parts(low, high))
    }

    /// Marshal a timestamp
    ///
    /// With `as_utc` the timestamp is taken as UTC, otherwise as local
    /// time. `NaiveDateTime::MIN` and anything up to and including
    /// 1601-01-01T00:00:00 become zero, so that first instant unmarshals as
    /// `NaiveDateTime::MIN`. Instants past the largest FILETIME
    /// (`i64::MAX` ticks, year 30828) are rejected.
    pub fn from_timestamp(timestamp: NaiveDateTime, as_utc: bool) -> Result<Self> {
        if as_utc {
            Self::from_zoned(&Utc, timestamp)
        } else {
            Self::from_zoned(&Local, timestamp)
        }
    }

    fn from_zoned<Tz: TimeZone>(tz: &Tz, timestamp: NaiveDateTime) -> Result<Self> {
        if timestamp == NaiveDateTime::MIN {
            return Ok(Self::ZERO);
        }

        // ambiguous local times take the earlier instant
        let utc = tz
            .from_local_datetime(&timestamp)
            .earliest()
            .ok_or_else(|| {
                OpcError::Marshal(format!("{} does not exist in local time", timestamp))
            })?
            .with_timezone(&Utc);

        let secs = utc.timestamp() + EPOCH_DIFFERENCE_SECS;
        if secs < 0 {
            return Ok(Self::ZERO);
        }
        let ticks = secs
            .checked_mul(TICKS_PER_SEC)
            .and_then(|t| t.checked_add((utc.timestamp_subsec_nanos() / 100) as i64))
            .ok_or_else(|| {
                OpcError::Marshal(format!("{} is past the last FILETIME", timestamp))
            })?;
        Ok(Self(ticks as u64))
    }

    /// Unmarshal a timestamp
    ///
    /// Zero becomes `NaiveDateTime::MIN`. Otherwise the result is UTC with
    /// `as_utc`, local time without.
    pub fn to_timestamp(&self, as_utc: bool) -> Result<NaiveDateTime> {
        if self.is_zero() {
            return Ok(NaiveDateTime::MIN);
        }

        let ticks = i64::try_from(self.0)
            .map_err(|_| OpcError::Marshal(format!("FILETIME {} out of range", self.0)))?;
        let secs = ticks / TICKS_PER_SEC - EPOCH_DIFFERENCE_SECS;
        let nanos = ((ticks % TICKS_PER_SEC) * 100) as u32;
        let utc = DateTime::<Utc>::from_timestamp(secs, nanos)
            .ok_or_else(|| OpcError::Marshal(format!("FILETIME {} out of range", self.0)))?;

        if as_utc {
            Ok(utc.naive_utc())
        } else {
            Ok(utc.with_timezone(&Local).naive_local())
        }
    }
}

impl fmt::Debug for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FILETIME({:016x})", self.0)
    }
}

impl fmt::Display for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
