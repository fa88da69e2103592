//! COM data representations shared by the DA, A&E and HDA interfaces

mod time;

pub use time::FileTime;
