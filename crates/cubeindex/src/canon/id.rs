use std::fmt;

/// 128-bit canonical identity. Ordering is numeric (high word first).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CubeId(pub u128);

impl CubeId {
    #[inline]
    pub fn from_halves(high: u64, low: u64) -> Self {
        Self(((high as u128) << 64) | low as u128)
    }

    #[inline]
    pub fn high(self) -> u64 {
        (self.0 >> 64) as u64
    }

    #[inline]
    pub fn low(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for CubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}
