//! Index types for ship elements.
//!
//! Type-safe wrappers so a spring index can never be used to address a point.
//! Indices stay stable for the lifetime of a ship; destroyed elements are flagged,
//! never compacted.

use std::fmt;

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($display, "{}"), self.0)
            }
        }

        impl From<$name> for usize {
            fn from(value: $name) -> usize {
                value.index()
            }
        }
    };
}

impl_index_type!(PointIndex, "p");
impl_index_type!(SpringIndex, "s");
impl_index_type!(TriangleIndex, "t");
impl_index_type!(ElectricalElementIndex, "e");

static_assertions::assert_eq_size!(PointIndex, u32);

/// Label of a connected component; `NONE` for points that belong to none
/// (free ephemeral particles).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ConnectedComponentId(pub u32);

impl ConnectedComponentId {
    pub const NONE: ConnectedComponentId = ConnectedComponentId(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for ConnectedComponentId {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip_and_debug() {
        let p = PointIndex::new(7);
        assert_eq!(p.index(), 7);
        assert_eq!(format!("{:?}", p), "p7");
        assert_eq!(format!("{:?}", SpringIndex::new(3)), "s3");
    }

    #[test]
    fn component_none() {
        assert!(ConnectedComponentId::default().is_none());
        assert!(!ConnectedComponentId(1).is_none());
    }
}
