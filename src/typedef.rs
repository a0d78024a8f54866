//! Scalar sample types supported by hyperstack planes.
//!
//! The discriminant of each variant is the number of bits per sample,
//! matching how acquisition software names these formats. Primitive
//! integer values can be converted to `SampleType` and vice-versa.

use num_derive::FromPrimitive;

/// Data type of the scalar samples stored in a plane.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum SampleType {
    /// Unsigned 8 bit integer samples.
    Uint8 = 8,
    /// Unsigned 16 bit integer samples.
    Uint16 = 16,
    /// 32 bit floating point samples.
    Float32 = 32,
}

impl SampleType {
    /// Retrieve the size of one sample of this type, in bytes.
    pub fn size_of(self) -> usize {
        match self {
            SampleType::Uint8 => 1,
            SampleType::Uint16 => 2,
            SampleType::Float32 => 4,
        }
    }

    /// Whether samples of this type are integers.
    pub fn is_integer(self) -> bool {
        match self {
            SampleType::Uint8 | SampleType::Uint16 => true,
            SampleType::Float32 => false,
        }
    }
}
