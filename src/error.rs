//! Crate error types.
use crate::typedef::SampleType;
use quick_error::quick_error;

quick_error! {
    /// Error type for hyperstack construction, axis reordering and fusion.
    #[derive(Debug)]
    pub enum HyperfuseError {
        /// An axis mapping in which some axis is consumed by more than one
        /// slot, or by none. The occupancy counts are reported per input
        /// axis in (channels, slices, frames) order.
        InconsistentMapping(counts: [usize; 3]) {
            display("inconsistent axis mapping: occupancy {:?}, each of channels, slices and frames must be assigned to exactly one output axis", counts)
        }
        /// A symbolic axis order which is not one of the six known names.
        UnknownOrdering(name: String) {
            display("unknown axis ordering `{}`", name)
        }
        /// A hyperstack extent of zero.
        ZeroDimension(axis: &'static str) {
            display("hyperstack {} count must be at least 1", axis)
        }
        /// A plane whose extents differ from the rest of the stack.
        PlaneShapeMismatch(expected: (u32, u32), got: (u32, u32)) {
            display("plane is {}x{}, expected {}x{}", got.0, got.1, expected.0, expected.1)
        }
        /// A plane buffer whose length does not match its declared extents.
        PlaneLengthMismatch(expected: usize, got: usize) {
            display("plane buffer holds {} samples, extents require {}", got, expected)
        }
        /// A plane sequence whose length does not match the declared
        /// dimension triple.
        PlaneCountMismatch(expected: usize, got: usize) {
            display("hyperstack holds {} planes, dimensions require {}", got, expected)
        }
        /// A plane whose sample type differs from the rest of the stack.
        SampleTypeMismatch(expected: SampleType, got: SampleType) {
            display("sample type {:?} does not match expected {:?}", got, expected)
        }
        /// A fusion request without any input volumes.
        EmptyRequest {
            display("fusion request contains no volumes")
        }
        /// A fusion dimensionality other than 2 or 3.
        UnsupportedDimensionality(dims: usize) {
            display("fusion supports 2 or 3 dimensions, got {}", dims)
        }
        /// A volume or transform whose dimensionality does not match the
        /// requested fusion dimensionality.
        DimensionalityMismatch(expected: usize, got: usize) {
            display("dimensionality {} does not match requested {}", got, expected)
        }
        /// A transform with no inverse at the requested point.
        NoninvertibleTransform {
            display("transform cannot be inverted at the requested point")
        }
        /// Fatal fusion abort: the registration model for the named volume
        /// could not be inverted while filling the named channel.
        NoninvertibleModel(volume: usize, channel: usize) {
            display("cannot invert model for volume {}, channel {}", volume, channel)
        }
        /// Attempted to access a sample or plane outside the stack.
        OutOfBounds {
            display("out of bounds access to hyperstack")
        }
    }
}

/// Alias for a `Result` with the crate error type.
pub type Result<T> = ::std::result::Result<T, HyperfuseError>;
