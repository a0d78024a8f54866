//! Axis reordering and multi-view fusion for microscopy hyperstacks.
//!
//! A hyperstack is a multi-dimensional image stored as a flat ordered
//! sequence of 2D planes plus extents for the channel, z and time axes.
//! This crate provides the two computational cores of a multi-view
//! processing pipeline:
//!
//! - **Axis reordering** ([`axes`]): remapping the flat plane order from
//!   one permutation of (channel, z, time) to another by pure index
//!   arithmetic, sharing the plane buffers instead of copying pixels.
//! - **Multi-view fusion** ([`fusion`]): resampling several registered
//!   volumes into one composite covering the union of their transformed
//!   extents, one output channel per source channel.
//!
//! Acquisition, file I/O, registration fitting and user interfaces are
//! out of scope; volumes arrive as in-memory stacks and transforms as
//! already-fitted [`InvertibleTransform`] values.
//!
//! # Example
//!
//! ```
//! use hyperfuse::{Affine2, FusionRequest, Hyperstack, Plane, SampleType, StackShape};
//! use std::sync::Arc;
//!
//! # fn main() -> hyperfuse::Result<()> {
//! let plane = Plane::from_samples(2, 2, vec![0.0f32, 1.0, 2.0, 3.0])?;
//! let stack = Hyperstack::new("view 1", StackShape::new(1, 1, 1)?, vec![Arc::new(plane)])?;
//! let transform = Affine2::identity();
//! let result = FusionRequest::new(2, SampleType::Float32)
//!     .push(&stack, &transform)
//!     .fuse()?;
//! assert_eq!(result.stack.shape().channels(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! [`axes`]: ./axes/index.html
//! [`fusion`]: ./fusion/index.html
//! [`InvertibleTransform`]: ./transform/trait.InvertibleTransform.html
#![deny(missing_debug_implementations)]
#![warn(missing_docs, trivial_casts)]

pub mod axes;
pub mod error;
pub mod fusion;
pub mod interp;
pub mod stack;
pub mod transform;
pub mod typedef;

pub use crate::axes::{AxisAssignment, AxisOrder, AxisRole};
pub use crate::error::{HyperfuseError, Result};
pub use crate::fusion::{CompositeResult, FusedBounds, FusionRequest};
pub use crate::interp::LinearInterpolator;
pub use crate::stack::{Calibration, ChannelView, Hyperstack, Plane, PlaneData, Sample, StackShape};
pub use crate::transform::{Affine2, Affine3, AxialScale, InvertibleTransform};
pub use crate::typedef::SampleType;
