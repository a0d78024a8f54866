//! This module defines the hyperstack data model: 2D sample planes, the
//! multi-dimensional stacks built from them, and read-only channel views
//! used for resampling.
//!
//! Planes are immutable once assembled into a stack and are shared by
//! reference counting. Operations that rearrange a stack (axis
//! reordering, the fusion output swap) only permute `Arc` handles; pixel
//! buffers are never copied. Dropping a stack drops its handle list while
//! the buffers persist for as long as any other stack references them.

pub mod element;
#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;
pub mod shape;

pub use self::element::Sample;
pub use self::shape::StackShape;

use crate::error::{HyperfuseError, Result};
use crate::typedef::SampleType;
use std::sync::Arc;

/// Sample buffer of a single plane, untyped over the supported scalar
/// sample types.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneData {
    /// Unsigned 8 bit samples.
    Uint8(Vec<u8>),
    /// Unsigned 16 bit samples.
    Uint16(Vec<u16>),
    /// 32 bit floating point samples.
    Float32(Vec<f32>),
}

impl PlaneData {
    fn len(&self) -> usize {
        match self {
            PlaneData::Uint8(v) => v.len(),
            PlaneData::Uint16(v) => v.len(),
            PlaneData::Float32(v) => v.len(),
        }
    }

    fn sample_type(&self) -> SampleType {
        match self {
            PlaneData::Uint8(_) => SampleType::Uint8,
            PlaneData::Uint16(_) => SampleType::Uint16,
            PlaneData::Float32(_) => SampleType::Float32,
        }
    }
}

/// A single 2D plane of scalar samples, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    label: Option<String>,
    data: PlaneData,
}

impl Plane {
    /// Validate and create a new plane from an untyped sample buffer.
    pub fn new(width: u32, height: u32, data: PlaneData) -> Result<Self> {
        if width == 0 {
            return Err(HyperfuseError::ZeroDimension("width"));
        }
        if height == 0 {
            return Err(HyperfuseError::ZeroDimension("height"));
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(HyperfuseError::PlaneLengthMismatch(expected, data.len()));
        }
        Ok(Plane {
            width,
            height,
            label: None,
            data,
        })
    }

    /// Validate and create a new plane from a typed sample buffer.
    ///
    /// # Example
    ///
    /// ```
    /// # use hyperfuse::Plane;
    /// let plane = Plane::from_samples(2, 2, vec![0u8, 1, 2, 3])?;
    /// assert_eq!(plane.get_f32(1, 1), 3.0);
    /// # Ok::<(), hyperfuse::HyperfuseError>(())
    /// ```
    pub fn from_samples<T: Sample>(width: u32, height: u32, samples: Vec<T>) -> Result<Self> {
        Plane::new(width, height, T::into_plane_data(samples))
    }

    /// Create a zero-filled plane of the given sample type.
    pub fn zeros(width: u32, height: u32, sample_type: SampleType) -> Self {
        let n = width as usize * height as usize;
        let data = match sample_type {
            SampleType::Uint8 => PlaneData::Uint8(vec![0; n]),
            SampleType::Uint16 => PlaneData::Uint16(vec![0; n]),
            SampleType::Float32 => PlaneData::Float32(vec![0.0; n]),
        };
        Plane {
            width,
            height,
            label: None,
            data,
        }
    }

    /// Attach a label, such as the title of the volume the plane was
    /// resampled from.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Retrieve the plane width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Retrieve the plane height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Retrieve the plane label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Retrieve this plane's sample type.
    pub fn sample_type(&self) -> SampleType {
        self.data.sample_type()
    }

    /// Borrow the raw sample buffer.
    pub fn data(&self) -> &PlaneData {
        &self.data
    }

    /// Fetch a single sample as `f32`.
    ///
    /// # Panic
    ///
    /// In debug builds, panics if the coordinates are out of range.
    pub fn get_f32(&self, x: u32, y: u32) -> f32 {
        debug_assert!(x < self.width && y < self.height);
        let i = y as usize * self.width as usize + x as usize;
        match &self.data {
            PlaneData::Uint8(v) => f32::from(v[i]),
            PlaneData::Uint16(v) => f32::from(v[i]),
            PlaneData::Float32(v) => v[i],
        }
    }

    /// Write one sample, converting the value to this plane's sample type
    /// with round-and-saturate semantics for integer types.
    pub fn set_from_f32(&mut self, x: u32, y: u32, value: f32) {
        debug_assert!(x < self.width && y < self.height);
        let i = y as usize * self.width as usize + x as usize;
        match &mut self.data {
            PlaneData::Uint8(v) => v[i] = <u8 as Sample>::from_f32(value),
            PlaneData::Uint16(v) => v[i] = <u16 as Sample>::from_f32(value),
            PlaneData::Float32(v) => v[i] = value,
        }
    }
}

/// Physical pixel sizes of a volume, one per spatial axis.
///
/// The depth-to-width ratio drives the anisotropy correction applied to
/// 3D fusion inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Physical size of a pixel along x.
    pub pixel_width: f64,
    /// Physical size of a pixel along y.
    pub pixel_height: f64,
    /// Physical distance between adjacent z slices.
    pub pixel_depth: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            pixel_width: 1.0,
            pixel_height: 1.0,
            pixel_depth: 1.0,
        }
    }
}

impl Calibration {
    /// Ratio of axial to lateral pixel size, the uniform scale that
    /// expresses z extents in lateral pixel units.
    pub fn axial_ratio(&self) -> f64 {
        self.pixel_depth / self.pixel_width
    }
}

/// An ordered sequence of equally shaped planes with (channel, slice,
/// frame) extents and physical calibration.
///
/// The flat plane order is channel-fastest, see [`StackShape`]. All
/// planes share the stack's width, height and sample type; these
/// invariants are checked on construction.
///
/// [`StackShape`]: ./shape/struct.StackShape.html
#[derive(Debug, Clone)]
pub struct Hyperstack {
    title: String,
    width: u32,
    height: u32,
    shape: StackShape,
    calibration: Calibration,
    sample_type: SampleType,
    planes: Vec<Arc<Plane>>,
}

impl Hyperstack {
    /// Validate and create a new hyperstack from its planes.
    ///
    /// The width, height and sample type are taken from the first plane;
    /// every other plane must match, and the plane count must equal the
    /// shape's plane count.
    pub fn new(title: impl Into<String>, shape: StackShape, planes: Vec<Arc<Plane>>) -> Result<Self> {
        let first = planes
            .first()
            .ok_or_else(|| HyperfuseError::PlaneCountMismatch(shape.plane_count(), 0))?;
        let width = first.width();
        let height = first.height();
        let sample_type = first.sample_type();
        if planes.len() != shape.plane_count() {
            return Err(HyperfuseError::PlaneCountMismatch(
                shape.plane_count(),
                planes.len(),
            ));
        }
        for plane in &planes {
            if plane.width() != width || plane.height() != height {
                return Err(HyperfuseError::PlaneShapeMismatch(
                    (width, height),
                    (plane.width(), plane.height()),
                ));
            }
            if plane.sample_type() != sample_type {
                return Err(HyperfuseError::SampleTypeMismatch(
                    sample_type,
                    plane.sample_type(),
                ));
            }
        }
        Ok(Hyperstack {
            title: title.into(),
            width,
            height,
            shape,
            calibration: Calibration::default(),
            sample_type,
            planes,
        })
    }

    /// Internal constructor for stacks derived from an already validated
    /// one, such as a reordered view sharing the same planes.
    pub(crate) fn from_parts(
        title: String,
        width: u32,
        height: u32,
        shape: StackShape,
        calibration: Calibration,
        sample_type: SampleType,
        planes: Vec<Arc<Plane>>,
    ) -> Self {
        debug_assert_eq!(planes.len(), shape.plane_count());
        Hyperstack {
            title,
            width,
            height,
            shape,
            calibration,
            sample_type,
            planes,
        }
    }

    /// Replace the calibration.
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Retrieve the stack title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Retrieve the plane width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Retrieve the plane height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Retrieve the (channels, slices, frames) triple.
    pub fn shape(&self) -> StackShape {
        self.shape
    }

    /// Retrieve the physical calibration.
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Retrieve the sample type shared by all planes.
    pub fn sample_type(&self) -> SampleType {
        self.sample_type
    }

    /// Borrow the flat plane sequence, in channel-fastest order.
    pub fn planes(&self) -> &[Arc<Plane>] {
        &self.planes
    }

    /// Borrow the plane at the given coordinates.
    ///
    /// # Errors
    ///
    /// - `HyperfuseError::OutOfBounds` if any coordinate surpasses the
    ///   stack's extents.
    pub fn plane(&self, channel: u32, slice: u32, frame: u32) -> Result<&Arc<Plane>> {
        if channel >= self.shape.channels()
            || slice >= self.shape.slices()
            || frame >= self.shape.frames()
        {
            return Err(HyperfuseError::OutOfBounds);
        }
        Ok(&self.planes[self.shape.stack_index(channel, slice, frame)])
    }

    /// Fetch a single sample as `f32`. Note that using this function
    /// continuously to traverse the stack is inefficient; prefer plane
    /// access or the `ndarray` export for traversal.
    ///
    /// # Errors
    ///
    /// - `HyperfuseError::OutOfBounds` if any coordinate surpasses the
    ///   stack's extents.
    pub fn sample_at(&self, channel: u32, slice: u32, frame: u32, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(HyperfuseError::OutOfBounds);
        }
        let plane = self.plane(channel, slice, frame)?;
        Ok(plane.get_f32(x, y))
    }

    /// Obtain a read-only view over the z planes of one channel at one
    /// frame, the unit consumed by the resampler.
    ///
    /// # Errors
    ///
    /// - `HyperfuseError::OutOfBounds` if the channel or frame surpasses
    ///   the stack's extents.
    pub fn channel_view(&self, channel: u32, frame: u32) -> Result<ChannelView> {
        if channel >= self.shape.channels() || frame >= self.shape.frames() {
            return Err(HyperfuseError::OutOfBounds);
        }
        let planes = (0..self.shape.slices())
            .map(|z| Arc::clone(&self.planes[self.shape.stack_index(channel, z, frame)]))
            .collect();
        Ok(ChannelView {
            width: self.width,
            height: self.height,
            planes,
        })
    }
}

/// A read-only view over one channel of one frame: the channel's z planes
/// in slice order, sampled as `f32`.
#[derive(Debug, Clone)]
pub struct ChannelView {
    width: u32,
    height: u32,
    planes: Vec<Arc<Plane>>,
}

impl ChannelView {
    /// Retrieve the view width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Retrieve the view height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Retrieve the number of z planes in the view.
    pub fn depth(&self) -> u32 {
        self.planes.len() as u32
    }

    /// Sample at integer coordinates, yielding `fill` for any coordinate
    /// outside the view's domain.
    pub fn value_or(&self, x: i64, y: i64, z: i64, fill: f32) -> f32 {
        if x < 0
            || y < 0
            || z < 0
            || x >= i64::from(self.width)
            || y >= i64::from(self.height)
            || z >= self.planes.len() as i64
        {
            return fill;
        }
        self.planes[z as usize].get_f32(x as u32, y as u32)
    }
}
