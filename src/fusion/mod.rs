//! Multi-view fusion of registered hyperstacks.
//!
//! A fusion request pairs each input stack with the invertible transform
//! registering it into a shared target space. The output extent is the
//! union of the transformed input extents; every channel of every input
//! is then resampled into that extent independently, and the results are
//! gathered into one composite stack with one output channel per
//! (volume, channel) pair. Overlapping sources are not blended; each
//! keeps its own channel.
//!
//! The per-channel resampling tasks are independent and run on rayon's
//! thread pool; the channel order of the composite follows the input
//! order deterministically regardless of scheduling.

mod bounds;
mod resample;

pub use self::bounds::FusedBounds;

use crate::axes::AxisOrder;
use crate::error::{HyperfuseError, Result};
use crate::interp::LinearInterpolator;
use crate::stack::{Hyperstack, Plane, StackShape};
use crate::transform::{AxialScale, InvertibleTransform};
use crate::typedef::SampleType;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

/// One registered input volume: a hyperstack and the transform mapping
/// its coordinate frame into the shared target space.
pub struct FusionInput<'a> {
    stack: &'a Hyperstack,
    transform: &'a dyn InvertibleTransform,
}

impl fmt::Debug for FusionInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FusionInput")
            .field("stack", &self.stack.title())
            .field("dimensions", &self.transform.dimensions())
            .finish()
    }
}

/// A fusion job: ordered inputs, target dimensionality, target sample
/// type and the out-of-bounds fill value.
///
/// The request carries all configuration explicitly; there are no
/// process-wide defaults. Inputs are validated when bounds are estimated
/// or the fusion runs, with no partial effect on failure.
#[derive(Debug)]
pub struct FusionRequest<'a> {
    inputs: Vec<FusionInput<'a>>,
    dimensionality: usize,
    target_type: SampleType,
    fill_value: f32,
}

impl<'a> FusionRequest<'a> {
    /// Create an empty request targeting the given dimensionality (2 or
    /// 3) and output sample type.
    pub fn new(dimensionality: usize, target_type: SampleType) -> Self {
        FusionRequest {
            inputs: Vec::new(),
            dimensionality,
            target_type,
            fill_value: 0.0,
        }
    }

    /// Append a registered volume. The input order determines the channel
    /// order of the composite.
    pub fn push(
        mut self,
        stack: &'a Hyperstack,
        transform: &'a dyn InvertibleTransform,
    ) -> Self {
        self.inputs.push(FusionInput { stack, transform });
        self
    }

    /// Set the value written where an inverse-mapped coordinate leaves
    /// the source domain. Defaults to zero.
    pub fn with_fill_value(mut self, fill_value: f32) -> Self {
        self.fill_value = fill_value;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(HyperfuseError::EmptyRequest);
        }
        if self.dimensionality != 2 && self.dimensionality != 3 {
            return Err(HyperfuseError::UnsupportedDimensionality(
                self.dimensionality,
            ));
        }
        for input in &self.inputs {
            if input.transform.dimensions() != self.dimensionality {
                return Err(HyperfuseError::DimensionalityMismatch(
                    self.dimensionality,
                    input.transform.dimensions(),
                ));
            }
            if self.dimensionality == 2 && input.stack.shape().slices() > 1 {
                return Err(HyperfuseError::DimensionalityMismatch(2, 3));
            }
        }
        Ok(())
    }

    /// Each input transform preceded by the axial scale that expresses
    /// its z extent in lateral pixel units. For 2D requests the scale is
    /// a passthrough. The callers' transforms are never mutated.
    fn scaled_transforms(&self) -> Vec<AxialScale<&'a dyn InvertibleTransform>> {
        self.inputs
            .iter()
            .map(|input| {
                let scale = if self.dimensionality == 3 {
                    input.stack.calibration().axial_ratio()
                } else {
                    1.0
                };
                AxialScale::new(input.transform, scale)
            })
            .collect()
    }

    /// Estimate the fused output extent without resampling anything.
    ///
    /// Estimating twice is safe: the anisotropy correction wraps the
    /// transforms instead of altering them.
    ///
    /// # Errors
    ///
    /// Any validation error of the request, see
    /// [`fuse`](#method.fuse).
    pub fn estimate_bounds(&self) -> Result<FusedBounds> {
        self.validate()?;
        let stacks: Vec<&Hyperstack> = self.inputs.iter().map(|input| input.stack).collect();
        Ok(bounds::estimate(
            &stacks,
            &self.scaled_transforms(),
            self.dimensionality,
        ))
    }

    /// Run the fusion, producing the composite.
    ///
    /// # Errors
    ///
    /// - `HyperfuseError::EmptyRequest` if no input was pushed.
    /// - `HyperfuseError::UnsupportedDimensionality` for a target
    ///   dimensionality other than 2 or 3.
    /// - `HyperfuseError::DimensionalityMismatch` if some transform or
    ///   volume does not match the target dimensionality.
    /// - `HyperfuseError::NoninvertibleModel` if some registration model
    ///   cannot be inverted; no composite is returned then.
    pub fn fuse(&self) -> Result<CompositeResult> {
        fuse(self)
    }
}

/// The fused composite and its derived channel layout.
#[derive(Debug, Clone)]
pub struct CompositeResult {
    /// The composite stack, with one channel per input (volume, channel)
    /// pair, in input order.
    pub stack: Hyperstack,
    /// Total number of channels gathered from all inputs.
    pub channels: u32,
    /// Whether the composite carries more than one channel.
    pub composite: bool,
}

/// Fuse all inputs of a request into one composite hyperstack.
///
/// Bounds are estimated once and shared; every (volume, channel) pair is
/// resampled into a fresh output volume on the thread pool; the filled
/// planes are appended in (volume, channel) order with z varying fastest,
/// and for 3D requests the composite is finished with [`switch_zc`] so
/// the channel axis lands in its conventional slot.
///
/// Fusion reads the first frame of each input; later frames are ignored.
///
/// [`switch_zc`]: ./fn.switch_zc.html
pub fn fuse(request: &FusionRequest<'_>) -> Result<CompositeResult> {
    request.validate()?;
    let transforms = request.scaled_transforms();
    let stacks: Vec<&Hyperstack> = request.inputs.iter().map(|input| input.stack).collect();
    let bounds = bounds::estimate(&stacks, &transforms, request.dimensionality);
    let interpolator = LinearInterpolator::new(request.fill_value);

    // one task per (volume, channel), in input order
    let mut tasks = Vec::new();
    for (i, input) in request.inputs.iter().enumerate() {
        for c in 0..input.stack.shape().channels() {
            tasks.push((i, c));
        }
    }

    let fused: Vec<Vec<Arc<Plane>>> = tasks
        .par_iter()
        .map(|&(i, c)| -> Result<Vec<Arc<Plane>>> {
            let input = &request.inputs[i];
            let view = input.stack.channel_view(c, 0)?;
            let planes = resample::fuse_channel(
                &bounds.size,
                &bounds.offset,
                &view,
                &transforms[i],
                request.target_type,
                &interpolator,
            )
            .map_err(|e| match e {
                HyperfuseError::NoninvertibleTransform => {
                    HyperfuseError::NoninvertibleModel(i, c as usize)
                }
                other => other,
            })?;
            Ok(planes
                .into_iter()
                .map(|plane| Arc::new(plane.with_label(input.stack.title())))
                .collect())
        })
        .collect::<Result<_>>()?;

    let total_channels = tasks.len() as u32;
    let planes: Vec<Arc<Plane>> = fused.into_iter().flatten().collect();

    let title = format!(
        "overlay {} ... {}",
        request.inputs[0].stack.title(),
        request.inputs[request.inputs.len() - 1].stack.title()
    );

    let stack = if request.dimensionality == 3 {
        // planes were appended z fastest, so z currently occupies the
        // channel slot of the declared triple
        let depth = bounds.size[2] as u32;
        let shape = StackShape::new(depth, total_channels, 1)?;
        switch_zc(&Hyperstack::new(title, shape, planes)?)
    } else {
        let shape = StackShape::new(total_channels, 1, 1)?;
        Hyperstack::new(title, shape, planes)?
    };

    log::info!(
        "fused {} volumes into {} channels of {:?}",
        request.inputs.len(),
        total_channels,
        bounds.size
    );

    Ok(CompositeResult {
        composite: total_channels > 1,
        channels: total_channels,
        stack,
    })
}

/// Swap the roles of the channel and slice axes of a stack.
///
/// This is the axis reindexer applied with the ZCT assignment. When the
/// declared channel or slice count is 1 the plane order cannot change and
/// the stack passes through untouched.
pub fn switch_zc(stack: &Hyperstack) -> Hyperstack {
    let shape = stack.shape();
    if shape.channels() == 1 || shape.slices() == 1 {
        return stack.clone();
    }
    stack.reordered(&AxisOrder::Zct.assignment())
}
