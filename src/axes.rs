//! Axis reordering of hyperstacks.
//!
//! A hyperstack keeps its planes in channel-fastest order. Reordering
//! builds a new stack whose plane sequence follows a different
//! permutation of the (channel, slice, frame) axes; the planes themselves
//! are shared handles, so no pixel data is copied. The permutation is
//! described by an [`AxisAssignment`], or by one of the six symbolic
//! orders of [`AxisOrder`].
//!
//! [`AxisAssignment`]: ./struct.AxisAssignment.html
//! [`AxisOrder`]: ./enum.AxisOrder.html

use crate::error::{HyperfuseError, Result};
use crate::stack::{Hyperstack, StackShape};
use std::str::FromStr;
use std::sync::Arc;

/// The three non-spatial axes of a hyperstack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRole {
    /// The channel axis, varying fastest in the flat plane order.
    Channel = 0,
    /// The z axis.
    Slice = 1,
    /// The time axis.
    Frame = 2,
}

const ROLES: [AxisRole; 3] = [AxisRole::Channel, AxisRole::Slice, AxisRole::Frame];

/// A bijective remapping of the hyperstack axes.
///
/// For each output axis, in (channels, slices, frames) order, the
/// assignment names the input axis whose extent and planes it takes over.
/// Each input axis must be consumed by exactly one output axis; anything
/// else is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisAssignment {
    /// `source[slot]` is the input axis feeding output slot `slot`.
    source: [AxisRole; 3],
}

impl AxisAssignment {
    /// Validate and create an assignment from the input axis feeding each
    /// output axis.
    ///
    /// # Errors
    ///
    /// - `HyperfuseError::InconsistentMapping` if some input axis is
    ///   consumed twice or not at all; the error carries the occupancy
    ///   count of each input axis.
    pub fn new(
        channels_from: AxisRole,
        slices_from: AxisRole,
        frames_from: AxisRole,
    ) -> Result<Self> {
        let source = [channels_from, slices_from, frames_from];
        let mut counts = [0usize; 3];
        for role in &source {
            counts[*role as usize] += 1;
        }
        if counts != [1, 1, 1] {
            return Err(HyperfuseError::InconsistentMapping(counts));
        }
        Ok(AxisAssignment { source })
    }

    /// The identity assignment, leaving every axis in place.
    pub fn identity() -> Self {
        AxisAssignment { source: ROLES }
    }

    /// The input axis feeding output slot `slot` (0 = channels,
    /// 1 = slices, 2 = frames).
    pub fn source(&self, slot: usize) -> AxisRole {
        self.source[slot]
    }

    /// The assignment undoing this one: applying an assignment and then
    /// its inverse restores the original plane order.
    pub fn inverse(&self) -> Self {
        let mut source = ROLES;
        for (slot, role) in self.source.iter().enumerate() {
            source[*role as usize] = ROLES[slot];
        }
        AxisAssignment { source }
    }
}

/// The six symbolic axis orders. The letters name the input axis landing
/// in the channel, slice and frame slot, in that order, so `Czt` is the
/// identity.
///
/// Parsed case-insensitively from the three-letter names; any other name
/// is rejected with `HyperfuseError::UnknownOrdering`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisOrder {
    /// Channels, slices, frames: the identity order.
    Czt,
    /// Channels keep their slot, slices and frames swap.
    Ctz,
    /// Channels and slices swap, frames keep their slot.
    Zct,
    /// Slices to channels, frames to slices, channels to frames.
    Ztc,
    /// Frames to channels, channels to slices, slices to frames.
    Tcz,
    /// Channels and frames swap, slices keep their slot.
    Tzc,
}

impl AxisOrder {
    /// The assignment this order denotes.
    pub fn assignment(self) -> AxisAssignment {
        use self::AxisRole::*;
        let source = match self {
            AxisOrder::Czt => [Channel, Slice, Frame],
            AxisOrder::Ctz => [Channel, Frame, Slice],
            AxisOrder::Zct => [Slice, Channel, Frame],
            AxisOrder::Ztc => [Slice, Frame, Channel],
            AxisOrder::Tcz => [Frame, Channel, Slice],
            AxisOrder::Tzc => [Frame, Slice, Channel],
        };
        AxisAssignment { source }
    }
}

impl FromStr for AxisOrder {
    type Err = HyperfuseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CZT" => Ok(AxisOrder::Czt),
            "CTZ" => Ok(AxisOrder::Ctz),
            "ZCT" => Ok(AxisOrder::Zct),
            "ZTC" => Ok(AxisOrder::Ztc),
            "TCZ" => Ok(AxisOrder::Tcz),
            "TZC" => Ok(AxisOrder::Tzc),
            _ => Err(HyperfuseError::UnknownOrdering(s.to_owned())),
        }
    }
}

impl Hyperstack {
    /// Build a new hyperstack holding the same planes in the order
    /// dictated by `assignment`.
    ///
    /// Only plane handles move; pixel buffers are shared between the
    /// input and the result, so the input must not be mutated while both
    /// are alive (planes are immutable, making this a non-issue within
    /// this crate). Discarding the input is the caller's drop. Title,
    /// calibration and per-plane labels carry over. A single-plane stack
    /// passes through unchanged, as there is no axis to reorder.
    pub fn reordered(&self, assignment: &AxisAssignment) -> Hyperstack {
        let shape = self.shape();
        if shape.plane_count() == 1 {
            return self.clone();
        }

        let dims = shape.as_array();
        let new_channels = dims[assignment.source(0) as usize];
        let new_slices = dims[assignment.source(1) as usize];
        let new_frames = dims[assignment.source(2) as usize];

        let mut planes = Vec::with_capacity(shape.plane_count());
        // input coordinate vector in (channel, slice, frame) order
        let mut idx = [0u32; 3];
        for t in 0..new_frames {
            for z in 0..new_slices {
                for c in 0..new_channels {
                    idx[assignment.source(0) as usize] = c;
                    idx[assignment.source(1) as usize] = z;
                    idx[assignment.source(2) as usize] = t;
                    let i = shape.stack_index(idx[0], idx[1], idx[2]);
                    planes.push(Arc::clone(&self.planes()[i]));
                }
            }
        }

        let new_shape = StackShape::new(new_channels, new_slices, new_frames)
            .expect("permuted extents stay positive");
        Hyperstack::from_parts(
            self.title().to_owned(),
            self.width(),
            self.height(),
            new_shape,
            self.calibration(),
            self.sample_type(),
            planes,
        )
    }

    /// Reorder using one of the six symbolic axis orders.
    ///
    /// # Errors
    ///
    /// - `HyperfuseError::UnknownOrdering` if `order` is not one of the
    ///   six known names; nothing is reordered in that case.
    pub fn reordered_by_name(&self, order: &str) -> Result<Hyperstack> {
        let order: AxisOrder = order.parse()?;
        Ok(self.reordered(&order.assignment()))
    }
}
