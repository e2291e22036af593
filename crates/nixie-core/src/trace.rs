//! Structured invocation traces
//!
//! TigerStyle: Typed boundary markers instead of formatted stack text.
//!
//! A failure that classification may inspect carries a [`Trace`]: the ordered
//! frames between its raise point and the dispatch boundary, innermost first.
//! Frames are produced by the machinery itself - the miss handler records a
//! [`Frame::MissHandler`] at the raise point, callee methods record
//! [`Frame::Method`] frames as the failure surfaces through them, and the
//! dispatcher stamps [`Frame::Boundary`] when the failure crosses back out.

use crate::constants::TRACE_FRAMES_COUNT_MAX;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Frame
// =============================================================================

/// One frame of an invocation trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// The dispatch boundary: the frame performing the generic invocation of
    /// the requested method.
    ///
    /// The dispatcher is the only producer of this marker, so it also stands
    /// for frames belonging to the dispatch component itself.
    Boundary,
    /// The dynamic-dispatch miss handler: produced exactly when resolving a
    /// requested method fails at the point of invocation.
    MissHandler,
    /// A named method legitimately executing.
    Method(String),
}

impl Frame {
    /// Create a named method frame
    pub fn method(name: impl Into<String>) -> Self {
        Frame::Method(name.into())
    }

    /// Check whether this is the method frame for `name`
    pub fn is_method(&self, name: &str) -> bool {
        matches!(self, Frame::Method(m) if m == name)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Boundary => write!(f, "<boundary>"),
            Frame::MissHandler => write!(f, "<miss-handler>"),
            Frame::Method(name) => write!(f, "{}", name),
        }
    }
}

// =============================================================================
// Trace
// =============================================================================

/// Ordered sequence of frames, innermost first
///
/// Frames accumulate outward: the raise point is frame 0 and each enclosing
/// frame is pushed after it while the failure surfaces toward the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    frames: Vec<Frame>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trace from frames ordered innermost first
    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Self {
        let frames: Vec<Frame> = frames.into_iter().collect();
        debug_assert!(
            frames.len() <= TRACE_FRAMES_COUNT_MAX,
            "trace exceeds TRACE_FRAMES_COUNT_MAX"
        );
        Self { frames }
    }

    /// Append an outer frame (toward the caller)
    pub fn push_outer(&mut self, frame: Frame) {
        debug_assert!(
            self.frames.len() < TRACE_FRAMES_COUNT_MAX,
            "trace exceeds TRACE_FRAMES_COUNT_MAX"
        );
        self.frames.push(frame);
    }

    /// Get the frame at `index`, counting from the raise point
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames, innermost first
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate frames innermost to outermost
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check whether the trace has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                write!(f, " <- ")?;
            }
            write!(f, "{}", frame)?;
        }
        Ok(())
    }
}
