//! Collaborators provided by the host environment.
//!
//! [`Viewport`] reports the dimensions cursor positions are normalized against, and
//! [`CaptureTarget`] is an element which the pointer can be locked to. Both are queried on
//! demand, as dimensions may change between reads.
use std::{cell::Cell, rc::Rc, sync::Arc};

use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TargetId;

/// Provides the current size of the viewport in pixels.
pub trait Viewport {
    fn size(&self) -> Vec2;
}

/// A fixed size viewport
impl Viewport for Vec2 {
    fn size(&self) -> Vec2 {
        *self
    }
}

impl Viewport for Cell<Vec2> {
    fn size(&self) -> Vec2 {
        self.get()
    }
}

impl<T: Viewport + ?Sized> Viewport for Rc<T> {
    fn size(&self) -> Vec2 {
        (**self).size()
    }
}

impl<T: Viewport + ?Sized> Viewport for Arc<T> {
    fn size(&self) -> Vec2 {
        (**self).size()
    }
}

/// The ways in which a host can capture the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaptureMode {
    /// The cursor is hidden and held in place, only relative motion is reported
    Locked,
    /// The cursor is kept inside the target
    Confined,
}

impl CaptureMode {
    /// Modes in the order they are probed when binding a target
    pub const PREFERENCE: [CaptureMode; 2] = [CaptureMode::Locked, CaptureMode::Confined];
}

/// An element which the pointer can be captured to.
pub trait CaptureTarget {
    fn id(&self) -> TargetId;
    /// Current rendered size of the target in pixels
    fn rendered_size(&self) -> Vec2;
    fn supports(&self, mode: CaptureMode) -> bool;
    fn capture(&self, mode: CaptureMode) -> anyhow::Result<()>;
    fn release(&self) -> anyhow::Result<()>;
}

impl<T: CaptureTarget + ?Sized> CaptureTarget for Rc<T> {
    fn id(&self) -> TargetId {
        (**self).id()
    }

    fn rendered_size(&self) -> Vec2 {
        (**self).rendered_size()
    }

    fn supports(&self, mode: CaptureMode) -> bool {
        (**self).supports(mode)
    }

    fn capture(&self, mode: CaptureMode) -> anyhow::Result<()> {
        (**self).capture(mode)
    }

    fn release(&self) -> anyhow::Result<()> {
        (**self).release()
    }
}

impl<T: CaptureTarget + ?Sized> CaptureTarget for Arc<T> {
    fn id(&self) -> TargetId {
        (**self).id()
    }

    fn rendered_size(&self) -> Vec2 {
        (**self).rendered_size()
    }

    fn supports(&self, mode: CaptureMode) -> bool {
        (**self).supports(mode)
    }

    fn capture(&self, mode: CaptureMode) -> anyhow::Result<()> {
        (**self).capture(mode)
    }

    fn release(&self) -> anyhow::Result<()> {
        (**self).release()
    }
}

/// A capture target together with the capture mode resolved for it.
pub struct BoundTarget {
    target: Box<dyn CaptureTarget>,
    mode: Option<CaptureMode>,
}

impl BoundTarget {
    /// Binds `target`, picking the first supported mode of [`CaptureMode::PREFERENCE`].
    pub fn bind(target: impl 'static + CaptureTarget) -> Self {
        let mode = CaptureMode::PREFERENCE
            .into_iter()
            .find(|&mode| target.supports(mode));

        match mode {
            Some(mode) => tracing::debug!(target_id = target.id().0, ?mode, "resolved capture mode"),
            None => tracing::debug!(
                target_id = target.id().0,
                "target does not support capturing, lock requests are ignored"
            ),
        }

        Self {
            target: Box::new(target),
            mode,
        }
    }

    pub fn id(&self) -> TargetId {
        self.target.id()
    }

    pub fn rendered_size(&self) -> Vec2 {
        self.target.rendered_size()
    }

    pub fn mode(&self) -> Option<CaptureMode> {
        self.mode
    }

    pub fn lock(&self) -> anyhow::Result<()> {
        match self.mode {
            Some(mode) => self.target.capture(mode),
            None => Ok(()),
        }
    }

    pub fn unlock(&self) -> anyhow::Result<()> {
        match self.mode {
            Some(_) => self.target.release(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for BoundTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundTarget")
            .field("id", &self.id())
            .field("mode", &self.mode)
            .finish()
    }
}
