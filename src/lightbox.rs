//! Gallery lightbox state.
//!
//! The lightbox is either closed or showing exactly one image out of a fixed
//! list. Stepping wraps around in both directions:
//!
//! ```text
//! Closed ──open(i)──> Open(i) ──next──> Open((i + 1) mod N)
//!   ^                    │     ──previous──> Open((i + N - 1) mod N)
//!   └──────close─────────┘
//! ```
//!
//! The generator walks these transitions to wire each overlay's previous and
//! next links, so the static page and this type agree on the order.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LightboxError {
    #[error("image {index} is out of range for a gallery of {len}")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Closed,
    Open(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    selection: Selection,
}

impl Lightbox {
    /// A closed lightbox over `len` images.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            selection: Selection::Closed,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Index of the image on screen, if any.
    pub fn current(&self) -> Option<usize> {
        match self.selection {
            Selection::Open(i) => Some(i),
            Selection::Closed => None,
        }
    }

    /// Show image `index`, replacing whatever was shown before.
    pub fn open(&mut self, index: usize) -> Result<(), LightboxError> {
        if index >= self.len {
            return Err(LightboxError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.selection = Selection::Open(index);
        Ok(())
    }

    /// Step forward, wrapping from the last image to the first. No-op when closed.
    pub fn next(&mut self) {
        if let Selection::Open(i) = self.selection {
            self.selection = Selection::Open((i + 1) % self.len);
        }
    }

    /// Step back, wrapping from the first image to the last. No-op when closed.
    pub fn previous(&mut self) {
        if let Selection::Open(i) = self.selection {
            self.selection = Selection::Open((i + self.len - 1) % self.len);
        }
    }

    pub fn close(&mut self) {
        self.selection = Selection::Closed;
    }

    /// Neighbours of `index` as `(previous, next)`.
    pub fn neighbours(&self, index: usize) -> Result<(usize, usize), LightboxError> {
        let mut probe = Lightbox::new(self.len);
        probe.open(index)?;
        probe.previous();
        let prev = probe.current().unwrap_or(index);
        probe.open(index)?;
        probe.next();
        let next = probe.current().unwrap_or(index);
        Ok((prev, next))
    }
}
