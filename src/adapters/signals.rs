//! Cross-task boolean signals.
//!
//! The camera stream server and the face detector live outside this
//! crate.  Each owns a clone of one flag and publishes a boolean the
//! station consumes: "a viewer holds the
//! stream" and "a face is in frame".  [`SharedFlag`] is the handle both
//! sides hold; the station only reads it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::app::ports::{PresenceSensor, ViewerSignal};

/// Clonable flag shared between a producer task and the station.
#[derive(Debug, Clone, Default)]
pub struct SharedFlag(Arc<AtomicBool>);

impl SharedFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl ViewerSignal for SharedFlag {
    fn is_active(&self) -> bool {
        self.get()
    }
}

impl PresenceSensor for SharedFlag {
    fn face_present(&mut self) -> bool {
        self.get()
    }
}
