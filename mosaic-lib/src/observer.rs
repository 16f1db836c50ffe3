use crate::*;

/// Presentation side of a processing run.
///
/// Both callbacks run while the image is locked against other workers, so
/// the buffer they see is never mid-block. Implementations should return
/// quickly: every other worker waits on them.
pub trait Observer: Sync {
    fn on_block_updated(&self, _img: &RgbImage, _block: Region) {}

    fn on_processing_complete(&self, _img: &RgbImage, _blocks: usize) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
