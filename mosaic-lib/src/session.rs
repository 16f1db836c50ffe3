use crate::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// State of a single processing run.
pub struct Session<'a> {
    pub(crate) params: &'a Params,
    pub(crate) observer: &'a dyn Observer,
    pub(crate) cancel: CancelToken,
    processed: AtomicUsize,
}

impl<'a> Session<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self {
            params,
            observer: &NoopObserver,
            cancel: CancelToken::new(),
            processed: AtomicUsize::new(0),
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn Observer) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Averages every block of `img` in place.
    ///
    /// On cancellation the image holds whole blocks only and the error tells
    /// how many were done.
    pub fn run(self, img: &mut RgbImage, mode: Mode) -> Result<Report> {
        let (width, height) = img.dimensions();

        if width == 0 || height == 0 {
            return Err(Error::EmptyImage(width, height));
        }

        match mode {
            Mode::Sequential => sequential::run(&self, img),
            Mode::Concurrent => concurrent::run(&self, img),
        }
    }

    pub(crate) fn record_block(&self) -> usize {
        self.processed.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    pub(crate) fn interrupted(&self, total: usize) -> Error {
        Error::Interrupted {
            processed: self.processed(),
            total,
        }
    }
}
