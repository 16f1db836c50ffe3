use crate::*;
use std::{str::FromStr, time::Duration};

pub const DEFAULT_WORKERS: usize = 8;

/// Pace used when a human is watching the blocks appear.
pub const VISUALIZATION_PACING: Duration = Duration::from_millis(50);

#[derive(Clone, Debug)]
pub struct Params {
    pub(crate) square_size: u32,
    pub(crate) workers: usize,
    pub(crate) pacing: Duration,
    pub(crate) border: BorderStyle,
}

impl Params {
    pub fn new(square_size: u32) -> Result<Self> {
        if square_size == 0 {
            return Err(Error::InvalidSquareSize(square_size));
        }

        Ok(Self {
            square_size,
            workers: DEFAULT_WORKERS,
            pacing: Duration::ZERO,
            border: BorderStyle::default(),
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidWorkers(workers));
        }

        self.workers = workers;
        Ok(self)
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn visualization(self) -> Self {
        self.with_pacing(VISUALIZATION_PACING)
    }

    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn square_size(&self) -> u32 {
        self.square_size
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub(crate) fn xblocks(&self, width: u32) -> u32 {
        ceil_div(width, self.square_size)
    }

    pub(crate) fn yblocks(&self, height: u32) -> u32 {
        ceil_div(height, self.square_size)
    }

    /// Number of blocks a full pass over a `width` x `height` image touches.
    pub fn block_count(&self, width: u32, height: u32) -> usize {
        (self.xblocks(width) as usize) * (self.yblocks(height) as usize)
    }
}

fn ceil_div(len: u32, square_size: u32) -> u32 {
    len / square_size + (len % square_size != 0) as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Concurrent,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Mode::Sequential),
            "M" => Ok(Mode::Concurrent),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_square_size() {
        assert!(matches!(Params::new(0), Err(Error::InvalidSquareSize(0))));
    }

    #[test]
    fn rejects_zero_workers() {
        let params = Params::new(8).unwrap();
        assert!(matches!(params.with_workers(0), Err(Error::InvalidWorkers(0))));
    }

    #[test]
    fn defaults() {
        let params = Params::new(8).unwrap();
        assert_eq!(params.workers(), DEFAULT_WORKERS);
        assert_eq!(DEFAULT_WORKERS, 8);
        assert_eq!(params.pacing(), Duration::ZERO);
        assert_eq!(params.border(), BorderStyle::Inset);
        assert_eq!(params.visualization().pacing(), VISUALIZATION_PACING);
    }

    #[test]
    fn block_count_rounds_up() {
        let params = Params::new(3).unwrap();
        assert_eq!(params.block_count(7, 7), 9);
        assert_eq!(params.block_count(6, 6), 4);
        assert_eq!(params.block_count(1, 1), 1);

        let params = Params::new(10).unwrap();
        assert_eq!(params.block_count(100, 100), 100);
        assert_eq!(params.block_count(101, 95), 110);
    }

    #[test]
    fn block_count_with_huge_square() {
        let params = Params::new(u32::MAX).unwrap();
        assert_eq!(params.block_count(4, 4), 1);
        assert_eq!(params.block_count(u32::MAX, u32::MAX), 1);
    }

    #[test]
    fn parses_modes_case_insensitively() {
        assert_eq!("S".parse::<Mode>().unwrap(), Mode::Sequential);
        assert_eq!("s".parse::<Mode>().unwrap(), Mode::Sequential);
        assert_eq!("M".parse::<Mode>().unwrap(), Mode::Concurrent);
        assert_eq!("m".parse::<Mode>().unwrap(), Mode::Concurrent);
        assert!(matches!("X".parse::<Mode>(), Err(Error::InvalidMode(_))));
        assert!(matches!("".parse::<Mode>(), Err(Error::InvalidMode(_))));
    }
}
