use crate::*;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Report {
    pub mode: Mode,
    pub blocks: usize,
    pub bands: usize,
    pub elapsed: Duration,
}
