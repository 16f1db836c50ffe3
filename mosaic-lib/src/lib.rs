mod block;
mod cancel;
mod concurrent;
mod error;
mod observer;
mod params;
mod region;
mod sequential;
mod session;
mod source;
mod stats;

pub use ::image::{Rgb, RgbImage};

pub use self::{
    block::*, cancel::*, error::*, observer::*, params::*, region::*, session::*, source::*,
    stats::*,
};
