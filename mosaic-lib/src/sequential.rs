use crate::*;
use log::{info, trace};
use std::time::Instant;

pub(crate) fn run(session: &Session<'_>, img: &mut RgbImage) -> Result<Report> {
    let params = session.params;
    let (width, height) = img.dimensions();
    let total = params.block_count(width, height);
    let started = Instant::now();

    info!(
        "Averaging {} blocks of {}px sequentially",
        total, params.square_size
    );

    let whole = Region {
        x0: 0,
        y0: 0,
        x1: width,
        y1: height,
    };

    for (x, y) in whole.block_origins(params.square_size) {
        if session.cancel.is_cancelled() {
            return Err(session.interrupted(total));
        }

        average_block(img, x, y, params.square_size, params.border);
        let done = session.record_block();

        trace!("Block ({}, {}) done ({}/{})", x, y, done, total);

        session.observer.on_block_updated(
            img,
            Region::block(x, y, params.square_size, width, height),
        );

        if session.cancel.pause(params.pacing).is_err() {
            return Err(session.interrupted(total));
        }
    }

    let blocks = session.processed();
    session.observer.on_processing_complete(img, blocks);

    info!("Averaged {} blocks in {:?}", blocks, started.elapsed());

    Ok(Report {
        mode: Mode::Sequential,
        blocks,
        bands: 1,
        elapsed: started.elapsed(),
    })
}
