use crate::*;
use log::{debug, info, trace, warn};
use std::{
    sync::{mpsc, Mutex},
    time::Instant,
};

/// Message a worker sends once it leaves its band.
#[derive(Debug)]
struct BandDone {
    band: usize,
    blocks: usize,
    stopped: bool,
}

pub(crate) fn run(session: &Session<'_>, img: &mut RgbImage) -> Result<Report> {
    let params = session.params;
    let (width, height) = img.dimensions();
    let total = params.block_count(width, height);
    let started = Instant::now();

    let bands = partition(width, height, params.workers);

    info!(
        "Averaging {} blocks of {}px across {} bands",
        total,
        params.square_size,
        bands.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(bands.len())
        .thread_name(|idx| format!("mosaic-band-{}", idx))
        .build()?;

    let shared = Mutex::new(img);
    let (done_tx, done_rx) = mpsc::channel();

    // Returns once every band task has finished
    pool.scope(|scope| {
        let done_tx = done_tx;

        for (idx, band) in bands.iter().copied().enumerate() {
            let shared = &shared;
            let done_tx = done_tx.clone();

            scope.spawn(move |_| {
                let outcome = process_band(session, shared, idx, band, width, height);

                // The driver keeps the receiver alive for the whole scope
                let _ = done_tx.send(outcome);
            });
        }
    });

    let mut completed = 0;
    let mut stopped = false;

    for outcome in done_rx.try_iter() {
        let outcome = outcome?;

        debug!(
            "Band {} finished: {} blocks{}",
            outcome.band,
            outcome.blocks,
            if outcome.stopped { " (stopped)" } else { "" }
        );

        completed += 1;
        stopped |= outcome.stopped;
    }

    if completed != bands.len() {
        warn!("Only {} of {} bands reported back", completed, bands.len());
        return Err(Error::Poisoned);
    }

    if stopped || session.cancel.is_cancelled() {
        return Err(session.interrupted(total));
    }

    let img = shared.into_inner().map_err(|_| Error::Poisoned)?;
    let blocks = session.processed();

    session.observer.on_processing_complete(img, blocks);

    info!("Averaged {} blocks in {:?}", blocks, started.elapsed());

    Ok(Report {
        mode: Mode::Concurrent,
        blocks,
        bands: bands.len(),
        elapsed: started.elapsed(),
    })
}

fn process_band(
    session: &Session<'_>,
    shared: &Mutex<&mut RgbImage>,
    idx: usize,
    band: Region,
    width: u32,
    height: u32,
) -> Result<BandDone> {
    let params = session.params;
    let mut blocks = 0;

    debug!("Band {} covers rows {}..{}", idx, band.y0, band.y1);

    for (x, y) in band.block_origins(params.square_size) {
        {
            let mut img = shared.lock().map_err(|_| Error::Poisoned)?;

            if session.cancel.is_cancelled() {
                return Ok(BandDone {
                    band: idx,
                    blocks,
                    stopped: true,
                });
            }

            average_block(&mut img, x, y, params.square_size, params.border);
            let done = session.record_block();

            trace!("Band {}: block ({}, {}) done ({} overall)", idx, x, y, done);

            session.observer.on_block_updated(
                &img,
                Region::block(x, y, params.square_size, width, height),
            );
        }

        blocks += 1;

        if session.cancel.pause(params.pacing).is_err() {
            return Ok(BandDone {
                band: idx,
                blocks,
                stopped: true,
            });
        }
    }

    Ok(BandDone {
        band: idx,
        blocks,
        stopped: false,
    })
}
