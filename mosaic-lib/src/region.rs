use log::debug;

/// Rectangle `[x0, x1) x [y0, y1)` in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    /// Block with origin `(x, y)` and side `square_size`, clipped to a
    /// `width` x `height` image.
    pub fn block(x: u32, y: u32, square_size: u32, width: u32, height: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x.saturating_add(square_size).min(width),
            y1: y.saturating_add(square_size).min(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }

    /// Origins of the global block grid owned by this region, row-major.
    ///
    /// A region owns every block whose origin lies inside it; origins are
    /// aligned to multiples of `square_size`, so the block extents may reach
    /// past the region's own bottom edge.
    pub fn block_origins(&self, square_size: u32) -> impl Iterator<Item = (u32, u32)> {
        let step = square_size as usize;
        let first_row = align_up(self.y0, square_size);
        let first_col = align_up(self.x0, square_size);
        let (x1, y1) = (self.x1, self.y1);

        (first_row..y1)
            .step_by(step)
            .flat_map(move |y| (first_col..x1).step_by(step).map(move |x| (x, y)))
    }
}

fn align_up(value: u32, square_size: u32) -> u32 {
    match value % square_size {
        0 => value,
        rem => value.saturating_add(square_size - rem),
    }
}

/// Splits the image height into `workers` full-width bands.
///
/// Every band but the last is `height / workers` rows tall; the last one
/// absorbs the remainder. Leading bands are empty when `height < workers`.
pub fn partition(width: u32, height: u32, workers: usize) -> Vec<Region> {
    let workers = workers.max(1);
    let region_height = height / (workers as u32);

    let bands: Vec<_> = (0..workers as u32)
        .map(|i| {
            let y0 = i * region_height;
            let y1 = if i == workers as u32 - 1 {
                height
            } else {
                (i + 1) * region_height
            };

            Region {
                x0: 0,
                y0,
                x1: width,
                y1,
            }
        })
        .collect();

    debug!(
        "Partitioned {}x{} image into {} bands of {} rows (last: {} rows)",
        width,
        height,
        bands.len(),
        region_height,
        bands.last().map(Region::height).unwrap_or_default()
    );

    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(bands: &[Region], height: u32) {
        let mut next = 0;

        for band in bands {
            assert_eq!(band.y0, next, "gap or overlap at row {}", next);
            assert!(band.y1 >= band.y0);
            next = band.y1;
        }

        assert_eq!(next, height);
    }

    #[test]
    fn test_partition_even() {
        let bands = partition(10, 100, 4);
        assert_eq!(bands.len(), 4);
        assert!(bands.iter().all(|b| b.height() == 25 && b.width() == 10));
        assert_covers(&bands, 100);
    }

    #[test]
    fn test_partition_last_band_absorbs_remainder() {
        let bands = partition(7, 7, 2);
        assert_eq!(bands[0], Region { x0: 0, y0: 0, x1: 7, y1: 3 });
        assert_eq!(bands[1], Region { x0: 0, y0: 3, x1: 7, y1: 7 });
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        let bands = partition(5, 3, 8);
        assert_eq!(bands.len(), 8);
        assert!(bands[..7].iter().all(Region::is_empty));
        assert_eq!(bands[7].height(), 3);
        assert_covers(&bands, 3);
    }

    #[test]
    fn test_partition_totality() {
        for height in 0..40 {
            for workers in 1..10 {
                let bands = partition(3, height, workers);
                assert_eq!(bands.len(), workers);
                assert_covers(&bands, height);
            }
        }
    }

    #[test]
    fn test_block_is_clipped() {
        let block = Region::block(6, 6, 3, 7, 7);
        assert_eq!(block, Region { x0: 6, y0: 6, x1: 7, y1: 7 });
        assert_eq!((block.width(), block.height()), (1, 1));
    }

    #[test]
    fn test_block_origins_row_major() {
        let band = Region { x0: 0, y0: 0, x1: 7, y1: 3 };
        let origins: Vec<_> = band.block_origins(3).collect();
        assert_eq!(origins, vec![(0, 0), (3, 0), (6, 0)]);

        let band = Region { x0: 0, y0: 3, x1: 7, y1: 7 };
        let origins: Vec<_> = band.block_origins(3).collect();
        assert_eq!(
            origins,
            vec![(0, 3), (3, 3), (6, 3), (0, 6), (3, 6), (6, 6)]
        );
    }

    #[test]
    fn test_block_origins_follow_global_grid() {
        // 8 rows, square 3, 2 bands: [0, 4) owns rows 0 and 3, [4, 8) owns 6
        let bands = partition(3, 8, 2);
        let rows: Vec<Vec<u32>> = bands
            .iter()
            .map(|band| band.block_origins(3).map(|(_, y)| y).collect())
            .collect();

        assert_eq!(rows, vec![vec![0, 3], vec![6]]);
    }

    #[test]
    fn test_empty_band_has_no_blocks() {
        let band = Region { x0: 0, y0: 2, x1: 5, y1: 2 };
        assert_eq!(band.block_origins(1).count(), 0);
    }
}
