/*!
 * The device-parallel backend, compiled in with the `gpu` feature. The
 * interior index space is tiled by fixed-size thread blocks, the launch
 * grid rounds up so it may overhang the array, and every task performs
 * its own bounds check — the standard data-parallel accelerator launch
 * pattern. Blocks execute one after another on the host here, which keeps
 * the backend buildable everywhere while exercising exactly the kernel
 * and launch semantics a device build dispatches.
 */




/// Tasks per block on each axis.
pub const THREAD_BLOCK: [i32; 2] = [8, 8];




/**
 * Run one task per index of a 2-d launch grid covering `shape`. Indexes
 * outside the shape are skipped by the in-kernel bounds check.
 */
pub fn launch<F: FnMut(i32, i32)>(shape: [i32; 2], mut task: F) {
    let grid = [
        (shape[0] + THREAD_BLOCK[0] - 1) / THREAD_BLOCK[0],
        (shape[1] + THREAD_BLOCK[1] - 1) / THREAD_BLOCK[1],
    ];
    for block_i in 0..grid[0] {
        for block_j in 0..grid[1] {
            for thread_i in 0..THREAD_BLOCK[0] {
                for thread_j in 0..THREAD_BLOCK[1] {
                    let i = block_i * THREAD_BLOCK[0] + thread_i;
                    let j = block_j * THREAD_BLOCK[1] + thread_j;
                    if i < shape[0] && j < shape[1] {
                        task(i, j);
                    }
                }
            }
        }
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_covers_a_non_block_multiple_shape_exactly_once() {
        let shape = [13, 5];
        let mut hits = vec![0; (shape[0] * shape[1]) as usize];
        launch(shape, |i, j| hits[(i * shape[1] + j) as usize] += 1);
        assert!(hits.iter().all(|&n| n == 1));
    }
}
