use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source column/row for every destination pixel.
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }
}

fn nearest(dst_len: usize, src_len: usize) -> Vec<usize> {
    (0..dst_len)
        .map(|d| (d * src_len / dst_len).min(src_len.saturating_sub(1)))
        .collect()
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    ScaleLut {
        src_x: nearest(dst_w, src_w),
        src_y: nearest(dst_h, src_h),
    }
}

/// Parallel nearest-neighbour stretch, one destination row per task.
/// Keeps tile edges hard on HiDPI surfaces.
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.src_y.get(y) else {
            return;
        };
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (d, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *d = src_row[sx];
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_lut_copies() {
        let src: Vec<u32> = (0..6).collect();
        let lut = build_scale_lut(3, 2, 3, 2);
        let mut dst = vec![0; 6];
        blit_nearest_stretch(&mut dst, 3, &src, 3, &lut);
        assert_eq!(dst, src);
    }

    #[test]
    fn doubling_repeats_pixels() {
        let src = vec![1, 2, 3, 4];
        let lut = build_scale_lut(4, 4, 2, 2);
        assert_eq!(lut.dst_size(), (4, 4));
        let mut dst = vec![0; 16];
        blit_nearest_stretch(&mut dst, 4, &src, 2, &lut);
        #[rustfmt::skip]
        let expected = vec![
            1, 1, 2, 2,
            1, 1, 2, 2,
            3, 3, 4, 4,
            3, 3, 4, 4,
        ];
        assert_eq!(dst, expected);
    }

    #[test]
    fn empty_lut_leaves_destination() {
        let mut dst = vec![9; 4];
        blit_nearest_stretch(&mut dst, 2, &[1, 2, 3, 4], 2, &ScaleLut::empty());
        assert_eq!(dst, vec![9; 4]);
    }
}
