use serde::{Serialize, Deserialize};




/**
 * A dense rectangular block of zones, each holding `num_fields` scalars.
 * Zones are stored row-major (the i-axis is the slow one) with the fields
 * contiguous at the innermost position. The lower index corner may be
 * negative: a primitive array with two guard layers on a mesh of ni x nj
 * zones starts at [-2, -2] and counts [ni + 4, nj + 4].
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct Patch {

    /// Lower corner of the index space covered by this patch
    start: [i32; 2],

    /// Number of zones covered on each axis
    count: [i32; 2],

    /// Number of scalar fields per zone
    num_fields: usize,

    /// Backing buffer, length `count[0] * count[1] * num_fields`
    data: Vec<f64>,
}




// ============================================================================
impl Patch {

    /**
     * Create a zero-filled patch over the given index extent.
     */
    pub fn zeros(start: [i32; 2], count: [u32; 2], num_fields: usize) -> Self {
        let data = vec![0.0; count[0] as usize * count[1] as usize * num_fields];
        Self {
            start,
            count: [count[0] as i32, count[1] as i32],
            num_fields,
            data,
        }
    }

    /**
     * Adopt an existing buffer, which must have exactly one zone's worth of
     * fields for each covered index.
     */
    pub fn from_vec(start: [i32; 2], count: [u32; 2], num_fields: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), count[0] as usize * count[1] as usize * num_fields);
        Self {
            start,
            count: [count[0] as i32, count[1] as i32],
            num_fields,
            data,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn start(&self) -> [i32; 2] {
        self.start
    }

    pub fn count(&self) -> [i32; 2] {
        self.count
    }

    pub fn num_fields(&self) -> usize {
        self.num_fields
    }

    pub fn contains(&self, i: i32, j: i32) -> bool {
        i >= self.start[0] && i < self.start[0] + self.count[0] &&
        j >= self.start[1] && j < self.start[1] + self.count[1]
    }

    fn index(&self, i: i32, j: i32) -> usize {
        debug_assert!(self.contains(i, j));
        let di = (i - self.start[0]) as usize;
        let dj = (j - self.start[1]) as usize;
        (di * self.count[1] as usize + dj) * self.num_fields
    }

    /// The fields of a single zone.
    pub fn get(&self, i: i32, j: i32) -> &[f64] {
        let n = self.index(i, j);
        &self.data[n..n + self.num_fields]
    }

    /// Mutable access to the fields of a single zone.
    pub fn get_mut(&mut self, i: i32, j: i32) -> &mut [f64] {
        let n = self.index(i, j);
        &mut self.data[n..n + self.num_fields]
    }

    /// Copy all fields of one zone onto another zone of the same patch.
    pub fn copy_zone(&mut self, source: (i32, i32), target: (i32, i32)) {
        let s = self.index(source.0, source.1);
        let t = self.index(target.0, target.1);
        let n = self.num_fields;
        self.data.copy_within(s..s + n, t);
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}




// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_respects_a_negative_lower_corner() {
        let mut patch = Patch::zeros([-2, -2], [8, 6], 3);
        patch.get_mut(-2, -2)[0] = 1.0;
        patch.get_mut(5, 3)[2] = 2.0;
        assert_eq!(patch.get(-2, -2), &[1.0, 0.0, 0.0]);
        assert_eq!(patch.get(5, 3), &[0.0, 0.0, 2.0]);
        assert_eq!(patch.data()[0], 1.0);
        assert_eq!(*patch.data().last().unwrap(), 2.0);
    }

    #[test]
    fn fields_are_contiguous_and_rows_are_slow() {
        let data: Vec<f64> = (0..2 * 3 * 2).map(|n| n as f64).collect();
        let patch = Patch::from_vec([0, 0], [2, 3], 2, data);
        assert_eq!(patch.get(0, 0), &[0.0, 1.0]);
        assert_eq!(patch.get(0, 1), &[2.0, 3.0]);
        assert_eq!(patch.get(1, 0), &[6.0, 7.0]);
    }

    #[test]
    fn copy_zone_moves_all_fields() {
        let data: Vec<f64> = (0..4 * 4 * 2).map(|n| n as f64).collect();
        let mut patch = Patch::from_vec([-1, -1], [4, 4], 2, data);
        patch.copy_zone((2, 2), (-1, -1));
        assert_eq!(patch.get(-1, -1), patch.get(2, 2));
    }
}
