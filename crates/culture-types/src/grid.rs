use crate::error::CultureError;

/// Grid coordinate: one bin index per axis.
pub type Coord = Vec<usize>;

/// Per-axis sizes of an n-dimensional grid.
///
/// Linear order is row-major with the last axis fastest, so walking flat
/// indices `0..len()` visits coordinates lexicographically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridShape {
    dims: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
}

impl GridShape {
    pub fn new(dims: Vec<usize>) -> Result<Self, CultureError> {
        if dims.is_empty() {
            return Err(CultureError::InvalidConfig("grid needs at least one axis"));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(CultureError::ZeroSizedAxis { axis });
        }

        let mut strides = vec![1usize; dims.len()];
        let mut len = 1usize;
        for axis in (0..dims.len()).rev() {
            strides[axis] = len;
            len = len
                .checked_mul(dims[axis])
                .ok_or(CultureError::InvalidConfig("grid has too many bins to index"))?;
        }

        Ok(Self { dims, strides, len })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of grid coordinates. Never zero: construction rejects
    /// an empty axis list and zero-sized axes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a constructed shape; see [`GridShape::len`].
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, coord: &[usize]) -> bool {
        coord.len() == self.dims.len() && coord.iter().zip(&self.dims).all(|(&c, &d)| c < d)
    }

    /// Convert a coordinate to its linear buffer index.
    #[inline]
    pub fn grid_index(&self, coord: &[usize]) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.iter().zip(&self.strides).map(|(c, s)| c * s).sum())
    }

    /// Convert a linear buffer index back to a coordinate.
    #[inline]
    pub fn grid_coords(&self, index: usize) -> Coord {
        self.dims
            .iter()
            .zip(&self.strides)
            .map(|(&d, &s)| (index / s) % d)
            .collect()
    }

    /// `true` when the coordinate has neighbors on both sides of `axis`.
    pub fn is_interior(&self, coord: &[usize], axis: usize) -> bool {
        coord[axis] > 0 && coord[axis] + 1 < self.dims[axis]
    }

    /// Move `coord` by `step` along one axis, or `None` if that leaves the grid.
    pub fn step(&self, coord: &[usize], axis: usize, step: i32) -> Option<Coord> {
        let mut moved = coord.to_vec();
        moved[axis] = shift(coord[axis], step, self.dims[axis])?;
        Some(moved)
    }

    /// Move `coord` by a full offset vector, or `None` if that leaves the grid.
    pub fn offset(&self, coord: &[usize], delta: &[i32]) -> Option<Coord> {
        coord
            .iter()
            .zip(delta)
            .zip(&self.dims)
            .map(|((&c, &d), &size)| shift(c, d, size))
            .collect()
    }

    /// In-bounds Moore neighbors of `coord`, in offset order.
    pub fn moore_neighbors<'a>(&'a self, coord: &'a [usize]) -> impl Iterator<Item = Coord> + 'a {
        moore_offsets(self.ndim()).filter_map(move |delta| self.offset(coord, &delta))
    }

    /// In-bounds von Neumann neighbors of `coord` as `(axis, step, neighbor)`.
    pub fn von_neumann_neighbors<'a>(
        &'a self,
        coord: &'a [usize],
    ) -> impl Iterator<Item = (usize, i32, Coord)> + 'a {
        von_neumann_offsets(self.ndim())
            .filter_map(move |(axis, step)| self.step(coord, axis, step).map(|n| (axis, step, n)))
    }
}

#[inline]
fn shift(value: usize, step: i32, size: usize) -> Option<usize> {
    let moved = value as i64 + step as i64;
    if moved < 0 || moved >= size as i64 {
        return None;
    }
    Some(moved as usize)
}

/// Von Neumann neighborhood: `(axis, step)` for ±1 on every axis.
pub fn von_neumann_offsets(ndim: usize) -> impl Iterator<Item = (usize, i32)> {
    (0..ndim).flat_map(|axis| [(axis, 1), (axis, -1)])
}

/// Moore neighborhood: every vector in `{-1, 0, 1}^ndim` except zero,
/// lexicographic with the last axis fastest.
pub fn moore_offsets(ndim: usize) -> MooreOffsets {
    MooreOffsets {
        ndim,
        next: 0,
        total: 3usize.checked_pow(ndim as u32).unwrap_or(usize::MAX),
    }
}

#[derive(Debug, Clone)]
pub struct MooreOffsets {
    ndim: usize,
    next: usize,
    total: usize,
}

impl Iterator for MooreOffsets {
    type Item = Vec<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.total {
            let mut code = self.next;
            self.next += 1;

            let mut delta = vec![0i32; self.ndim];
            for axis in (0..self.ndim).rev() {
                delta[axis] = (code % 3) as i32 - 1;
                code /= 3;
            }
            if delta.iter().any(|&d| d != 0) {
                return Some(delta);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[usize]) -> GridShape {
        GridShape::new(dims.to_vec()).unwrap()
    }

    #[test]
    fn grid_index_origin() {
        assert_eq!(shape(&[12, 12, 12]).grid_index(&[0, 0, 0]), Some(0));
    }

    #[test]
    fn grid_index_last() {
        let s = shape(&[4, 5, 6]);
        assert_eq!(s.grid_index(&[3, 4, 5]), Some(4 * 5 * 6 - 1));
        assert_eq!(s.len(), 120);
    }

    #[test]
    fn smallest_shape_has_one_coordinate() {
        let s = shape(&[1]);
        assert_eq!(s.len(), 1);
        assert!(!s.is_empty());
    }

    #[test]
    fn grid_index_last_axis_fastest() {
        let s = shape(&[3, 4]);
        assert_eq!(s.grid_index(&[0, 1]), Some(1));
        assert_eq!(s.grid_index(&[1, 0]), Some(4));
    }

    #[test]
    fn grid_roundtrip() {
        let s = shape(&[7, 3, 9]);
        for coord in [[0, 0, 0], [1, 2, 3], [6, 0, 8], [3, 1, 4]] {
            let idx = s.grid_index(&coord).unwrap();
            assert_eq!(s.grid_coords(idx), coord.to_vec(), "roundtrip failed for {coord:?}");
        }
    }

    #[test]
    fn out_of_range_has_no_index() {
        let s = shape(&[10, 10]);
        assert_eq!(s.grid_index(&[10, 0]), None);
        assert_eq!(s.grid_index(&[0]), None, "wrong arity must not index");
    }

    #[test]
    fn zero_sized_axis_rejected() {
        assert_eq!(
            GridShape::new(vec![4, 0, 2]),
            Err(CultureError::ZeroSizedAxis { axis: 1 })
        );
        assert!(GridShape::new(Vec::new()).is_err());
    }

    #[test]
    fn neighbor_offsets_count() {
        for n in 1..=4 {
            assert_eq!(von_neumann_offsets(n).count(), 2 * n);
            assert_eq!(moore_offsets(n).count(), 3usize.pow(n as u32) - 1);
        }
    }

    #[test]
    fn neighbor_offsets_symmetry() {
        let offsets: Vec<_> = von_neumann_offsets(3).collect();
        for &(axis, step) in &offsets {
            assert!(
                offsets.contains(&(axis, -step)),
                "offset ({axis},{step}) has no negation in list"
            );
        }
    }

    #[test]
    fn moore_offsets_exclude_zero_and_are_unique() {
        let offsets: Vec<_> = moore_offsets(3).collect();
        assert!(offsets.iter().all(|d| d.iter().any(|&x| x != 0)));
        let mut sorted = offsets.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), offsets.len());
        assert_eq!(offsets.first(), Some(&vec![-1, -1, -1]));
        assert_eq!(offsets.last(), Some(&vec![1, 1, 1]));
    }

    #[test]
    fn corner_neighbors_stay_in_bounds() {
        let s = shape(&[5, 5]);
        let moore: Vec<_> = s.moore_neighbors(&[0, 0]).collect();
        assert_eq!(moore, vec![vec![0, 1], vec![1, 0], vec![1, 1]]);
        let vn: Vec<_> = s.von_neumann_neighbors(&[0, 4]).map(|(_, _, c)| c).collect();
        assert_eq!(vn, vec![vec![1, 4], vec![0, 3]]);
    }

    #[test]
    fn interior_check_per_axis() {
        let s = shape(&[5, 3]);
        assert!(s.is_interior(&[2, 1], 0));
        assert!(s.is_interior(&[2, 1], 1));
        assert!(!s.is_interior(&[0, 1], 0));
        assert!(!s.is_interior(&[2, 2], 1));
    }

    #[test]
    fn step_off_the_edge_is_none() {
        let s = shape(&[3]);
        assert_eq!(s.step(&[0], 0, -1), None);
        assert_eq!(s.step(&[2], 0, 1), None);
        assert_eq!(s.step(&[1], 0, 1), Some(vec![2]));
    }
}
