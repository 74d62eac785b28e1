//! Grid geometry: dimensions, positions, and box extents.
//!
//! Grids are flattened in x-major order: `index = x + y*MX + z*MX*MY`.
//! Every buffer in the workspace (states, potential rows, visited-mask
//! rows) uses this layout.

use crate::error::GridError;

/// A cell position inside a grid.
///
/// Coordinates are `u16` so that BFS frontier records stay at 8 bytes
/// (`value, x, y, z`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Layer.
    pub z: u16,
}

impl Pos {
    /// Construct a position.
    pub const fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }
}

/// Size of a rule's bounding box along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Width.
    pub x: u16,
    /// Height.
    pub y: u16,
    /// Depth.
    pub z: u16,
}

impl Extent {
    /// Construct an extent.
    pub const fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    /// Number of cells covered by the box.
    pub fn volume(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Flat index of a box-local offset.
    pub fn index(&self, dx: u16, dy: u16, dz: u16) -> usize {
        dx as usize + dy as usize * self.x as usize + dz as usize * self.x as usize * self.y as usize
    }

    /// Whether a box-local offset lies inside the box.
    pub fn contains(&self, dx: u16, dy: u16, dz: u16) -> bool {
        dx < self.x && dy < self.y && dz < self.z
    }

    /// Iterate every box-local offset in flat-index order (x fastest).
    pub fn offsets(&self) -> impl Iterator<Item = (u16, u16, u16)> {
        let ext = *self;
        (0..ext.z).flat_map(move |dz| {
            (0..ext.y).flat_map(move |dy| (0..ext.x).map(move |dx| (dx, dy, dz)))
        })
    }
}

/// Dimensions of a 2D or 3D grid (`MX × MY × MZ`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    mx: u16,
    my: u16,
    mz: u16,
}

impl GridDims {
    /// Create grid dimensions.
    ///
    /// Returns `Err(GridError::EmptyDimension)` if any axis is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessel_core::GridDims;
    ///
    /// let dims = GridDims::new(4, 3, 1).unwrap();
    /// assert_eq!(dims.cell_count(), 12);
    /// assert_eq!(dims.index(1, 2, 0), 9);
    /// ```
    pub fn new(mx: u16, my: u16, mz: u16) -> Result<Self, GridError> {
        for (name, value) in [("mx", mx), ("my", my), ("mz", mz)] {
            if value == 0 {
                return Err(GridError::EmptyDimension { name });
            }
        }
        Ok(Self { mx, my, mz })
    }

    /// Create planar (`mz == 1`) dimensions.
    pub fn planar(mx: u16, my: u16) -> Result<Self, GridError> {
        Self::new(mx, my, 1)
    }

    /// Width.
    pub fn mx(&self) -> u16 {
        self.mx
    }

    /// Height.
    pub fn my(&self) -> u16 {
        self.my
    }

    /// Depth.
    pub fn mz(&self) -> u16 {
        self.mz
    }

    /// Whether the grid has a single layer.
    pub fn is_planar(&self) -> bool {
        self.mz == 1
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.mx as usize * self.my as usize * self.mz as usize
    }

    /// Flat index of `(x, y, z)`.
    pub fn index(&self, x: u16, y: u16, z: u16) -> usize {
        let mx = self.mx as usize;
        x as usize + y as usize * mx + z as usize * mx * self.my as usize
    }

    /// Flat index of a [`Pos`].
    pub fn index_of(&self, pos: Pos) -> usize {
        self.index(pos.x, pos.y, pos.z)
    }

    /// Inverse of [`index`](Self::index).
    pub fn pos(&self, index: usize) -> Pos {
        let mx = self.mx as usize;
        let plane = mx * self.my as usize;
        Pos {
            x: (index % mx) as u16,
            y: ((index % plane) / mx) as u16,
            z: (index / plane) as u16,
        }
    }

    /// Whether a box of size `extent` anchored at `(x, y, z)` fits entirely
    /// inside the grid. Anchors may be negative (shifted placements).
    pub fn fits(&self, x: i32, y: i32, z: i32, extent: Extent) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && x + extent.x as i32 <= self.mx as i32
            && y + extent.y as i32 <= self.my as i32
            && z + extent.z as i32 <= self.mz as i32
    }
}
