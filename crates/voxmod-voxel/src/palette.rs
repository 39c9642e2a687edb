//! Indexed color palette shared by every cell of a model.
//!
//! Palette indices are 1-based: cell value `v` refers to `colors[v - 1]` and
//! value 0 means "no voxel". An index stays valid for the whole session once a
//! cell refers to it: only entries past the last referenced index can be
//! removed, through [`crate::VoxelGrid::remove_color`].

use hashbrown::HashMap;
use voxmod_core::constants::MAX_PALETTE_COLORS;
use voxmod_core::{Error, Result, Rgb};

/// Bit-exact lookup key for a color.
///
/// Negative zero is folded into positive zero so that colors comparing equal
/// with `==` also share a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ColorKey([u32; 3]);

impl From<Rgb> for ColorKey {
    fn from(c: Rgb) -> Self {
        Self([
            (c.r + 0.0).to_bits(),
            (c.g + 0.0).to_bits(),
            (c.b + 0.0).to_bits(),
        ])
    }
}

/// Ordered list of at most 254 RGB colors.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgb>,
    lookup: HashMap<ColorKey, u8>,
}

impl Palette {
    /// Create a palette holding a single color.
    pub fn new(first: Rgb) -> Self {
        let mut palette = Self {
            colors: Vec::with_capacity(1),
            lookup: HashMap::new(),
        };
        palette.push(first);
        palette
    }

    /// Build a palette from a list of colors.
    ///
    /// Fails with `InvalidFormat` if the list is empty or longer than 254.
    pub fn from_colors(colors: impl IntoIterator<Item = Rgb>) -> Result<Self> {
        let mut palette = Self {
            colors: Vec::new(),
            lookup: HashMap::new(),
        };
        for color in colors {
            if palette.is_full() {
                return Err(Error::InvalidFormat(format!(
                    "palette holds more than {MAX_PALETTE_COLORS} colors"
                )));
            }
            palette.push(color);
        }
        if palette.colors.is_empty() {
            return Err(Error::InvalidFormat(
                "palette must hold at least one color".to_string(),
            ));
        }
        Ok(palette)
    }

    /// Color at a 1-based index.
    pub fn at(&self, index: usize) -> Result<Rgb> {
        self.get(index).ok_or(Error::InvalidIndex(index))
    }

    /// Color at a 1-based index, or `None` for 0 and indices past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        index
            .checked_sub(1)
            .and_then(|i| self.colors.get(i))
            .copied()
    }

    /// Append a color, returning its index.
    ///
    /// Duplicates are allowed; `find` keeps resolving to the first entry.
    pub fn append(&mut self, color: Rgb) -> Result<u8> {
        if self.is_full() {
            return Err(Error::PaletteFull);
        }
        Ok(self.push(color))
    }

    /// Index of the first entry exactly equal to `color`.
    #[inline]
    pub fn find(&self, color: Rgb) -> Option<u8> {
        self.lookup.get(&ColorKey::from(color)).copied()
    }

    /// Index of `color`, appending it if absent.
    pub fn find_or_append(&mut self, color: Rgb) -> Result<u8> {
        match self.find(color) {
            Some(index) => Ok(index),
            None => self.append(color),
        }
    }

    /// Number of colors (N).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: a palette holds at least one color.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns true if no further color can be appended
    #[inline]
    pub fn is_full(&self) -> bool {
        self.colors.len() >= MAX_PALETTE_COLORS
    }

    /// Colors in index order (entry `i` has index `i + 1`).
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Iterate `(index, color)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Rgb)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .map(|(i, c)| ((i + 1) as u8, *c))
    }

    /// Remove the entry at a 1-based index; later entries move down by one.
    ///
    /// Callers must make sure no cell refers to `index` or a later entry.
    pub(crate) fn remove(&mut self, index: u8) -> Rgb {
        let removed = self.colors.remove(usize::from(index) - 1);
        self.lookup.clear();
        for (i, color) in self.colors.iter().enumerate() {
            self.lookup
                .entry(ColorKey::from(*color))
                .or_insert((i + 1) as u8);
        }
        removed
    }

    fn push(&mut self, color: Rgb) -> u8 {
        self.colors.push(color);
        let index = self.colors.len() as u8;
        self.lookup.entry(ColorKey::from(color)).or_insert(index);
        index
    }
}

impl PartialEq for Palette {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}
