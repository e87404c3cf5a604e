use std::path::Path;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};

/// Read access to a square matrix of dark/light modules.
///
/// The renderer never owns or mutates the grid; anything that can answer
/// these two queries can be rendered.
pub trait ModuleGrid {
    /// Side length `N` of the grid.
    fn module_count(&self) -> usize;

    /// Whether the module at `(row, col)` is dark. Only called with
    /// `row, col < module_count()`.
    fn is_dark(&self, row: usize, col: usize) -> bool;
}

impl<T: ModuleGrid + ?Sized> ModuleGrid for &T {
    fn module_count(&self) -> usize {
        (**self).module_count()
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        (**self).is_dark(row, col)
    }
}

/// Row-major nested rows. The row count is taken as `N`; cells missing
/// from a short row read as light.
impl ModuleGrid for Vec<Vec<bool>> {
    fn module_count(&self) -> usize {
        self.len()
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        self.get(row).and_then(|cells| cells.get(col)).copied().unwrap_or(false)
    }
}

/// Owned square grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitGrid {
    size: usize,
    cells: Vec<bool>,
}

impl BitGrid {
    /// All-light grid of side `size`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(f(row, col));
            }
        }
        Self { size, cells }
    }

    /// Copy any grid accessor into an owned grid.
    pub fn snapshot<G: ModuleGrid + ?Sized>(grid: &G) -> Self {
        Self::from_fn(grid.module_count(), |row, col| grid.is_dark(row, col))
    }

    /// Parse the text grid format: one line per row, `#`/`1`/`X`/`x` dark,
    /// `.`/`0`/`-`/`_` light. Blank lines and `;` comments are skipped.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let rows: Vec<&str> = rows
            .iter()
            .map(|row| row.as_ref().trim_end_matches(['\r', '\n']))
            .filter(|row| !row.trim().is_empty() && !row.trim_start().starts_with(';'))
            .collect();

        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);

        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size {
                return Err(OutlineError::NotSquare { rows: size, row, len });
            }
            for (col, ch) in line.chars().enumerate() {
                let dark = match ch {
                    '#' | '1' | 'X' | 'x' => true,
                    '.' | '0' | '-' | '_' => false,
                    other => return Err(OutlineError::InvalidCell { ch: other, row, col }),
                };
                cells.push(dark);
            }
        }

        Ok(Self { size, cells })
    }

    /// Parse a whole text document, see [`BitGrid::from_rows`].
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    /// Threshold a grayscale mask into a grid: pixels darker than
    /// `threshold` become dark modules, so a threshold of 0 yields an
    /// all-light grid. One pixel per module.
    pub fn from_luma(image: &GrayImage, threshold: u8) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width != height {
            return Err(OutlineError::NotSquare {
                rows: height as usize,
                row: 0,
                len: width as usize,
            });
        }

        let size = width as usize;
        let Some(cutoff) = threshold.checked_sub(1) else {
            return Ok(Self::new(size));
        };

        // threshold() maps pixels above the cutoff to white
        let binary = imageproc::contrast::threshold(image, cutoff);

        Ok(Self::from_fn(size, |row, col| {
            binary.get_pixel(col as u32, row as u32)[0] == 0
        }))
    }

    /// Read a text grid from disk.
    pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Load an image mask from disk, see [`BitGrid::from_luma`].
    pub fn open_mask<P: AsRef<Path>>(path: P, threshold: u8) -> Result<Self> {
        let image = image::open(path)?.to_luma8();
        Self::from_luma(&image, threshold)
    }

    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        self.cells[row * self.size + col] = dark;
    }

    pub fn dark_count(&self) -> usize {
        self.cells.iter().filter(|&&dark| dark).count()
    }

    /// Render back to the text format, `#` for dark and `.` for light.
    pub fn to_text(&self) -> String {
        self.cells
            .chunks(self.size.max(1))
            .take(self.size)
            .map(|row| row.iter().map(|&dark| if dark { '#' } else { '.' }).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ModuleGrid for BitGrid {
    fn module_count(&self) -> usize {
        self.size
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_parse_text_grid() {
        let grid = BitGrid::parse("; ring\n###\n#.#\n###\n").expect("Should parse");
        assert_eq!(grid.module_count(), 3);
        assert!(grid.is_dark(0, 0));
        assert!(!grid.is_dark(1, 1));
        assert_eq!(grid.dark_count(), 8);
        assert_eq!(grid.to_text(), "###\n#.#\n###");
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = BitGrid::from_rows(&["##", "#"]).unwrap_err();
        assert!(matches!(err, OutlineError::NotSquare { rows: 2, row: 1, len: 1 }));
    }

    #[test]
    fn test_parse_rejects_unknown_cells() {
        let err = BitGrid::from_rows(&["#?", ".."]).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidCell { ch: '?', row: 0, col: 1 }));
    }

    #[test]
    fn test_from_luma_thresholds_dark_pixels() {
        let mut img = GrayImage::from_pixel(4, 4, Luma([255u8]));
        img.put_pixel(1, 2, Luma([0u8]));
        img.put_pixel(3, 0, Luma([127u8]));

        let grid = BitGrid::from_luma(&img, 128).expect("Should threshold");
        assert!(grid.is_dark(2, 1));
        assert!(grid.is_dark(0, 3));
        assert_eq!(grid.dark_count(), 2);
    }

    #[test]
    fn test_from_luma_threshold_bounds() {
        let black = GrayImage::from_pixel(2, 2, Luma([0u8]));
        assert_eq!(BitGrid::from_luma(&black, 0).expect("Should threshold").dark_count(), 0);
        assert_eq!(BitGrid::from_luma(&black, 1).expect("Should threshold").dark_count(), 4);

        let mut img = GrayImage::from_pixel(2, 2, Luma([255u8]));
        img.put_pixel(0, 0, Luma([254u8]));
        let grid = BitGrid::from_luma(&img, 255).expect("Should threshold");
        assert_eq!(grid.to_text(), "#.\n..");
    }

    #[test]
    fn test_from_luma_rejects_non_square() {
        let img = GrayImage::new(4, 3);
        assert!(BitGrid::from_luma(&img, 128).is_err());
    }

    #[test]
    fn test_open_mask_from_png() {
        let path = std::env::temp_dir().join(format!("module_svg_mask_{}.png", std::process::id()));
        let mut img = GrayImage::from_pixel(3, 3, Luma([255u8]));
        img.put_pixel(1, 1, Luma([0u8]));
        img.save(&path).expect("Should save");

        let grid = BitGrid::open_mask(&path, 128).expect("Should load");
        std::fs::remove_file(&path).ok();
        assert_eq!(grid.to_text(), "...\n.#.\n...");
    }

    #[test]
    fn test_nested_vec_accessor() {
        let rows = vec![vec![true, false], vec![false, true]];
        let grid = BitGrid::snapshot(&rows);
        assert_eq!(grid.module_count(), 2);
        assert!(grid.is_dark(1, 1));
        assert!(!grid.is_dark(0, 1));
    }

    #[test]
    fn test_short_rows_read_as_light() {
        let rows = vec![vec![true, true, true], vec![true], vec![]];
        assert!(rows.is_dark(1, 0));
        assert!(!rows.is_dark(1, 2));
        assert!(!rows.is_dark(2, 0));

        let grid = BitGrid::snapshot(&rows);
        assert_eq!(grid.to_text(), "###\n#..\n...");
    }
}
