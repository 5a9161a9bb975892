//! Character-grid images and nearest-neighbour resampling.

/// A rectangular grid of characters. Short lines are padded with spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiArt {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl AsciiArt {
    pub fn parse(source: &str) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        // Drop trailing blank lines so the art hugs its content.
        let end = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);

        let width = lines[..end]
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let rows = lines[..end]
            .iter()
            .map(|l| {
                let mut row: Vec<char> = l.chars().collect();
                row.resize(width, ' ');
                row
            })
            .collect();

        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.rows.is_empty()
    }

    /// Resample to `width` x `height` cells.
    pub fn sample(&self, width: usize, height: usize) -> Vec<String> {
        if self.is_empty() || width == 0 || height == 0 {
            return Vec::new();
        }
        (0..height)
            .map(|y| {
                let src_y = y * self.height() / height;
                (0..width)
                    .map(|x| self.rows[src_y][x * self.width / width])
                    .collect()
            })
            .collect()
    }

    /// Tile the art to fill `width` x `height` cells.
    pub fn tile(&self, width: usize, height: usize) -> Vec<String> {
        if self.is_empty() {
            return vec![" ".repeat(width); height];
        }
        (0..height)
            .map(|y| {
                let row = &self.rows[y % self.height()];
                (0..width).map(|x| row[x % self.width]).collect()
            })
            .collect()
    }
}
