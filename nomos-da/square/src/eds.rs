// std
// crates
use reed_solomon::{encode_shards, reconstruct_shards};
use serde::{Deserialize, Serialize};
// internal
use crate::header::DataAvailabilityHeader;
use crate::merkle::{Hash, MerkleTree};
use crate::share::Share;
use crate::SquareError;

/// Widest original square supported: GF(2^8) codes top out at 256 shards per line.
pub const MAX_ODS_WIDTH: usize = 128;

/// Row-major `2k x 2k` square. The top-left quadrant holds the original data,
/// the top-right one the row parity of it, the bottom-left one its column parity
/// and the bottom-right one the row parity of the bottom-left quadrant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Share>", into = "Vec<Share>")]
pub struct ExtendedDataSquare {
    width: usize,
    shares: Vec<Share>,
}

fn validate_ods_width(ods_width: usize) -> Result<(), SquareError> {
    if ods_width == 0 || ods_width > MAX_ODS_WIDTH || !ods_width.is_power_of_two() {
        return Err(SquareError::InvalidOdsWidth(ods_width));
    }
    Ok(())
}

fn square_side(count: usize) -> Option<usize> {
    let side = (count as f64).sqrt() as usize;
    (side * side == count).then_some(side)
}

impl ExtendedDataSquare {
    /// Erasure code an original square, given as its row-major shares.
    pub fn extend(ods: Vec<Share>) -> Result<Self, SquareError> {
        let k = square_side(ods.len()).ok_or(SquareError::InvalidShareCount(ods.len()))?;
        validate_ods_width(k)?;
        let width = 2 * k;

        let mut cells: Vec<Vec<u8>> = vec![Vec::new(); width * width];
        for (idx, share) in ods.into_iter().enumerate() {
            cells[(idx / k) * width + idx % k] = share.into_bytes();
        }
        // top right
        for row in 0..k {
            Self::extend_row(&mut cells, width, row)?;
        }
        // bottom left
        for col in 0..k {
            let column: Vec<Vec<u8>> = (0..k)
                .map(|row| cells[row * width + col].clone())
                .collect();
            for (i, parity) in encode_shards(&column)?.into_iter().enumerate() {
                cells[(k + i) * width + col] = parity;
            }
        }
        // bottom right
        for row in k..width {
            Self::extend_row(&mut cells, width, row)?;
        }

        Self::from_shares(
            cells
                .into_iter()
                .map(Share::new)
                .collect::<Result<Vec<_>, _>>()?,
        )
    }

    fn extend_row(cells: &mut [Vec<u8>], width: usize, row: usize) -> Result<(), SquareError> {
        let k = width / 2;
        let start = row * width;
        let parity = encode_shards(&cells[start..start + k])?;
        for (i, share) in parity.into_iter().enumerate() {
            cells[start + k + i] = share;
        }
        Ok(())
    }

    /// Wrap the row-major shares of an already extended square.
    pub fn from_shares(shares: Vec<Share>) -> Result<Self, SquareError> {
        let width =
            square_side(shares.len()).ok_or(SquareError::InvalidShareCount(shares.len()))?;
        if width % 2 != 0 {
            return Err(SquareError::InvalidShareCount(shares.len()));
        }
        validate_ods_width(width / 2)?;
        Ok(Self { width, shares })
    }

    /// Fill in the missing shares of a partially known square, solving every row and
    /// column with at least half of its shares until the square is complete.
    ///
    /// The result is not checked against any commitment, callers must compare its roots
    /// with the ones of the header they expect.
    pub fn repair(width: usize, shares: Vec<Option<Share>>) -> Result<Self, SquareError> {
        if width % 2 != 0 || shares.len() != width * width {
            return Err(SquareError::InvalidShareCount(shares.len()));
        }
        validate_ods_width(width / 2)?;

        let mut cells: Vec<Option<Vec<u8>>> = shares
            .into_iter()
            .map(|share| share.map(Share::into_bytes))
            .collect();
        while cells.iter().any(Option::is_none) {
            let mut progress = false;
            for line in 0..width {
                let row: Vec<usize> = (0..width).map(|col| line * width + col).collect();
                progress |= Self::solve_line(&mut cells, &row)?;
                let column: Vec<usize> = (0..width).map(|row| row * width + line).collect();
                progress |= Self::solve_line(&mut cells, &column)?;
            }
            if !progress {
                return Err(SquareError::Unrepairable);
            }
        }

        Self::from_shares(
            cells
                .into_iter()
                .flatten()
                .map(Share::new)
                .collect::<Result<Vec<_>, _>>()?,
        )
    }

    fn solve_line(cells: &mut [Option<Vec<u8>>], line: &[usize]) -> Result<bool, SquareError> {
        let known = line.iter().filter(|&&idx| cells[idx].is_some()).count();
        if known == line.len() || known < line.len() / 2 {
            return Ok(false);
        }
        let mut shards: Vec<Option<Vec<u8>>> =
            line.iter().map(|&idx| cells[idx].take()).collect();
        reconstruct_shards(line.len() / 2, &mut shards)?;
        for (&idx, shard) in line.iter().zip(shards) {
            cells[idx] = shard;
        }
        Ok(true)
    }

    /// Side of the extended square, `2k`.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Side of the original square, `k`.
    #[must_use]
    pub fn ods_width(&self) -> usize {
        self.width / 2
    }

    #[must_use]
    pub fn share(&self, row: usize, col: usize) -> Option<&Share> {
        if row >= self.width || col >= self.width {
            return None;
        }
        self.shares.get(row * self.width + col)
    }

    #[must_use]
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[Share] {
        &self.shares[row * self.width..(row + 1) * self.width]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &Share> + '_ {
        self.shares.iter().skip(col).step_by(self.width)
    }

    /// Row-major shares of the original square only.
    #[must_use]
    pub fn flattened_ods(&self) -> Vec<Share> {
        let k = self.ods_width();
        (0..k)
            .flat_map(|row| self.row(row)[..k].iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn row_tree(&self, row: usize) -> MerkleTree {
        MerkleTree::from_data(self.row(row))
    }

    #[must_use]
    pub fn row_roots(&self) -> Vec<Hash> {
        (0..self.width).map(|row| self.row_tree(row).root()).collect()
    }

    #[must_use]
    pub fn column_roots(&self) -> Vec<Hash> {
        (0..self.width)
            .map(|col| MerkleTree::from_data(self.column(col)).root())
            .collect()
    }

    #[must_use]
    pub fn data_availability_header(&self) -> DataAvailabilityHeader {
        DataAvailabilityHeader::new(self.row_roots(), self.column_roots())
    }
}

impl TryFrom<Vec<Share>> for ExtendedDataSquare {
    type Error = SquareError;

    fn try_from(shares: Vec<Share>) -> Result<Self, Self::Error> {
        Self::from_shares(shares)
    }
}

impl From<ExtendedDataSquare> for Vec<Share> {
    fn from(eds: ExtendedDataSquare) -> Self {
        eds.shares
    }
}
