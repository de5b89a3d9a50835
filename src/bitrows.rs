use std::io::Write;

use crate::{Error, Result};

pub const DEFAULT_ROW_WIDTH: usize = 16;

// ceil(bits / row_width) without overflowing for huge widths
fn rows_for_bits(bits: usize, row_width: usize) -> usize {
    bits / row_width + usize::from(bits % row_width != 0)
}

/// Renders a byte buffer as rows of '0'/'1', MSB first within each byte.
/// The last row holds whatever bits remain and is not padded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitRowFormatter {
    row_width: usize,
}

impl Default for BitRowFormatter {
    fn default() -> Self {
        BitRowFormatter {
            row_width: DEFAULT_ROW_WIDTH,
        }
    }
}

impl BitRowFormatter {
    pub fn new(row_width: usize) -> Result<Self> {
        if row_width == 0 {
            return Err(Error::InvalidRowWidth(row_width));
        }
        Ok(BitRowFormatter { row_width })
    }

    pub fn row_width(&self) -> usize {
        self.row_width
    }

    pub fn row_count(&self, data_len: usize) -> usize {
        rows_for_bits(data_len * 8, self.row_width)
    }

    pub fn rows<'a>(&self, data: &'a [u8]) -> BitRows<'a> {
        BitRows {
            data,
            row_width: self.row_width,
            bit_pos: 0,
        }
    }
}

/// Lazy row iterator. Clone it to walk the same buffer again.
#[derive(Clone, Debug)]
pub struct BitRows<'a> {
    data: &'a [u8],
    row_width: usize,
    bit_pos: usize,
}

impl<'a> BitRows<'a> {
    fn total_bits(&self) -> usize {
        self.data.len() * 8
    }
}

impl<'a> Iterator for BitRows<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let total_bits = self.total_bits();
        if self.bit_pos >= total_bits {
            return None;
        }
        let end = self.bit_pos.saturating_add(self.row_width).min(total_bits);
        let row = (self.bit_pos..end)
            .map(|bit| {
                if (self.data[bit / 8] >> (7 - bit % 8)) & 0x1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect();
        self.bit_pos = end;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining_bits = self.total_bits() - self.bit_pos;
        let n = rows_for_bits(remaining_bits, self.row_width);
        (n, Some(n))
    }
}

impl<'a> ExactSizeIterator for BitRows<'a> {}

impl<'a> std::iter::FusedIterator for BitRows<'a> {}

/// 16-bit rows of `data`.
pub fn format_bit_rows(data: &[u8]) -> Vec<String> {
    BitRowFormatter::default().rows(data).collect()
}

/// Writes one row per line, each terminated by '\n'. Returns the number of rows written.
pub fn write_bit_rows<I, W>(rows: I, writer: &mut W) -> std::io::Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    W: Write,
{
    let mut count = 0;
    for row in rows {
        writer.write_all(row.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    Ok(count)
}
