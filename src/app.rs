use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::bitrows::{write_bit_rows, BitRowFormatter};
use super::image::{convert, Size};
use super::imgproc::{pack_pixels_into, PixelFormat};
use super::{Error, Result};

/// Image to framebuffer conversion.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// the image is resampled to exactly this size before packing
    pub size: Size,
    pub format: PixelFormat,
}

/// Binary file to bit-row listing.
#[derive(Clone, Debug)]
pub struct DumpOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub row_width: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertSummary {
    pub pixels: usize,
    pub bytes_written: usize,
    pub format: PixelFormat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpSummary {
    pub bytes_read: usize,
    pub rows_written: usize,
}

pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => Error::SourceNotFound(path.to_path_buf()),
        _ => Error::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}

pub fn write_sink(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn convert_image(options: &ConvertOptions) -> Result<ConvertSummary> {
    let t_start = std::time::Instant::now();

    let encoded = read_source(&options.input)?;
    let t_read = std::time::Instant::now();

    let img = convert::decode_resized(&encoded, &options.input, options.size)?;
    drop(encoded);
    let t_decoded = std::time::Instant::now();

    let mut packed = Vec::new();
    pack_pixels_into(img.pixels(), &options.format, &mut packed);
    let t_packed = std::time::Instant::now();

    write_sink(&options.output, &packed)?;

    debug!(
        "Converted {} ({}). Cost: read: {:?}, decode: {:?}, pack: {:?}, write: {:?}",
        options.input.display(),
        img.size(),
        t_read - t_start,
        t_decoded - t_read,
        t_packed - t_decoded,
        t_packed.elapsed()
    );
    info!(
        "Raw {} data ({} bytes) written to {}",
        options.format,
        packed.len(),
        options.output.display()
    );

    Ok(ConvertSummary {
        pixels: img.pixels().len(),
        bytes_written: packed.len(),
        format: options.format,
    })
}

pub fn dump_bit_rows(options: &DumpOptions) -> Result<DumpSummary> {
    let formatter = BitRowFormatter::new(options.row_width)?;
    let data = read_source(&options.input)?;

    let write_error = |source| Error::Write {
        path: options.output.clone(),
        source,
    };
    let file = std::fs::File::create(&options.output).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    let rows_written = write_bit_rows(formatter.rows(&data), &mut writer).map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    info!(
        "{} bytes as {} rows of {} bits written to {}",
        data.len(),
        rows_written,
        formatter.row_width(),
        options.output.display()
    );

    Ok(DumpSummary {
        bytes_read: data.len(),
        rows_written,
    })
}
