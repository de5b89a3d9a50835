use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use fbpack::app::{self, ConvertOptions, DumpOptions};
use fbpack::bitrows::DEFAULT_ROW_WIDTH;
use fbpack::imgproc::PixelFormat;

#[derive(Parser, Debug)]
#[command(about = "Pack images into raw framebuffer data, dump binaries as bit rows")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resize an image and pack it into raw RGB pixels
    Convert {
        image_file: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// RGB444 (12-bit, 2 bytes per pixel), RGB332 (8-bit) or any RGBxyz
        #[arg(short, long, default_value = "RGB444")]
        format: PixelFormat,

        #[arg(long, default_value_t = 640)]
        width: u32,

        #[arg(long, default_value_t = 480)]
        height: u32,
    },
    /// List a binary file as rows of bits, MSB first
    Dump {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = DEFAULT_ROW_WIDTH)]
        row_width: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();

    match args.command {
        Command::Convert {
            image_file,
            output,
            format,
            width,
            height,
        } => {
            let options = ConvertOptions {
                input: image_file,
                output,
                size: (width, height).into(),
                format,
            };
            app::convert_image(&options)
                .with_context(|| format!("Converting {}", options.input.display()))?;
        }
        Command::Dump {
            input,
            output,
            row_width,
        } => {
            let options = DumpOptions {
                input,
                output,
                row_width,
            };
            app::dump_bit_rows(&options)
                .with_context(|| format!("Dumping {}", options.input.display()))?;
        }
    }

    Ok(())
}
