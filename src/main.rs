//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use cmpt365::bitmap::parser;
use cmpt365::compression::compress::compress;
use cmpt365::compression::decompress::decompress;
use cmpt365::error::Result;
use cmpt365::tools::cli::{cmpopts_init, CmpOpts, Mode};

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        ColorChoice::AlwaysAnsi,
    )
    .unwrap();

    let opts = cmpopts_init();

    //----- Figure out what we need to do and go do it
    let result = match opts.op_mode() {
        Mode::Zip => compress(&opts),
        Mode::Unzip => decompress(&opts),
        Mode::Info => display_metadata(&opts),
    };

    if let Err(err) = result {
        error!("{}", err);
        return ExitCode::FAILURE;
    }
    info!("Done.\n");
    ExitCode::SUCCESS
}

/// Print the header metadata of a BMP file, the way the compressor sees it.
fn display_metadata(opts: &CmpOpts) -> Result<()> {
    let bmp_bytes = std::fs::read(&opts.file)?;
    let bitmap = parser::parse(&bmp_bytes)?;
    println!("File Size: {}", bitmap.file_size);
    println!("Image Width: {}", bitmap.width);
    println!("Image Height: {}", bitmap.height);
    println!("Bits Per Pixel: {}", bitmap.bits_per_pixel);
    if let Some(table) = &bitmap.colour_table {
        println!("Colour Table: {} entries", table.len() / 4);
    }
    println!("Pixel Data: {} bytes", bitmap.pixel_data.len());
    Ok(())
}
