//! Command line interface for the cmpt365 compressor.

use std::fmt::{Display, Formatter};

use clap::Parser;
use log::info;

/// Zip, Unzip, Info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Info,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command line options, parsed by clap.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A lossless huffman compressor for uncompressed BMP images",
    long_about = "Compresses the pixel section of an uncompressed BMP file into a .cmpt365 \
container using a canonical huffman code, and decompresses such containers back into \
standard BMP files. Compression is fully lossless: the decompressed pixel data is \
byte-identical to the original."
)]
pub struct CmpOpts {
    /// File to process
    pub file: String,

    /// Compress the input file into a .cmpt365 container
    #[clap(short = 'z', long = "compress")]
    pub compress: bool,

    /// Decompress a .cmpt365 container back into a BMP file
    #[clap(short = 'd', long = "decompress")]
    pub decompress: bool,

    /// Print the BMP header metadata and exit
    #[clap(short = 'i', long = "info")]
    pub info: bool,

    /// Write output to this path instead of deriving it from the input name
    #[clap(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Overwrite an existing output file
    #[clap(short = 'f', long = "force")]
    pub force: bool,

    /// Suppress noncritical messages
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', parse(from_occurrences))]
    pub verbose: usize,
}

impl CmpOpts {
    /// Which operation to run. Explicit flags win; otherwise the input
    /// extension decides, so `cmpt365 image.cmpt365` just decompresses.
    pub fn op_mode(&self) -> Mode {
        if self.info {
            Mode::Info
        } else if self.decompress {
            Mode::Unzip
        } else if self.compress || !self.file.ends_with(".cmpt365") {
            Mode::Zip
        } else {
            Mode::Unzip
        }
    }

    /// The path the output will be written to.
    pub fn output_path(&self) -> String {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let suffix = match self.op_mode() {
                    Mode::Unzip => ".bmp",
                    _ => ".cmpt365",
                };
                let stem = match self.file.rsplit_once('.') {
                    Some((stem, _)) => stem,
                    None => self.file.as_str(),
                };
                let mut path = stem.to_string();
                path.push_str(suffix);
                path
            }
        }
    }
}

/// Parse the command line and set the log level it asks for.
pub fn cmpopts_init() -> CmpOpts {
    let opts = CmpOpts::parse();

    log::set_max_level(if opts.quiet {
        log::LevelFilter::Error
    } else {
        match opts.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    });

    info!("Operational mode set to {}", opts.op_mode());
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn opts(file: &str) -> CmpOpts {
        CmpOpts {
            file: file.to_string(),
            compress: false,
            decompress: false,
            info: false,
            output: None,
            force: false,
            quiet: false,
            verbose: 0,
        }
    }

    #[test]
    fn mode_follows_the_extension() {
        assert_eq!(opts("image.bmp").op_mode(), Mode::Zip);
        assert_eq!(opts("image.cmpt365").op_mode(), Mode::Unzip);
    }

    #[test]
    fn explicit_flags_override_the_extension() {
        let mut o = opts("image.cmpt365");
        o.compress = true;
        assert_eq!(o.op_mode(), Mode::Zip);
        let mut o = opts("image.bmp");
        o.info = true;
        assert_eq!(o.op_mode(), Mode::Info);
    }

    #[test]
    fn output_path_swaps_the_extension() {
        assert_eq!(opts("pics/image.bmp").output_path(), "pics/image.cmpt365");
        assert_eq!(opts("image.cmpt365").output_path(), "image.bmp");
        // No extension: the suffix is appended.
        assert_eq!(opts("image").output_path(), "image.cmpt365");
    }

    #[test]
    fn explicit_output_wins() {
        let mut o = opts("image.bmp");
        o.output = Some("elsewhere.cmpt365".to_string());
        assert_eq!(o.output_path(), "elsewhere.cmpt365");
    }
}
