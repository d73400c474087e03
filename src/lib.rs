use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use threadpool::ThreadPool;

use crate::image::{
    reader::CodecImageReader,
    transformer::{ParallelTransformer, PixelDecoder, SubpixelEncoder, Transformer},
    writer::CodecImageWriter,
    ImageReader, ImageWriter,
};

pub use crate::image::{transformer::SubpixelMode, Image};

pub use cli::CLIParser;
pub use error::Error;

mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    /// Spread every pixel over three subpixel columns.
    ToSubpixel,
    /// Recombine three subpixel columns into one pixel.
    ToPixel,
}

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    direction: Direction,
    subpixel_mode: SubpixelMode,
    number_of_threads: usize,
}

impl Arguments {
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

fn create_transformer(arguments: &Arguments) -> Arc<dyn Transformer> {
    match arguments.direction {
        Direction::ToSubpixel => Arc::new(SubpixelEncoder::new(arguments.subpixel_mode)),
        Direction::ToPixel => Arc::new(PixelDecoder),
    }
}

pub fn convert_image(arguments: &Arguments) -> Result<()> {
    let image = CodecImageReader::new(&arguments.input_file).read_image()?;
    log::info!(
        "Transforming {:?} ({:?}) with {} threads",
        arguments.direction,
        arguments.subpixel_mode,
        arguments.number_of_threads
    );
    let threadpool = ThreadPool::new(arguments.number_of_threads);
    let transformer = ParallelTransformer::new(&threadpool);
    let output_image = transformer.transform(create_transformer(arguments), Arc::new(image))?;
    CodecImageWriter::new(&arguments.output_file).write_image(output_image)?;
    Ok(())
}
