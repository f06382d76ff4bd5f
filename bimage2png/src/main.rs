use std::path::{Path, PathBuf};
use std::process::ExitCode;

use argh::FromArgs;
use log::{error, info, Level};
use thiserror::Error;

use bimage::{BimageHeader, ConvertBimageError, ImageFormat};

/// Convert BC1 and BC3 bimage textures to PNG.
#[derive(FromArgs)]
struct Cli {
    /// directory for the PNG files instead of next to each input file
    #[argh(option)]
    output_dir: Option<PathBuf>,

    /// log debug information
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// the .bimage files to convert
    #[argh(positional)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Error)]
enum ConvertFileError {
    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),

    #[error("error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Convert(#[from] ConvertBimageError),
}

fn main() -> ExitCode {
    let cli: Cli = argh::from_env();

    let level = if cli.verbose {
        Level::Debug
    } else {
        Level::Info
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("failed to initialize logger: {e}");
    }

    if cli.inputs.is_empty() {
        error!("No files provided. Pass one or more .bimage files to convert.");
        return ExitCode::FAILURE;
    }

    if let Some(output_dir) = &cli.output_dir {
        if let Err(e) = std::fs::create_dir_all(output_dir) {
            error!("Error creating {}: {e}", output_dir.display());
            return ExitCode::FAILURE;
        }
    }

    // Each file is converted independently, so one failure does not stop the batch.
    let mut success_count = 0;
    for input in &cli.inputs {
        let output = output_path(input, cli.output_dir.as_deref());
        match convert_file(input, &output) {
            Ok(()) => success_count += 1,
            Err(e) => error!("Error processing {}: {e}", input.display()),
        }
    }

    info!(
        "Completed: {success_count}/{} files converted successfully",
        cli.inputs.len()
    );

    if success_count == cli.inputs.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn convert_file(input: &Path, output: &Path) -> Result<(), ConvertFileError> {
    if !input.is_file() {
        return Err(ConvertFileError::NotAFile(input.to_path_buf()));
    }

    info!("Processing: {}", input.display());
    let bytes = std::fs::read(input).map_err(|source| ConvertFileError::Io {
        path: input.to_path_buf(),
        source,
    })?;

    if let Ok((header, data)) = BimageHeader::read(&bytes) {
        info!("Dimensions: {}x{}", header.width, header.height);
        match ImageFormat::try_from(header.format_code) {
            Ok(format) => info!("Format: {format:?} ({} bytes)", data.len()),
            Err(_) => info!("Format: unknown {:#04X}", header.format_code),
        }
    }

    // Only create the output file once the entire PNG is in memory.
    let png = bimage::png_from_bimage(&bytes)?;
    std::fs::write(output, png).map_err(|source| ConvertFileError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    info!("Saved: {}", output.display());
    Ok(())
}

fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let png_path = input.with_extension("png");
    match (output_dir, png_path.file_name()) {
        (Some(dir), Some(file_name)) => dir.join(file_name),
        _ => png_path,
    }
}
