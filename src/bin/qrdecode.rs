use clap::{Parser, Subcommand};
use galois_qr::{read_qr_data, BitMatrix, Decoder};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrdecode", version, about = "QR bit-matrix decoder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a bit-matrix file and print the message
    Decode {
        /// Matrix file: one line per row, '1' or '#' for dark modules
        matrix: PathBuf,
        /// Print per-block error correction details
        #[arg(long)]
        verbose: bool,
    },
    /// Print codeword-level information without decoding the payload
    Inspect {
        /// Matrix file: one line per row, '1' or '#' for dark modules
        matrix: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Decode { matrix, verbose } => run_decode(&matrix, verbose),
        Command::Inspect { matrix } => run_inspect(&matrix),
    }
}

fn load_matrix(path: &PathBuf) -> Result<BitMatrix, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("cannot read {:?}: {}", path, e))?;
    let rows: Vec<Vec<bool>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.chars()
                .map(|ch| match ch {
                    '1' | '#' => Ok(true),
                    '0' | '.' | ' ' => Ok(false),
                    other => Err(format!("unexpected character {:?} in matrix", other)),
                })
                .collect()
        })
        .collect::<Result<_, _>>()?;
    BitMatrix::from_rows(&rows).ok_or_else(|| "matrix rows must form a square".to_string())
}

fn run_decode(path: &PathBuf, verbose: bool) -> ExitCode {
    let matrix = match load_matrix(path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let decoder = match Decoder::new() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match decoder.decode_matrix(&matrix) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !result.correction_successful {
        eprintln!("error correction failed");
        for block in &result.block_results {
            eprintln!(
                "  block {}: {} data + {} ec codewords, {} errors, success={}",
                block.block_index,
                block.num_data_codewords,
                block.num_ec_codewords,
                block.errors_found,
                block.correction_succeeded
            );
        }
        return ExitCode::FAILURE;
    }

    println!("message: {:?}", result.message);
    if result.num_errors_corrected > 0 {
        println!(
            "corrected {} error(s) at positions {:?}",
            result.num_errors_corrected, result.error_positions
        );
    } else {
        println!("no errors detected");
    }
    if verbose {
        for block in &result.block_results {
            println!(
                "block {}: {} data + {} ec codewords, {} errors corrected",
                block.block_index,
                block.num_data_codewords,
                block.num_ec_codewords,
                block.errors_found
            );
        }
    }
    ExitCode::SUCCESS
}

fn run_inspect(path: &PathBuf) -> ExitCode {
    let matrix = match load_matrix(path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let qr_data = match read_qr_data(&matrix) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("version: {}", qr_data.version.number());
    println!("ec level: {}", qr_data.ec_level.letter());
    println!("mask: {}", qr_data.mask.number());
    println!("total codewords: {}", qr_data.raw_codewords.len());
    println!("data codewords: {}", qr_data.data_codewords.len());
    println!("ec codewords: {}", qr_data.ec_codewords.len());
    print!("raw:");
    for (i, byte) in qr_data.raw_codewords.iter().enumerate() {
        if i % 16 == 0 {
            print!("\n  {:04x}:", i);
        }
        print!(" {:02x}", byte);
    }
    println!();
    ExitCode::SUCCESS
}
