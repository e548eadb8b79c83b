//! # Stampa CLI
//!
//! Command-line interface for petition sheet generation.
//!
//! ## Usage
//!
//! ```bash
//! # Generate one sheet straight to a file
//! stampa generate --source ./config --target "Jane Doe" \
//!     --name "Ann Example" --id-number A123456789 \
//!     --birth-date 1990-01-01 --address "12 Example Road" \
//!     --out petition.pdf
//!
//! # Start the HTTP server with the embedded frontend
//! stampa serve --listen 0.0.0.0:8080 --source ./config
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stampa::FormData;
use stampa::error::StampaError;
use stampa::pipeline::{GenerationRequest, Pipeline, PipelineState};
use stampa::server::{ServerConfig, open_source, serve};
use stampa::typeface::Typeface;

/// Stampa - petition sheet generator
#[derive(Parser, Debug)]
#[command(name = "stampa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one petition sheet PDF and write it to a file
    Generate {
        /// Directory or URL holding template-config.json, data.json and templates
        #[arg(long, default_value = "config")]
        source: String,

        /// Target name as listed in the directory
        #[arg(long)]
        target: String,

        /// Signer name
        #[arg(long, default_value = "")]
        name: String,

        /// Signer id number
        #[arg(long, default_value = "")]
        id_number: String,

        /// Signer birth date
        #[arg(long, default_value = "")]
        birth_date: String,

        /// Signer address
        #[arg(long, default_value = "")]
        address: String,

        /// TTF font for overlay text (defaults to a system face)
        #[arg(long)]
        font: Option<PathBuf>,

        /// Output file
        #[arg(long, short, default_value = "petition.pdf")]
        out: PathBuf,
    },
    /// Start the HTTP server with the embedded frontend
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory or URL holding template-config.json, data.json and templates
        #[arg(long, default_value = "config")]
        source: String,

        /// TTF font for overlay text (defaults to a system face)
        #[arg(long)]
        font: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StampaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            target,
            name,
            id_number,
            birth_date,
            address,
            font,
            out,
        } => {
            let source = open_source(&source)?;
            let face = Typeface::load_or_system(font.as_deref())?;
            let pipeline = Pipeline::new(source, face);

            let request = GenerationRequest {
                target,
                form: FormData {
                    name,
                    id_number,
                    birth_date,
                    address,
                },
            };

            let document = pipeline
                .generate_observed(&request, |state| {
                    let label = match state {
                        PipelineState::ResolvingConfig => "resolving template configuration",
                        PipelineState::LoadingImage => "loading template image",
                        PipelineState::Composing => "composing sheet",
                        PipelineState::Assembling => "assembling PDF",
                        PipelineState::Ready => "done",
                        _ => return,
                    };
                    println!("[pipeline] {label}");
                })
                .await?;

            std::fs::write(&out, &document.pdf)?;
            let (w, h) = document.raster_size;
            println!(
                "Wrote {} ({}x{} raster at scale {:.3}, {:.1}x{:.1} mm on the page)",
                out.display(),
                w,
                h,
                document.placement.scale,
                document.placement.width,
                document.placement.height,
            );
            Ok(())
        }
        Commands::Serve {
            listen,
            source,
            font,
        } => {
            serve(ServerConfig {
                listen_addr: listen,
                source,
                font_path: font,
            })
            .await
        }
    }
}
