use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contact_image_store::models::{Config, ImageUpload, ObjectKey};
use contact_image_store::ImageGateway;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "contact-image-store")]
#[command(about = "Store and serve contact images in S3")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload an image for a contact and print where it is served from.
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Contact the image belongs to.
        #[arg(long = "contact")]
        contact_id: String,
        /// Content type to store; sniffed from the file when omitted.
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print a time-limited signed URL for a stored image.
    Presign {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Delete a stored image.
    Delete {
        #[arg(value_name = "KEY")]
        key: String,
    },
}

fn read_upload(path: &Path, content_type: Option<String>) -> Result<ImageUpload> {
    let upload =
        ImageUpload::from_path(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(match content_type {
        Some(content_type) => upload.with_content_type(content_type),
        None => upload,
    })
}

async fn run(gateway: &ImageGateway, command: Command) -> Result<()> {
    match command {
        Command::Upload {
            file,
            contact_id,
            content_type,
        } => {
            let upload = read_upload(&file, content_type)?;
            let uploaded = gateway.upload_image(upload, &contact_id).await?;
            println!("{}", uploaded.to_json()?);
        }
        Command::Presign { key, minutes } => {
            let key = ObjectKey::parse(key)?;
            let presigned = gateway.generate_presigned_url(&key, minutes).await?;
            println!("{}", presigned.to_json()?);
        }
        Command::Delete { key } => {
            let key = ObjectKey::parse(key)?;
            gateway.delete(&key).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_image_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let gateway = match Config::from_env() {
        Ok(config) => ImageGateway::new(&config).await,
        Err(e) => Err(e),
    };

    match gateway {
        Ok(gateway) => match run(&gateway, args.command).await {
            Ok(_) => {
                info!("Done");
                Ok(())
            }
            Err(e) => {
                error!("Command failed: {:#}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize gateway: {}", e);
            std::process::exit(1);
        }
    }
}
