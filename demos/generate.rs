use markitbrand::{
    encoding, logger, GeminiClient, GeminiConfig, GenerationParams, Logo, PackageTier, Session,
    SessionState,
};
use std::env;
use std::path::PathBuf;
use std::process;

const USAGE: &str =
    "usage: cargo run --example generate -- <brand name> <tagline> [style] [Basic|Pro|Premium] [logo path] [output dir]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    logger::init()?;

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        println!("{USAGE}");
        process::exit(1);
    }

    let mut params = GenerationParams::new(&args[0], &args[1]);
    if let Some(style) = args.get(2) {
        params = params.with_style(style);
    }
    if let Some(tier) = args.get(3) {
        params = params.with_package(tier.parse::<PackageTier>()?);
    }
    if let Some(path) = args.get(4) {
        match encoding::guess_mime_type(path) {
            Some(mime_type) => {
                let data = encoding::file_to_base64(path).await?;
                params = params.with_optional_logo(Logo::new(data, mime_type));
            }
            None => log::warn!("Skipping logo {}: unknown image type", path),
        }
    }
    let out_dir = PathBuf::from(args.get(5).map(String::as_str).unwrap_or("."));

    let client = GeminiClient::new(GeminiConfig::from_env())?;
    let generator = client.generator();

    let mut session = Session::new();
    match session.run(&generator, &params).await? {
        SessionState::Success {
            order_id, images, ..
        } => {
            println!("Order ID: {}", order_id);
            tokio::fs::create_dir_all(&out_dir).await?;
            for (index, image) in images.iter().enumerate() {
                let (mime_type, bytes) = encoding::decode_data_uri(image)?;
                let file = out_dir.join(format!(
                    "preview-{}.{}",
                    index + 1,
                    encoding::extension_for(&mime_type)
                ));
                tokio::fs::write(&file, &bytes).await?;
                println!("  wrote {} ({} bytes)", file.display(), bytes.len());
            }
        }
        SessionState::Failed { message } => {
            eprintln!("Generation Failed: {}", message);
            process::exit(1);
        }
        _ => {}
    }

    Ok(())
}
