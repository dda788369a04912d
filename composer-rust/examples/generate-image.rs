use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use coinwire_composer::{ComposerConfig, ImageComposer};
use dotenvy::dotenv;
use std::{env, fs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let prompt = env::args().nth(1).unwrap_or_else(|| {
        "Photorealistic golden bitcoin on a trading desk at night, the price \
         \"$100,000\" rendered as glowing neon typography"
            .to_string()
    });
    let output = env::args().nth(2).unwrap_or_else(|| "cover.png".to_string());

    let config = ComposerConfig::from_env().expect("composer configuration");
    let image_data = ImageComposer::from_config(&config)
        .generate_image(&prompt)
        .await
        .expect("generate_image failed");

    let image_bytes = BASE64_STANDARD
        .decode(&image_data)
        .expect("invalid base64 image data");

    fs::write(&output, image_bytes).expect("failed to write image file");
    println!("Saved image to {output}");
}
