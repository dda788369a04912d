use coinwire_composer::{ArticleComposer, ArticleRequest, ComposerConfig, PromoFacts};
use dotenvy::dotenv;
use std::{env, fs};
use tracing_subscriber::EnvFilter;

// Usage: generate-article <request.json> <source.txt>... [--facts facts.json]
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let request_path = args
        .next()
        .expect("usage: generate-article <request.json> <source.txt>...");

    let mut source_paths = Vec::new();
    let mut facts_path = None;
    while let Some(arg) = args.next() {
        if arg == "--facts" {
            facts_path = args.next();
        } else {
            source_paths.push(arg);
        }
    }

    let request: ArticleRequest = serde_json::from_str(
        &fs::read_to_string(&request_path).expect("failed to read request file"),
    )
    .expect("invalid article request");

    let sources: Vec<String> = source_paths
        .iter()
        .map(|path| fs::read_to_string(path).expect("failed to read source file"))
        .collect();

    let config = ComposerConfig::from_env().expect("composer configuration");
    let mut composer = ArticleComposer::from_config(&config);
    if let Some(path) = facts_path {
        composer = composer.with_facts(PromoFacts::from_path(path).expect("invalid facts file"));
    }

    let article = composer
        .generate_article(&sources, &request)
        .await
        .expect("generate_article failed");

    println!(
        "{}",
        serde_json::to_string_pretty(&article).expect("article serializes")
    );
}
