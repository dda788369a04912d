use coinwire_composer::{
    ArticleComposer, ArticleRequest, ComposerConfig, ComposerError, ImageComposer, Language,
    PromoFacts, PromoMode, PROMO_TEMPLATE_FULL,
};
use coinwire_sdk::{
    testing::MockLanguageModel, LanguageModelError, LanguageModelInput, Modality, ModelResponse,
    Part, ResponseFormat,
};
use serde_json::json;
use std::sync::Arc;

fn text_response(text: &str) -> ModelResponse {
    ModelResponse {
        content: vec![Part::text(text)],
        usage: None,
    }
}

fn article_json(sections: usize) -> String {
    let sections: Vec<_> = (1..=sections)
        .map(|i| json!({ "heading": format!("Section {i}"), "paragraphs": [format!("Body {i}")] }))
        .collect();
    json!({
        "title": "Solana Breaks Out",
        "content": { "intro": "SOL is moving.", "sections": sections },
        "seo": {
            "slug": "solana-breaks-out",
            "metaTitle": "Solana Breaks Out as Network Activity Hits Record High",
            "metaDescription": "Solana rallies on record activity.",
            "excerpt": "SOL rallies.",
            "imagePrompt": "Photorealistic Solana coin, neon accents",
            "altText": "Solana coin"
        },
        "sources": [{ "domain": "example.com", "url": "https://example.com/sol" }]
    })
    .to_string()
}

fn sources() -> Vec<String> {
    vec![
        "Solana hit record activity.".to_string(),
        "Fees stayed low.".to_string(),
    ]
}

fn user_prompt(model: &MockLanguageModel) -> String {
    let inputs = model.inputs();
    assert_eq!(inputs.len(), 1);
    match &inputs[0].prompt[..] {
        [Part::Text { text }] => text.clone(),
        other => panic!("expected a single text part, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_article_parses_model_json() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(text_response(&article_json(3)));

    let composer = ArticleComposer::new(model.clone());
    let article = composer
        .generate_article(&sources(), &ArticleRequest::default())
        .await
        .expect("article");

    assert_eq!(article.title, "Solana Breaks Out");
    assert_eq!(article.content.sections.len(), 3);
    assert_eq!(article.seo.slug, "solana-breaks-out");
    assert_eq!(article.sources[0].url, "https://example.com/sol");

    let inputs = model.inputs();
    let input = &inputs[0];
    assert_eq!(input.temperature, Some(0.7));
    assert_eq!(input.response_format, ResponseFormat::Json);
    assert!(input
        .system_prompt
        .as_deref()
        .is_some_and(|prompt| prompt.contains("exactly 3 main sections")));
}

#[tokio::test]
async fn generate_article_strips_code_fences() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(text_response(&format!("```json\n{}\n```", article_json(2))));
    model.push_response(text_response(&article_json(2)));

    let composer = ArticleComposer::new(model.clone());
    let request = ArticleRequest {
        num_sections: 2,
        ..Default::default()
    };
    let fenced = composer
        .generate_article(&sources(), &request)
        .await
        .expect("fenced article");
    let bare = composer
        .generate_article(&sources(), &request)
        .await
        .expect("bare article");

    assert_eq!(fenced, bare);
}

#[tokio::test]
async fn generate_article_fails_on_empty_response() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(ModelResponse::default());
    model.push_response(text_response("   "));

    let composer = ArticleComposer::new(model.clone());
    for _ in 0..2 {
        let error = composer
            .generate_article(&sources(), &ArticleRequest::default())
            .await
            .expect_err("empty response");
        assert!(matches!(error, ComposerError::EmptyResponse));
    }
}

#[tokio::test]
async fn generate_article_fails_on_malformed_json() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(text_response("Here is your article: {title"));

    let error = ArticleComposer::new(model)
        .generate_article(&sources(), &ArticleRequest::default())
        .await
        .expect_err("malformed json");

    assert!(matches!(error, ComposerError::MalformedJson(_)));
}

#[tokio::test]
async fn generate_article_propagates_model_errors() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_error(LanguageModelError::InvalidInput("quota exceeded".to_string()));

    let error = ArticleComposer::new(model)
        .generate_article(&sources(), &ArticleRequest::default())
        .await
        .expect_err("model error");

    assert!(matches!(
        error,
        ComposerError::LanguageModel(LanguageModelError::InvalidInput(message))
            if message == "quota exceeded"
    ));
}

#[tokio::test]
async fn generate_article_keeps_short_articles() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(text_response(&article_json(1)));

    let article = ArticleComposer::new(model)
        .generate_article(
            &sources(),
            &ArticleRequest {
                num_sections: 4,
                ..Default::default()
            },
        )
        .await
        .expect("short article is still returned");

    assert_eq!(article.content.sections.len(), 1);
}

#[tokio::test]
async fn promotional_request_injects_custom_facts_and_template() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(text_response(&article_json(3)));

    let composer = ArticleComposer::new(model.clone())
        .with_facts(PromoFacts::new().with_facts("Acme", "Acme runs a zero-fee DEX."));
    composer
        .generate_article(
            &sources(),
            &ArticleRequest {
                language: Language::French,
                promo_mode: PromoMode::Full,
                promo_subject: Some("Acme".to_string()),
                custom_promo_text: Some("Acme presale ends Friday.".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("article");

    let prompt = user_prompt(&model);
    assert!(prompt.contains("TARGET LANGUAGE: French"));
    assert!(prompt.contains("Solana hit record activity.\n\n--- NEXT SOURCE ---\n\nFees stayed low."));
    assert!(prompt.contains("Acme runs a zero-fee DEX."));
    assert!(prompt.contains(PROMO_TEMPLATE_FULL));
    assert!(prompt.contains("Acme presale ends Friday."));
}

#[tokio::test]
async fn no_cta_request_omits_promotion() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(text_response(&article_json(3)));

    ArticleComposer::new(model.clone())
        .generate_article(
            &sources(),
            &ArticleRequest {
                promo_mode: PromoMode::NoCta,
                promo_subject: Some("Bitcoin".to_string()),
                custom_promo_text: Some("Buy now".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("article");

    let prompt = user_prompt(&model);
    assert!(!prompt.contains(PROMO_TEMPLATE_FULL.trim()));
    assert!(!prompt.contains("Buy now"));
    assert!(!prompt.contains("21 million"));
    assert!(prompt.contains("Do NOT add a promotional section."));
}

#[tokio::test]
async fn generate_image_returns_first_inline_payload() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(ModelResponse {
        content: vec![
            Part::text("Here you go"),
            Part::inline_data("Zmlyc3Q=", "image/png"),
            Part::inline_data("c2Vjb25k", "image/png"),
        ],
        usage: None,
    });

    let image = ImageComposer::new(model.clone())
        .generate_image("Photorealistic bitcoin")
        .await
        .expect("image");

    assert_eq!(image, "Zmlyc3Q=");
    let inputs = model.inputs();
    assert_eq!(
        inputs[0],
        LanguageModelInput {
            modalities: vec![Modality::Text, Modality::Image],
            ..LanguageModelInput::from_text("Photorealistic bitcoin")
        }
    );
}

#[tokio::test]
async fn generate_image_without_image_parts_fails() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(text_response("I cannot draw that."));
    model.push_response(ModelResponse::default());

    let composer = ImageComposer::new(model);
    for _ in 0..2 {
        let error = composer
            .generate_image("anything")
            .await
            .expect_err("no image");
        assert!(matches!(error, ComposerError::NoImageData));
        assert_eq!(error.to_string(), "No image data received from the model.");
    }
}

#[tokio::test]
async fn generate_image_propagates_model_errors() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_error(LanguageModelError::Invariant("google", "boom".to_string()));

    let error = ImageComposer::new(model)
        .generate_image("anything")
        .await
        .expect_err("model error");

    assert!(matches!(error, ComposerError::LanguageModel(_)));
}

#[tokio::test]
async fn generate_image_accepts_non_image_inline_data() {
    let model = Arc::new(MockLanguageModel::new());
    model.push_response(ModelResponse {
        content: vec![Part::inline_data("d2VicA==", "application/octet-stream")],
        usage: None,
    });

    let data = ImageComposer::new(model)
        .generate_image("anything")
        .await
        .expect("inline data");

    assert_eq!(data, "d2VicA==");
}

#[tokio::test]
async fn unreachable_endpoint_error_hides_api_key() {
    let mut config = ComposerConfig::new("SUPER-SECRET-KEY");
    config.base_url = Some("http://127.0.0.1:1".to_string());

    let article_error = ArticleComposer::from_config(&config)
        .generate_article(&sources(), &ArticleRequest::default())
        .await
        .expect_err("nothing listens on port 1");
    let image_error = ImageComposer::from_config(&config)
        .generate_image("anything")
        .await
        .expect_err("nothing listens on port 1");

    for error in [article_error, image_error] {
        assert!(matches!(
            error,
            ComposerError::LanguageModel(LanguageModelError::Transport(_))
        ));
        assert!(!error.to_string().contains("SUPER-SECRET-KEY"));
        assert!(!format!("{error:?}").contains("SUPER-SECRET-KEY"));
    }
}
