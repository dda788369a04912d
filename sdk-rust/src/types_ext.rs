use crate::{InlineData, LanguageModelInput, ModelResponse, Part};

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn inline_data(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::InlineData(InlineData {
            mime_type: mime_type.into(),
            data: data.into(),
        })
    }
}

impl From<&str> for Part {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Part {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl LanguageModelInput {
    /// Input with a single text part and provider defaults for everything else.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            prompt: vec![Part::text(text)],
            ..Default::default()
        }
    }
}

impl ModelResponse {
    /// Concatenate every text part of the response, in order.
    /// Returns `None` when the response carries no text at all.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData(_) => None,
            })
            .collect();

        (!texts.is_empty()).then(|| texts.concat())
    }

    #[must_use]
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.content.iter().find_map(|part| match part {
            Part::InlineData(inline) => Some(inline),
            Part::Text { .. } => None,
        })
    }
}
