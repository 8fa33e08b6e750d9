// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

const DEFAULT_LANG: &str = "pt";
const SUPPORTED_LANGS: [&str; 2] = ["pt", "en"];

// Extrator de idioma usado para traduzir as mensagens de erro
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    /// Escolhe o primeiro idioma suportado do cabeçalho Accept-Language.
    pub fn from_header(header_str: &str) -> Self {
        let lang = accept_language::parse(header_str)
            .iter()
            // "pt-PT" -> "pt", "en" -> "en"
            .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
            .find(|lang| SUPPORTED_LANGS.contains(&lang.as_str()))
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_supported_language() {
        assert_eq!(Locale::from_header("fr-FR, en-US;q=0.8").0, "en");
        assert_eq!(Locale::from_header("pt-PT").0, "pt");
    }

    #[test]
    fn falls_back_to_portuguese() {
        assert_eq!(Locale::from_header("de").0, "pt");
        assert_eq!(Locale::from_header("").0, "pt");
    }
}
