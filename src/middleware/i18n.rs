// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::DEFAULT_LANG;

// Nosso extrator de idioma
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first() // Pega o primeiro idioma (ex: "pt-BR")
                    .map(|tag_string| {
                        // "pt-BR" -> "pt"
                        tag_string.split('-').next().unwrap_or(tag_string).trim().to_lowercase()
                    })
            })
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(accept_language: Option<&str>) -> Locale {
        let mut builder = Request::builder().uri("/api/health");
        if let Some(value) = accept_language {
            builder = builder.header(header::ACCEPT_LANGUAGE, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Locale::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn primary_subtag_of_the_preferred_language() {
        assert_eq!(extract(Some("pt-BR,pt;q=0.9,en;q=0.8")).await.0, "pt");
        assert_eq!(extract(Some("en-US")).await.0, "en");
    }

    #[tokio::test]
    async fn quality_values_decide_the_order() {
        assert_eq!(extract(Some("en;q=0.5, pt;q=0.9")).await.0, "pt");
    }

    #[tokio::test]
    async fn defaults_to_english() {
        assert_eq!(extract(None).await.0, "en");
        assert_eq!(extract(Some("")).await.0, "en");
    }
}
