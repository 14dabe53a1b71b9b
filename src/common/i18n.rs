// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

pub const DEFAULT_LANG: &str = "en";

type Catalog = HashMap<&'static str, &'static str>;

// Tabelas de mensagens por idioma. Compartilhada (Arc) entre todas as requisições.
#[derive(Clone)]
pub struct I18nStore {
    catalogs: Arc<HashMap<&'static str, Catalog>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", EN.iter().copied().collect::<Catalog>());
        catalogs.insert("pt", PT.iter().copied().collect::<Catalog>());
        Self { catalogs: Arc::new(catalogs) }
    }

    /// Idioma desconhecido cai no inglês; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|c| c.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|c| c.get(key)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

const EN: &[(&str, &str)] = &[
    ("error.validation", "One or more fields are invalid."),
    ("error.email_exists", "This e-mail is already in use."),
    ("error.invalid_credentials", "Invalid e-mail or password."),
    ("error.invalid_token", "Missing or invalid authentication token."),
    ("error.user_not_found", "User not found."),
    ("error.quote_not_found", "Quote not found."),
    ("error.invalid_status", "Unknown quote status."),
    ("error.invalid_body", "The request body is not valid JSON."),
    ("error.pdf", "Could not generate the PDF."),
    ("error.internal", "An unexpected error occurred."),
    ("validation.required", "This field is required."),
    ("validation.email", "The e-mail provided is invalid."),
    ("validation.password_length", "Password must have at least 6 characters."),
    ("validation.non_negative", "Value cannot be negative."),
];

const PT: &[(&str, &str)] = &[
    ("error.validation", "Um ou mais campos são inválidos."),
    ("error.email_exists", "Este e-mail já está em uso."),
    ("error.invalid_credentials", "E-mail ou senha inválidos."),
    ("error.invalid_token", "Token de autenticação inválido ou ausente."),
    ("error.user_not_found", "Usuário não encontrado."),
    ("error.quote_not_found", "Orçamento não encontrado."),
    ("error.invalid_status", "Status de orçamento desconhecido."),
    ("error.invalid_body", "O corpo da requisição não é um JSON válido."),
    ("error.pdf", "Não foi possível gerar o PDF."),
    ("error.internal", "Ocorreu um erro inesperado."),
    ("validation.required", "Campo obrigatório."),
    ("validation.email", "O e-mail fornecido é inválido."),
    ("validation.password_length", "A senha deve ter no mínimo 6 caracteres."),
    ("validation.non_negative", "O valor não pode ser negativo."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_languages() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "error.quote_not_found"), "Orçamento não encontrado.");
        assert_eq!(store.translate("en", "error.quote_not_found"), "Quote not found.");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "error.user_not_found"), "User not found.");
    }

    #[test]
    fn unknown_key_is_returned_verbatim() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "error.nao_existe"), "error.nao_existe");
    }
}
