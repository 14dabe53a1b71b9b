// src/services/document_service.rs

use std::{borrow::Cow, path::PathBuf};

use genpdf::{elements, style, Element};

use crate::{common::error::AppError, models::quote::Quote};

const CSV_HEADER: &str =
    "id,client_name,project_title,status,is_accepted,revenue,filming_hours,project_start_date,created_at";

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: PathBuf,
}

impl DocumentService {
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self { fonts_dir: fonts_dir.into() }
    }

    pub fn generate_quote_pdf(&self, quote: &Quote) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta configurada (Roboto-Regular.ttf, Roboto-Bold.ttf, ...)
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|e| AppError::PdfError(format!("fonte não encontrada em {:?}: {}", self.fonts_dir, e)))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Orçamento - {}", quote.project_title));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(elements::Paragraph::new("ORÇAMENTO DE PRODUÇÃO DE VÍDEO")
            .styled(style::Style::new().bold().with_font_size(18)));
        doc.push(elements::Paragraph::new(format!("Nº {}", quote.id))
            .styled(style::Style::new().with_font_size(8)));

        if let Some(created_at) = quote.created_at {
            doc.push(elements::Paragraph::new(format!("Data: {}", created_at.format("%d/%m/%Y"))));
        }

        doc.push(elements::Break::new(1.5));

        // --- CLIENTE / PROJETO ---
        doc.push(elements::Paragraph::new(format!("Cliente: {}", quote.client_name)));
        if let Some(email) = &quote.client_email {
            doc.push(elements::Paragraph::new(format!("E-mail: {}", email)));
        }
        doc.push(elements::Paragraph::new(format!("Projeto: {}", quote.project_title)));
        if let Some(location) = &quote.location {
            doc.push(elements::Paragraph::new(format!("Local: {}", location)));
        }
        if let Some(start) = quote.project_start_date {
            doc.push(elements::Paragraph::new(format!("Início das gravações: {}", start.format("%d/%m/%Y"))));
        }

        doc.push(elements::Break::new(2));

        // --- TABELA ---
        let mut table = elements::TableLayout::new(vec![3, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table.row()
            .element(elements::Paragraph::new("Item").styled(style_bold))
            .element(elements::Paragraph::new("Valor").styled(style_bold))
            .push()
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        table.row()
            .element(elements::Paragraph::new("Horas de filmagem"))
            .element(elements::Paragraph::new(format!("{:.1} h", quote.filming_hours_or_zero())))
            .push()
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAL ---
        let mut total_paragraph = elements::Paragraph::new(
            format!("TOTAL: {:.2}", quote.revenue_or_zero())
        );
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        // --- RODAPÉ ---
        if let Some(notes) = &quote.notes {
            doc.push(elements::Break::new(2));
            doc.push(elements::Paragraph::new(notes.as_str()).styled(style::Style::new().italic().with_font_size(8)));
        }

        let situation = if quote.is_accepted { "Aceito" } else { "Aguardando aprovação" };
        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new(format!("Situação: {}", situation))
            .styled(style::Style::new().with_font_size(8)));

        // Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::PdfError(e.to_string()))?;

        Ok(buffer)
    }
}

/// Planilha dos orçamentos, uma linha por registro, na ordem recebida.
pub fn quotes_to_csv(quotes: &[Quote]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + quotes.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for q in quotes {
        let fields = [
            q.id.to_string(),
            q.client_name.clone(),
            q.project_title.clone(),
            q.status.clone(),
            q.is_accepted.to_string(),
            q.revenue.map(|v| v.to_string()).unwrap_or_default(),
            q.filming_hours.map(|v| v.to_string()).unwrap_or_default(),
            q.project_start_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            q.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ];

        let line: Vec<Cow<'_, str>> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

// Aspas só quando necessário; aspas internas são duplicadas
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
