//! # Segmentador de Seções
//!
//! Divide um documento de passagem única em passagens por seção. Cada
//! cabeçalho reconhecido (ex: `"opiniao:"`) vira uma passagem rotulada
//! (`infons["title"] = "opiniao"`), e o texto entre cabeçalhos vira passagens
//! sem rótulo:
//!
//! ```text
//! "achados: pulmões limpos. opiniao: normal."
//!   -> [title=achados] "achados:"
//!   ->                 "pulmões limpos."
//!   -> [title=opiniao] "opiniao:"
//!   ->                 "normal."
//! ```
//!
//! Os laudos limpos não têm quebras de linha, então um cabeçalho é aceito em
//! qualquer fronteira de palavra: início do texto, depois de espaço, de
//! pontuação ou do `:` de outro cabeçalho (`"tecnica:opiniao:"`).

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::bioc::{Document, Passage, TITLE_INFON, TYPE_INFON};
use crate::error::{LoaderError, Result};

/// Títulos de seção usuais em laudos de imagem.
pub const DEFAULT_SECTION_TITLES: &[&str] = &[
    "opiniao",
    "conclusao",
    "impressao",
    "achados",
    "analise",
    "indicacao",
    "tecnica",
    "historia clinica",
    "comparacao",
    "relatorio",
];

/// Valor de `infons["type"]` nas passagens de cabeçalho.
pub const HEADER_TYPE: &str = "title_1";

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| build_pattern(DEFAULT_SECTION_TITLES).unwrap());

/// Segmentador de seções por expressão regular.
#[derive(Debug, Clone)]
pub struct SectionSplitter {
    pattern: Regex,
}

impl SectionSplitter {
    /// Segmentador com [`DEFAULT_SECTION_TITLES`].
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }

    /// Segmentador com uma lista própria de títulos (sem os dois-pontos).
    pub fn with_titles(titles: &[&str]) -> Result<Self> {
        if titles.iter().all(|t| t.trim().is_empty()) {
            return Err(LoaderError::Section("at least one title is required".into()));
        }
        Ok(Self {
            pattern: build_pattern(titles)?,
        })
    }

    /// Reconstrói o documento com uma passagem por trecho de seção.
    ///
    /// Só a primeira passagem é lida. Documentos sem passagem com texto
    /// voltam inalterados.
    pub fn split_document(&self, document: Document) -> Document {
        let first = document
            .passages
            .first()
            .and_then(|p| p.text.clone().map(|t| (p.offset, t)));
        let Some((base, text)) = first else {
            return document;
        };

        let mut sections = Document {
            id: document.id,
            infons: document.infons,
            passages: Vec::new(),
        };

        let mut start = 0;
        for caps in self.pattern.captures_iter(&text) {
            let Some(header) = caps.get(1) else {
                continue;
            };
            debug!(id = %sections.id, header = header.as_str(), "cabeçalho de seção");

            if header.start() != start {
                push_passage(&mut sections, &text, base, start, header.start(), None);
            }
            push_passage(&mut sections, &text, base, header.start(), header.end(), Some(header.as_str()));
            start = header.end();
        }
        if start < text.len() {
            push_passage(&mut sections, &text, base, start, text.len(), None);
        }

        sections
    }
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn build_pattern(titles: &[&str]) -> Result<Regex> {
    let alternatives = titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(t).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    // `\b` não consome o separador, então cabeçalhos colados também casam
    let pattern = format!(r"(?i)\b((?:{alternatives})\s*:)");
    Regex::new(&pattern).map_err(|e| LoaderError::Section(e.to_string()))
}

/// Adiciona `text[start..end]` aparado como passagem, se não for vazio.
fn push_passage(
    document: &mut Document,
    text: &str,
    base: usize,
    start: usize,
    end: usize,
    header: Option<&str>,
) {
    let slice = &text[start..end];
    let content = slice.trim();
    if content.is_empty() {
        return;
    }
    let leading = slice.len() - slice.trim_start().len();
    let mut passage = Passage::new(base + start + leading, content);

    if let Some(header) = header {
        let title = header.trim().trim_end_matches(':').trim().to_lowercase();
        passage.infons.insert(TITLE_INFON.to_string(), title);
        passage.infons.insert(TYPE_INFON.to_string(), HEADER_TYPE.to_string());
    }
    document.add_passage(passage);
}
