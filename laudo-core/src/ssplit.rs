//! # Segmentador de Sentenças
//!
//! Divide o texto de cada passagem em sentenças, preservando os offsets
//! originais. Usa as fronteiras de palavra do Unicode (UAX #29, via
//! `unicode-segmentation`) para achar os terminadores, porque as fronteiras de
//! sentença do Unicode não quebram antes de letra minúscula, e os laudos
//! chegam aqui já em minúsculas.
//!
//! Regras:
//! - `.`, `!` ou `?` seguido de espaço encerra a sentença.
//! - Ponto depois de abreviação conhecida (`dr.`, `cm.`, `etc.`) não encerra.
//! - Números decimais (`1.5`) são uma palavra só e nunca quebram.
//! - Com `newline = true`, quebra de linha também encerra a sentença.
//!
//! ## Exemplo
//!
//! ```rust
//! use laudo_core::ssplit::SentenceSplitter;
//!
//! let splitter = SentenceSplitter::new(false);
//! let sentences = splitter.split("nódulo de 1.5 mm na base. avaliado pelo dr. silva.");
//! assert_eq!(sentences.len(), 2);
//! assert_eq!(sentences[1], (27, "avaliado pelo dr. silva.".to_string()));
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::bioc::{Document, Sentence};

/// Abreviações comuns em laudos que não devem encerrar sentença.
const ABBREVIATIONS: &[&str] = &[
    "dr", "dra", "sr", "sra", "prof", "profa", "exmo", "exma",
    "cm", "mm", "ml", "mg", "kg", "km", "cc", "etc", "vol", "fig",
    "obs", "aprox", "ref", "ex", "art", "pág", "pag", "cap", "tel",
    "hosp", "enf", "esq", "dir", "sup", "inf", "ant", "post",
];

static ABBREVIATIONS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ABBREVIATIONS.iter().copied().collect());

/// Fechamentos que podem seguir o terminador sem cancelar a quebra.
const CLOSERS: &[&str] = &[")", "]", "\"", "'", "\u{201D}", "\u{2019}"];

/// Segmentador de sentenças para passagens de documentos.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter {
    /// Trata quebras de linha como fim de sentença.
    pub newline: bool,
}

impl SentenceSplitter {
    pub fn new(newline: bool) -> Self {
        Self { newline }
    }

    /// Segmenta todas as passagens do documento.
    ///
    /// Cada passagem ganha suas sentenças (offsets relativos ao documento) e
    /// perde o texto. Passagens sem texto ficam como estão.
    pub fn split_doc(&self, mut document: Document) -> Document {
        for passage in &mut document.passages {
            let Some(text) = passage.text.take() else {
                continue;
            };
            for (offset, sentence) in self.split(&text) {
                passage.add_sentence(Sentence {
                    offset: passage.offset + offset,
                    text: sentence,
                });
            }
        }
        debug!(
            id = %document.id,
            passages = document.passages.len(),
            sentences = document.sentence_count(),
            "documento segmentado"
        );
        document
    }

    /// Divide um texto em `(offset, sentença)`. Sentenças vazias são descartadas.
    pub fn split(&self, text: &str) -> Vec<(usize, String)> {
        let mut sentences = Vec::new();
        let mut start: Option<usize> = None;
        let mut last_word: Option<&str> = None;
        let mut pending_break = false;

        for (idx, segment) in text.split_word_bound_indices() {
            if segment.chars().all(char::is_whitespace) {
                let hard_break = self.newline && segment.contains('\n');
                if pending_break || hard_break {
                    flush(text, &mut start, idx, &mut sentences);
                    last_word = None;
                }
                pending_break = false;
                continue;
            }

            if start.is_none() {
                start = Some(idx);
            }

            // fechamentos logo após o terminador mantêm a quebra pendente
            if is_terminator(segment) {
                if !(segment == "." && last_word.is_some_and(is_abbreviation)) {
                    pending_break = true;
                }
            } else if !(pending_break && CLOSERS.contains(&segment)) {
                pending_break = false;
                last_word = Some(segment);
            }
        }
        flush(text, &mut start, text.len(), &mut sentences);

        sentences
    }
}

fn flush(text: &str, start: &mut Option<usize>, end: usize, out: &mut Vec<(usize, String)>) {
    if let Some(begin) = start.take() {
        let sentence = text[begin..end].trim_end();
        if !sentence.is_empty() {
            out.push((begin, sentence.to_string()));
        }
    }
}

fn is_terminator(segment: &str) -> bool {
    matches!(segment, "." | "!" | "?")
}

fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS_SET.contains(word.to_lowercase().as_str())
}
