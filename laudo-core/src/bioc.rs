//! # Modelo de Documentos (estilo BioC)
//!
//! Estruturas mínimas para representar laudos segmentados, inspiradas no formato
//! BioC usado em pipelines de NLP biomédico:
//!
//! - [`Collection`]: conjunto ordenado de documentos de uma carga.
//! - [`Document`]: um laudo, identificado por uma string, com suas passagens.
//! - [`Passage`]: trecho contíguo do laudo. Pode carregar um rótulo (`title`)
//!   que marca o início de uma seção (ex: `"opiniao"`).
//! - [`Sentence`]: sentença dentro de uma passagem.
//!
//! Todos os offsets são índices de byte no texto do documento (o laudo já limpo).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Chave de `infons` que guarda o rótulo de seção de uma passagem.
pub const TITLE_INFON: &str = "title";
/// Chave de `infons` que guarda o tipo de uma passagem de cabeçalho.
pub const TYPE_INFON: &str = "type";

/// Uma sentença extraída de uma passagem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Offset de byte no texto do documento.
    pub offset: usize,
    pub text: String,
}

/// Trecho contíguo de um documento.
///
/// Depois da segmentação em sentenças o texto da passagem é descartado
/// (`text = None`) e o conteúdo passa a viver em `sentences`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Offset de byte no texto do documento.
    pub offset: usize,
    pub text: Option<String>,
    #[serde(default)]
    pub infons: BTreeMap<String, String>,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl Passage {
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Rótulo de seção, se a passagem for um cabeçalho.
    pub fn title(&self) -> Option<&str> {
        self.infons.get(TITLE_INFON).map(String::as_str)
    }

    pub fn is_titled(&self) -> bool {
        self.infons.contains_key(TITLE_INFON)
    }

    pub fn add_sentence(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }
}

/// Um laudo representado como sequência de passagens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub infons: BTreeMap<String, String>,
    pub passages: Vec<Passage>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn add_passage(&mut self, passage: Passage) {
        self.passages.push(passage);
    }

    /// Total de sentenças em todas as passagens.
    pub fn sentence_count(&self) -> usize {
        self.passages.iter().map(|p| p.sentences.len()).sum()
    }
}

/// Formato de [`Collection::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Coleção de documentos produzida por uma chamada de carga.
///
/// Só cresce por [`Collection::add_document`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub source: String,
    /// Dia da carga, em [`DATE_FORMAT`].
    pub date: String,
    #[serde(default)]
    pub infons: BTreeMap<String, String>,
    documents: Vec<Document>,
}

impl Collection {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn add_document(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

/// Envolve um texto em um documento de passagem única (offset 0).
pub fn text_to_document(id: impl Into<String>, text: impl Into<String>) -> Document {
    let mut document = Document::new(id);
    document.add_passage(Passage::new(0, text));
    document
}
