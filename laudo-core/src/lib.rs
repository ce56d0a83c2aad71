//! # laudo-core — Preparação de Laudos Médicos para NLP
//!
//! Este crate carrega laudos em texto livre (Português Brasileiro) de um arquivo
//! tabular, aplica uma normalização leve e transforma cada laudo em um documento
//! segmentado em sentenças, pronto para pipelines de NLP posteriores (ex:
//! rotuladores de achados radiológicos).
//!
//! ## Arquitetura
//!
//! O fluxo é linear, um laudo por vez:
//!
//! 1.  **Entrada**: coluna única de um CSV sem cabeçalho ([`loader`]).
//! 2.  **Limpeza** ([`mod@clean`]): minúsculas, `e/ou` -> `ou`, espaçamento de pontuação.
//! 3.  **Documento** ([`bioc`]): o texto vira um [`Document`] de passagem única.
//! 4.  **Seções** ([`section`], opcional): isola a seção de opinião (`"opiniao"`).
//! 5.  **Sentenças** ([`ssplit`]): cada passagem é dividida em sentenças com offsets.
//! 6.  **Saída**: os laudos brutos e a [`Collection`] de documentos.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use laudo_core::{clean, text_to_document, SentenceSplitter};
//!
//! let text = clean("Coração normal.Pulmões limpos,sem derrame.");
//! let document = SentenceSplitter::new(false).split_doc(text_to_document("0", text));
//!
//! let sentences: Vec<&str> = document.passages[0]
//!     .sentences
//!     .iter()
//!     .map(|s| s.text.as_str())
//!     .collect();
//! assert_eq!(sentences, vec!["coração normal.", "pulmões limpos, sem derrame."]);
//! ```

pub mod bioc;
pub mod clean;
pub mod config;
pub mod error;
pub mod loader;
pub mod section;
pub mod ssplit;

pub use bioc::{text_to_document, Collection, Document, Passage, Sentence};
pub use clean::clean;
pub use config::LoaderConfig;
pub use error::{LoaderError, Result};
pub use loader::Loader;
pub use section::SectionSplitter;
pub use ssplit::SentenceSplitter;
