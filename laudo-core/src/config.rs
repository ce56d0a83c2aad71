//! Configuração do carregador.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Tamanho padrão da janela de laudos por lote.
pub const DEFAULT_BATCH_SIZE: usize = 5000;
/// Marcador que precede a conclusão do laudo.
pub const DEFAULT_IMPRESSION_MARKER: &str = "CONCLUSAO:";
/// Rótulo da seção de opinião (impressão diagnóstica).
pub const DEFAULT_IMPRESSION_TITLE: &str = "opiniao";

/// Parâmetros do [`Loader`](crate::loader::Loader).
///
/// Todos os campos menos `reports_path` têm padrão, então um JSON com apenas
/// o caminho já é uma configuração válida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// CSV sem cabeçalho, uma coluna de texto.
    pub reports_path: PathBuf,
    /// Isola a seção de opinião antes de segmentar.
    pub extract_impression: bool,
    /// Laudos por lote em `load(Some(batch))`.
    pub batch_size: usize,
    pub impression_marker: String,
    pub impression_title: String,
    /// Quebra de linha encerra sentença.
    pub newline: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            reports_path: PathBuf::new(),
            extract_impression: false,
            batch_size: DEFAULT_BATCH_SIZE,
            impression_marker: DEFAULT_IMPRESSION_MARKER.to_string(),
            impression_title: DEFAULT_IMPRESSION_TITLE.to_string(),
            newline: false,
        }
    }
}

impl LoaderConfig {
    pub fn new(reports_path: impl Into<PathBuf>, extract_impression: bool) -> Self {
        Self {
            reports_path: reports_path.into(),
            extract_impression,
            ..Self::default()
        }
    }
}
