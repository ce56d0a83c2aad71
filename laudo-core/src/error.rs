//! Erros do carregamento de laudos.
//!
//! Toda falha interrompe a carga inteira: não há recuperação por laudo.

use thiserror::Error;

/// Erro principal do crate.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Falha ao abrir ou ler o arquivo de laudos.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Arquivo tabular malformado.
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    /// Documento com número de passagens diferente de um após a segmentação.
    #[error("document {id}: each document must have a single passage, the Impression section (found {count})")]
    PassageCount { id: String, count: usize },

    /// Cabeçalho de opinião seguido de outro cabeçalho (ou de nada).
    #[error("document {id} contains empty impression section")]
    EmptyImpression { id: String },

    /// Mais de uma seção de opinião.
    #[error("document {id} contains {count} impression (opiniao) passages")]
    MultipleImpressions { id: String, count: usize },

    /// Nenhuma seção de opinião.
    #[error("document {id} contains no explicit impression passage")]
    NoImpression { id: String },

    /// Marcador da conclusão ausente no texto limpo.
    #[error("document {id} has no '{marker}' marker")]
    MarkerNotFound { id: String, marker: String },

    /// Configuração inválida de títulos de seção.
    #[error("invalid section titles: {0}")]
    Section(String),
}

/// Alias de resultado para as operações do crate.
pub type Result<T> = std::result::Result<T, LoaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoaderError::MultipleImpressions { id: "3".into(), count: 2 };
        assert_eq!(err.to_string(), "document 3 contains 2 impression (opiniao) passages");

        let err = LoaderError::MarkerNotFound { id: "0".into(), marker: "CONCLUSAO:".into() };
        assert!(err.to_string().contains("CONCLUSAO:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "laudos.csv");
        let err: LoaderError = io.into();
        assert!(matches!(err, LoaderError::Io(_)));
    }
}
