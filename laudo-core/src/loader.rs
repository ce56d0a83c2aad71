//! # Carregador de Laudos
//!
//! Orquestra a carga: lê a coluna de laudos de um CSV, limpa cada texto,
//! envolve em [`Document`], opcionalmente isola a seção de opinião, segmenta
//! em sentenças e valida a estrutura antes de acumular na [`Collection`].
//!
//! A carga é tudo-ou-nada: qualquer erro interrompe o lote e os resultados
//! da carga anterior continuam valendo.
//!
//! ## Exemplo de Uso
//!
//! ```rust,no_run
//! use laudo_core::Loader;
//!
//! let mut loader = Loader::new("laudos.csv", true);
//! // Segundo lote de 5000 laudos
//! loader.load(Some(1))?;
//! for document in loader.collection().documents() {
//!     println!("{}: {} sentenças", document.id, document.sentence_count());
//! }
//! # Ok::<(), laudo_core::LoaderError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bioc::{text_to_document, Collection, Document, DATE_FORMAT};
use crate::clean::clean;
use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use crate::section::SectionSplitter;
use crate::ssplit::SentenceSplitter;

/// Carregador de laudos com seus segmentadores.
#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
    splitter: SentenceSplitter,
    section_splitter: SectionSplitter,
    reports: Vec<String>,
    collection: Collection,
}

impl Loader {
    /// Cria o carregador. Não faz I/O.
    pub fn new(reports_path: impl Into<PathBuf>, extract_impression: bool) -> Self {
        Self::from_config(LoaderConfig::new(reports_path, extract_impression))
    }

    pub fn from_config(config: LoaderConfig) -> Self {
        Self {
            splitter: SentenceSplitter::new(config.newline),
            section_splitter: SectionSplitter::new(),
            reports: Vec::new(),
            collection: Collection::default(),
            config,
        }
    }

    /// Troca o segmentador de seções (ex: títulos próprios).
    pub fn with_section_splitter(mut self, section_splitter: SectionSplitter) -> Self {
        self.section_splitter = section_splitter;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Laudos brutos da última carga bem-sucedida (já recortados pelo lote).
    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// Documentos da última carga bem-sucedida.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn into_parts(self) -> (Vec<String>, Collection) {
        (self.reports, self.collection)
    }

    /// Carrega e processa os laudos.
    ///
    /// Com `batch = Some(b)` só a janela `[b * batch_size, b * batch_size + batch_size)`
    /// é processada; janelas além do fim do arquivo resultam em coleção vazia.
    /// Os ids dos documentos são as posições dentro da janela.
    pub fn load(&mut self, batch: Option<usize>) -> Result<()> {
        let mut reports = read_reports(&self.config.reports_path)?;

        if let Some(batch) = batch {
            let size = self.config.batch_size;
            let start = batch.saturating_mul(size);
            let end = start.saturating_add(size);
            info!("Loading [{start}, {end}] reports.");
            reports = reports.into_iter().skip(start).take(size).collect();
        }

        let mut collection = Collection::new(self.config.reports_path.display().to_string());
        collection.date = chrono::Local::now().format(DATE_FORMAT).to_string();
        for (i, report) in reports.iter().enumerate() {
            let document = self.process_report(i.to_string(), report)?;
            collection.add_document(document);
        }

        info!(
            reports = reports.len(),
            extract_impression = self.config.extract_impression,
            "laudos carregados"
        );
        self.reports = reports;
        self.collection = collection;
        Ok(())
    }

    /// Limpa, estrutura e valida um único laudo.
    pub fn process_report(&self, id: String, report: &str) -> Result<Document> {
        let cleaned = clean(report);
        let mut document = text_to_document(id, cleaned);

        if self.config.extract_impression {
            self.isolate_after_marker(&mut document)?;
            document = self.section_splitter.split_document(document);
            self.extract_impression_from_passages(&mut document)?;
        }

        let document = ensure_single_passage(self.splitter.split_doc(document))?;
        debug!(id = %document.id, sentences = document.sentence_count(), "laudo processado");
        Ok(document)
    }

    /// Reduz o documento à passagem que segue o cabeçalho de opinião.
    ///
    /// Falha se o cabeçalho estiver vazio (seguido de outro cabeçalho ou no
    /// fim do documento), se houver mais de um, ou se não houver nenhum.
    pub fn extract_impression_from_passages(&self, document: &mut Document) -> Result<()> {
        let title = self.config.impression_title.as_str();
        let mut impressions = Vec::new();

        for (i, passage) in document.passages.iter().enumerate() {
            if passage.title() != Some(title) {
                continue;
            }
            match document.passages.get(i + 1) {
                Some(next) if !next.is_titled() => impressions.push(i + 1),
                _ => {
                    return Err(LoaderError::EmptyImpression {
                        id: document.id.clone(),
                    })
                }
            }
        }

        let index = match impressions.as_slice() {
            [index] => *index,
            [] => {
                return Err(LoaderError::NoImpression {
                    id: document.id.clone(),
                })
            }
            many => {
                return Err(LoaderError::MultipleImpressions {
                    id: document.id.clone(),
                    count: many.len(),
                })
            }
        };

        let impression = document.passages.swap_remove(index);
        document.passages = vec![impression];
        Ok(())
    }

    /// Mantém só o texto depois do marcador da conclusão.
    ///
    /// O texto já está em minúsculas, então o marcador é comparado em
    /// minúsculas. O offset continua relativo ao laudo limpo.
    fn isolate_after_marker(&self, document: &mut Document) -> Result<()> {
        let marker = self.config.impression_marker.to_lowercase();
        let id = document.id.clone();
        let not_found = || LoaderError::MarkerNotFound {
            id,
            marker: self.config.impression_marker.clone(),
        };

        let Some(passage) = document.passages.first_mut() else {
            return Err(not_found());
        };
        let end = passage
            .text
            .as_deref()
            .and_then(|text| text.find(&marker))
            .map(|position| position + marker.len());
        let (Some(end), Some(text)) = (end, passage.text.as_mut()) else {
            return Err(not_found());
        };

        text.drain(..end);
        passage.offset += end;
        Ok(())
    }
}

fn ensure_single_passage(document: Document) -> Result<Document> {
    if document.passages.len() != 1 {
        return Err(LoaderError::PassageCount {
            count: document.passages.len(),
            id: document.id,
        });
    }
    Ok(document)
}

/// Lê a primeira coluna de um CSV sem cabeçalho.
pub fn read_reports(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_reports_from(file)
}

/// Como [`read_reports`], a partir de qualquer leitor.
///
/// Linhas em branco são ignoradas; colunas extras também.
pub fn read_reports_from<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut reports = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(0) {
            Some(field) if !field.trim().is_empty() => reports.push(field.to_string()),
            _ => {}
        }
    }
    Ok(reports)
}
