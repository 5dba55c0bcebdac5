#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use smartspend_report::{AssembledReport, ChartSlot, ReportAssembler, ReportConfig, ReportData};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text runs of one page (1-based), in drawing order
    pub fn page_texts(&self, page_num: u32) -> Vec<String> {
        pdf_assertions::page_text_runs(&self.doc, page_num)
    }

    /// 1-based number of the first page with a run equal to `text`
    pub fn page_of(&self, text: &str) -> Option<u32> {
        (1..=self.page_count() as u32).find(|p| self.page_texts(*p).iter().any(|t| t == text))
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assemble a report with the fixed-date test config and load the result
pub async fn assemble_pdf(
    config: ReportConfig,
    data: &ReportData,
    slots: Vec<ChartSlot>,
) -> Result<(AssembledReport, GeneratedPdf), Box<dyn std::error::Error>> {
    init_logging();
    let assembler = ReportAssembler::new(config)?;
    let report = assembler
        .assemble(Some(data), fixtures::march_2024(), slots)
        .await?;
    let pdf = GeneratedPdf::from_bytes(report.pdf.clone())?;
    Ok((report, pdf))
}
