//! Drives the sections through one report build and hands the bytes to an
//! exporter.

use crate::aggregate::FinancialSummary;
use crate::charts::{ChartCollector, ChartSlot};
use crate::config::ReportConfig;
use crate::diagnostics::{Diagnostics, TableKind};
use crate::error::{ReportError, SkipReason};
use crate::export::ReportExporter;
use crate::labels::ReportLabels;
use crate::period::ReportPeriod;
use crate::sections::{
    SectionContext, load_logo, render_footer, render_gallery, render_header, render_summary,
    render_transaction_band, render_transaction_table,
};
use chrono::{Local, NaiveDate};
use smartspend_layout::{LaidOutDocument, LayoutCursor};
use smartspend_render_lopdf::{DocumentRenderer, LopdfRenderer};
use smartspend_resource::ResourceProvider;
use smartspend_types::{EncodedImage, ReportData};
use std::path::PathBuf;
use std::sync::Arc;

const PRODUCER: &str = "SmartSpend";
const TABLE_SPACING: f32 = 20.0;

/// Progress of one build, in the order the stages are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStage {
    Start,
    HeaderRendered,
    SummaryRendered,
    ChartsRendered,
    PageBreak,
    IncomeTableRendered,
    ExpenseTableRendered,
    FooterStamped,
    Exported,
}

#[derive(Debug)]
struct StageTrail(Vec<AssemblyStage>);

impl StageTrail {
    fn new() -> Self {
        log::debug!("Assembly stage: {:?}", AssemblyStage::Start);
        Self(vec![AssemblyStage::Start])
    }

    fn advance(&mut self, stage: AssemblyStage) {
        if let Some(previous) = self.0.last() {
            log::debug!("Assembly stage: {:?} -> {:?}", previous, stage);
        }
        self.0.push(stage);
    }
}

/// A laid-out but not yet serialised report.
#[derive(Debug)]
pub struct LaidOutReport {
    pub filename: String,
    pub document: LaidOutDocument,
    pub summary: FinancialSummary,
    pub diagnostics: Diagnostics,
    pub stages: Vec<AssemblyStage>,
}

#[derive(Debug)]
pub struct AssembledReport {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub summary: FinancialSummary,
    pub page_count: usize,
    pub diagnostics: Diagnostics,
    pub stages: Vec<AssemblyStage>,
}

/// Outcome of [`ReportAssembler::generate_monthly_pdf`]. The PDF bytes are
/// gone by now; they live wherever the exporter put them.
#[derive(Debug)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub filename: String,
    pub summary: FinancialSummary,
    pub page_count: usize,
    pub diagnostics: Diagnostics,
    pub stages: Vec<AssemblyStage>,
}

/// `SmartSpend_Reporte_<MonthName>_<Year>.pdf` with the locale's month name.
pub fn report_filename(period: ReportPeriod, labels: &ReportLabels) -> String {
    format!(
        "SmartSpend_Reporte_{}_{}.pdf",
        labels.month_name(period),
        period.year()
    )
}

pub struct ReportAssembler {
    config: ReportConfig,
    labels: ReportLabels,
    resources: Option<Arc<dyn ResourceProvider>>,
}

impl ReportAssembler {
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        config.validate()?;
        let labels = config.labels();
        Ok(Self {
            config,
            labels,
            resources: None,
        })
    }

    /// Where `logo_path` is looked up.
    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Lays the whole report out. Waiting on the chart slots is the only
    /// suspension point.
    pub async fn lay_out(
        &self,
        data: Option<&ReportData>,
        period: ReportPeriod,
        slots: Vec<ChartSlot>,
    ) -> Result<LaidOutReport, ReportError> {
        let Some(data) = data else {
            log::error!("Cannot build the {} report: no report data", period);
            return Err(ReportError::MissingReportData);
        };

        let mut stages = StageTrail::new();
        let mut diagnostics = Diagnostics::default();
        let ctx = SectionContext {
            labels: &self.labels,
            theme: &self.config.theme,
            currency_symbol: &self.config.currency_symbol,
        };
        let summary = FinancialSummary::resolve(data);
        let mut cursor = LayoutCursor::new(self.config.geometry);

        let logo = self.resolve_logo(&mut diagnostics);
        let account = data.account.display_name(self.labels.account_fallback);
        render_header(&mut cursor, &ctx, logo, period, account);
        stages.advance(AssemblyStage::HeaderRendered);

        render_summary(&mut cursor, &ctx, &summary);
        stages.advance(AssemblyStage::SummaryRendered);

        log::debug!(
            "Report data carries {} chart payload(s); {} chart slot(s) offered",
            data.chart_payloads.present(),
            slots.len()
        );
        let collector = ChartCollector::new(self.config.chart_ready_timeout(), self.labels.clone());
        let collection = collector.collect(slots).await;
        for reason in collection.skipped {
            diagnostics.record(reason);
        }
        diagnostics.charts_embedded = render_gallery(&mut cursor, &ctx, &collection.charts);
        stages.advance(AssemblyStage::ChartsRendered);

        cursor.break_page();
        stages.advance(AssemblyStage::PageBreak);
        render_transaction_band(&mut cursor, &ctx);

        let income = render_transaction_table(&mut cursor, &ctx, TableKind::Income, &data.incomes, &mut diagnostics);
        if income.is_some() {
            cursor.advance(TABLE_SPACING);
        }
        diagnostics.income_table = income;
        stages.advance(AssemblyStage::IncomeTableRendered);

        let expense = render_transaction_table(&mut cursor, &ctx, TableKind::Expense, &data.expenses, &mut diagnostics);
        if expense.is_some() {
            cursor.advance(TABLE_SPACING);
        }
        diagnostics.expense_table = expense;
        stages.advance(AssemblyStage::ExpenseTableRendered);

        render_footer(&mut cursor, &ctx, self.generated_on());
        stages.advance(AssemblyStage::FooterStamped);

        diagnostics.page_breaks = cursor.page_breaks();
        Ok(LaidOutReport {
            filename: report_filename(period, &self.labels),
            document: cursor.finish(),
            summary,
            diagnostics,
            stages: stages.0,
        })
    }

    /// Lays out and serialises the report.
    pub async fn assemble(
        &self,
        data: Option<&ReportData>,
        period: ReportPeriod,
        slots: Vec<ChartSlot>,
    ) -> Result<AssembledReport, ReportError> {
        let laid_out = self.lay_out(data, period, slots).await?;

        let renderer = LopdfRenderer::new()
            .with_title(format!("{} {}", self.labels.report_title, period))
            .with_producer(PRODUCER);
        let pdf = renderer.render(&laid_out.document)?;
        let page_count = laid_out.document.page_count();

        log::info!(
            "Assembled {}: {} page(s), {} bytes, {} skipped item(s)",
            laid_out.filename,
            page_count,
            pdf.len(),
            laid_out.diagnostics.skipped.len()
        );
        if !laid_out.diagnostics.skipped.is_empty() {
            log::debug!("Skipped while assembling {}:\n{}", laid_out.filename, laid_out.diagnostics.describe());
        }
        Ok(AssembledReport {
            filename: laid_out.filename,
            pdf,
            summary: laid_out.summary,
            page_count,
            diagnostics: laid_out.diagnostics,
            stages: laid_out.stages,
        })
    }

    /// Builds the monthly PDF and hands it to `exporter`. Export failures are
    /// returned as-is; nothing is retried.
    pub async fn generate_monthly_pdf(
        &self,
        data: Option<&ReportData>,
        period: ReportPeriod,
        slots: Vec<ChartSlot>,
        exporter: &dyn ReportExporter,
    ) -> Result<ExportedReport, ReportError> {
        let report = self.assemble(data, period, slots).await?;

        let path = match exporter.export(&report).await {
            Ok(path) => path,
            Err(e) => {
                log::error!("Could not export {}: {}", report.filename, e);
                return Err(e.into());
            }
        };

        let AssembledReport {
            filename,
            summary,
            page_count,
            diagnostics,
            mut stages,
            ..
        } = report;
        if let Some(previous) = stages.last() {
            log::debug!("Assembly stage: {:?} -> {:?}", previous, AssemblyStage::Exported);
        }
        stages.push(AssemblyStage::Exported);

        log::info!("Exported {} to {}", filename, path.display());
        Ok(ExportedReport {
            path,
            filename,
            summary,
            page_count,
            diagnostics,
            stages,
        })
    }

    fn generated_on(&self) -> NaiveDate {
        self.config
            .generated_on
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn resolve_logo(&self, diagnostics: &mut Diagnostics) -> Option<Arc<EncodedImage>> {
        let path = self.config.logo_path.as_deref()?;
        let Some(resources) = self.resources.as_deref() else {
            diagnostics.record(SkipReason::LogoUnavailable(format!(
                "no resource provider to load '{}'",
                path
            )));
            return None;
        };
        log::debug!("Loading logo '{}' through {}", path, resources.name());
        match load_logo(resources, path) {
            Ok(image) => Some(Arc::new(image)),
            Err(reason) => {
                log::warn!("Logo '{}' unavailable from {}, using the wordmark", path, resources.name());
                diagnostics.record(reason);
                None
            }
        }
    }
}
