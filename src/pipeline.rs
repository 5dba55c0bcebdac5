use smartspend_core::{
    ChartSlot, ExportedReport, FileExporter, ReportAssembler, ReportConfig, ReportError, ReportExporter,
    ReportPeriod, ReportSource,
};
use smartspend_resource::ResourceProvider;
use std::sync::Arc;

/// A builder for creating a [`ReportPipeline`].
#[derive(Default)]
pub struct ReportPipelineBuilder {
    source: Option<Arc<dyn ReportSource>>,
    config: ReportConfig,
    resources: Option<Arc<dyn ResourceProvider>>,
    exporter: Option<Arc<dyn ReportExporter>>,
}

impl ReportPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where report data is fetched from. Required.
    pub fn with_source(mut self, source: Arc<dyn ReportSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves the configured logo path.
    pub fn with_resources(mut self, resources: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Defaults to a [`FileExporter`] writing into the working directory.
    pub fn with_exporter(mut self, exporter: Arc<dyn ReportExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn build(self) -> Result<ReportPipeline, ReportError> {
        let source = self.source.ok_or_else(|| {
            ReportError::Config("No report source has been configured. Use `with_source`.".to_string())
        })?;
        let mut assembler = ReportAssembler::new(self.config)?;
        if let Some(resources) = self.resources {
            assembler = assembler.with_resources(resources);
        }
        let exporter = self
            .exporter
            .unwrap_or_else(|| Arc::new(FileExporter::new(".")));
        Ok(ReportPipeline {
            source,
            assembler,
            exporter,
        })
    }
}

/// Fetch, assemble and export in one call.
pub struct ReportPipeline {
    source: Arc<dyn ReportSource>,
    assembler: ReportAssembler,
    exporter: Arc<dyn ReportExporter>,
}

impl ReportPipeline {
    pub fn builder() -> ReportPipelineBuilder {
        ReportPipelineBuilder::new()
    }

    pub fn assembler(&self) -> &ReportAssembler {
        &self.assembler
    }

    pub async fn run(
        &self,
        bank_account_id: i64,
        period: ReportPeriod,
        slots: Vec<ChartSlot>,
    ) -> Result<ExportedReport, ReportError> {
        log::info!("Generating the {} report for account {}", period, bank_account_id);
        let data = self.source.fetch(bank_account_id, period).await?;
        self.assembler
            .generate_monthly_pdf(Some(&data), period, slots, self.exporter.as_ref())
            .await
    }
}
