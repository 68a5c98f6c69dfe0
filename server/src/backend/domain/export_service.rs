//! Export service: builds tabular reports from participants, academic
//! records and contributions, renders them through a [`DocumentSink`] and
//! optionally writes the result to disk.

use anyhow::{anyhow, Context, Result};
use csv::WriterBuilder;
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::domain::academic_report::flag_statistics;
use crate::backend::domain::academic_service::AcademicService;
use crate::backend::domain::classifier::Category;
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::export::{
    ExportDocument, ExportKind, ExportToPathResult, RenderedExport,
};
use crate::backend::domain::contribution_service::ContributionService;
use crate::backend::domain::contribution_totals::{total, total_across};
use crate::backend::domain::event_settings_service::EventSettingsService;
use crate::backend::domain::filters::{AcademicFilter, ContributionFilter, ParticipantFilter};
use crate::backend::domain::models::academic::AcademicRecord;
use crate::backend::domain::models::contribution::ContributionCategory;
use crate::backend::domain::participant_service::ParticipantService;
use crate::backend::storage::Connection;

const MISSING: &str = "-";

fn text_or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn number_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

fn amount_or_dash(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| MISSING.to_string())
}

fn yes_no(value: bool) -> String {
    let label = if value { "Yes" } else { "No" };
    label.to_string()
}

/// Output format for an [`ExportDocument`]
pub trait DocumentSink: Send + Sync {
    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn render(&self, document: &ExportDocument) -> Result<String>;
}

/// Renders a document as CSV: a preamble of title, event, date and summary
/// lines, followed by the header row and the data rows.
#[derive(Debug, Clone, Default)]
pub struct CsvDocumentSink;

impl DocumentSink for CsvDocumentSink {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, document: &ExportDocument) -> Result<String> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

        writer.write_record([document.title.as_str()])?;
        writer.write_record([document.event_name.as_str()])?;
        writer.write_record(["Generated on", document.generated_on.as_str()])?;
        for line in &document.summary_lines {
            writer.write_record([line.as_str()])?;
        }
        writer.write_record(&document.headers)?;
        for row in &document.rows {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to finish document: {}", e.error()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Basic path sanitization to handle common user input issues
pub fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    // surrounding quotes, single or double
    if cleaned.len() >= 2
        && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'')))
    {
        cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
    }

    cleaned = cleaned.replace("\\ ", " ");

    while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
        cleaned.pop();
    }

    if cleaned.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            if cleaned == "~" {
                cleaned = home.to_string_lossy().to_string();
            } else if cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
                cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
            }
        }
    }

    cleaned
}

#[derive(Clone)]
pub struct ExportService<C: Connection> {
    participant_service: ParticipantService<C>,
    academic_service: AcademicService<C>,
    contribution_service: ContributionService<C>,
    event_settings_service: EventSettingsService<C>,
    exports_directory: PathBuf,
    sink: Arc<dyn DocumentSink>,
    clock: Clock,
}

impl<C: Connection> ExportService<C> {
    pub fn new(
        participant_service: ParticipantService<C>,
        academic_service: AcademicService<C>,
        contribution_service: ContributionService<C>,
        event_settings_service: EventSettingsService<C>,
        exports_directory: PathBuf,
        clock: Clock,
    ) -> Self {
        Self {
            participant_service,
            academic_service,
            contribution_service,
            event_settings_service,
            exports_directory,
            sink: Arc::new(CsvDocumentSink),
            clock,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DocumentSink>) -> Self {
        self.sink = sink;
        self
    }

    pub async fn build_document(&self, kind: ExportKind) -> Result<ExportDocument> {
        let (summary_lines, headers, rows) = match kind {
            ExportKind::Participants => self.participant_table().await?,
            ExportKind::Academics => self.academic_table().await?,
            ExportKind::Contributions => self.contribution_table().await?,
        };

        Ok(ExportDocument {
            kind,
            title: kind.title().to_string(),
            event_name: self.event_settings_service.event_name(),
            generated_on: self.clock.today().format("%Y-%m-%d").to_string(),
            summary_lines,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        })
    }

    /// Render a document for download
    pub async fn export(&self, kind: ExportKind) -> Result<RenderedExport> {
        info!("Exporting {}", kind);

        let document = self.build_document(kind).await?;
        let content = self.sink.render(&document)?;
        let filename = format!(
            "{}-report-{}.{}",
            kind.slug(),
            self.clock.today().format("%Y%m%d"),
            self.sink.extension()
        );

        info!(
            "Exported {} rows of {} ({} bytes) as {}",
            document.rows.len(),
            kind,
            content.len(),
            filename
        );

        Ok(RenderedExport {
            title: document.title,
            filename,
            content,
            row_count: document.rows.len(),
        })
    }

    /// Render a document and write it to `custom_path`, or to the exports
    /// directory under the data directory when no path is given
    pub async fn export_to_path(
        &self,
        kind: ExportKind,
        custom_path: Option<String>,
    ) -> Result<ExportToPathResult> {
        let rendered = self.export(kind).await?;

        let export_dir = match custom_path {
            Some(path) if !path.trim().is_empty() => PathBuf::from(sanitize_path(&path)),
            _ => self.exports_directory.clone(),
        };

        fs::create_dir_all(&export_dir).with_context(|| {
            format!("Failed to create export directory {}", export_dir.display())
        })?;

        let file_path = export_dir.join(&rendered.filename);
        if let Err(e) = fs::write(&file_path, &rendered.content) {
            error!("Failed to write export file {}: {}", file_path.display(), e);
            return Err(e).with_context(|| format!("Failed to write {}", file_path.display()));
        }

        let file_path = file_path.to_string_lossy().to_string();
        info!("Wrote {} rows to {}", rendered.row_count, file_path);

        Ok(ExportToPathResult {
            file_path,
            row_count: rendered.row_count,
        })
    }

    async fn participant_table(&self) -> Result<(Vec<String>, Vec<&'static str>, Vec<Vec<String>>)> {
        let participants = self
            .participant_service
            .list_participants(&ParticipantFilter::default())
            .await?;

        let count = |category: Category| {
            participants
                .iter()
                .filter(|d| d.classification.category == Some(category))
                .count()
        };
        let summary = vec![
            format!("Total Participants: {}", participants.len()),
            format!("Saf Awwal: {}", count(Category::SafAwwal)),
            format!("Saf Dom: {}", count(Category::SafDom)),
            format!("General: {}", count(Category::General)),
        ];

        let headers = vec![
            "Registration #",
            "Full Name",
            "Islamic Name",
            "Date of Birth",
            "Age",
            "Category",
            "Mobile",
            "Region",
            "Majlis",
        ];

        let rows = participants
            .iter()
            .map(|d| {
                let p = &d.participant;
                vec![
                    p.registration_number.clone(),
                    p.full_name.clone(),
                    text_or_dash(p.islamic_names.as_deref()),
                    number_or_dash(p.birth_date.map(|b| b.format("%Y-%m-%d"))),
                    number_or_dash(d.classification.category.map(|_| d.classification.age)),
                    text_or_dash(d.classification.category.map(|c| c.label())),
                    p.mobile_number.clone(),
                    text_or_dash(d.region_name.as_deref()),
                    text_or_dash(d.majlis_name.as_deref()),
                ]
            })
            .collect();

        Ok((summary, headers, rows))
    }

    async fn academic_table(&self) -> Result<(Vec<String>, Vec<&'static str>, Vec<Vec<String>>)> {
        let records = self
            .academic_service
            .list_records(&AcademicFilter::default())
            .await?;

        let raw: Vec<AcademicRecord> = records.iter().map(|d| d.record.clone()).collect();
        let mut summary = vec![format!("Total Records: {}", records.len())];
        summary.extend(
            flag_statistics(&raw)
                .iter()
                .map(|stat| format!("{}: {}%", stat.flag.label(), stat.percentage)),
        );
        let headers = vec![
            "Participant",
            "Month",
            "Prayer Knowledge",
            "Prayer Meaning",
            "Quran Reading",
            "Bicycle",
            "Daily Prayers",
            "Tilawat Days",
            "Friday Prayers",
            "Huzur Sermons",
            "Nafli Fasts",
        ];

        let rows = records
            .iter()
            .map(|d| {
                let r = &d.record;
                vec![
                    text_or_dash(d.participant_name.as_deref()),
                    r.report_month.clone(),
                    yes_no(r.knows_prayer_full),
                    yes_no(r.knows_prayer_meaning),
                    yes_no(r.can_read_quran),
                    yes_no(r.owns_bicycle),
                    number_or_dash(r.avg_prayers_per_day),
                    number_or_dash(r.days_tilawat_done),
                    number_or_dash(r.friday_prayers_attended),
                    number_or_dash(r.huzur_sermons_listened),
                    number_or_dash(r.nafli_fasts),
                ]
            })
            .collect();

        Ok((summary, headers, rows))
    }

    async fn contribution_table(&self) -> Result<(Vec<String>, Vec<&'static str>, Vec<Vec<String>>)> {
        let contributions = self
            .contribution_service
            .list_contributions(&ContributionFilter::default())
            .await?;

        let plain: Vec<_> = contributions.iter().map(|d| d.contribution.clone()).collect();
        let summary = vec![
            format!("Total Records: {}", contributions.len()),
            format!("Total Amount: KES {:.2}", total_across(&plain)),
        ];

        let mut headers = vec!["Participant", "Month"];
        headers.extend(ContributionCategory::ALL.iter().map(|c| c.label()));
        headers.push("Total");

        let rows = contributions
            .iter()
            .map(|d| {
                let c = &d.contribution;
                let mut row = vec![
                    text_or_dash(d.participant_name.as_deref()),
                    c.month.clone(),
                ];
                row.extend(
                    ContributionCategory::ALL
                        .iter()
                        .map(|category| amount_or_dash(c.amount(*category))),
                );
                row.push(format!("{:.2}", total(c)));
                row
            })
            .collect();

        Ok((summary, headers, rows))
    }
}
