//! Migration session: the coordinating layer over pool, table and wizard.
//!
//! One session is one user's migration in progress. All mutation happens
//! through `&mut self`, which makes the one-owner rule explicit; embedders
//! that expose a session over a network boundary must keep it behind a
//! per-session mutual-exclusion scope.

use bcm_ingest::{AuthContext, CsvUpload, IngestBackend, IngestError, ParsedCsv};
use bcm_map::{HeaderPool, MapError, MappingTable};
use bcm_model::{FieldId, HeaderId, Notice, NotificationSink, Platform, TargetSchema};
use tracing::{debug, info};

use crate::error::{Result, WizardError};
use crate::step::{Wizard, WizardStep};

/// Token for one ingestion attempt.
///
/// Consumed by [`MigrationSession::complete_ingestion`]; a ticket whose
/// generation no longer matches the session's outstanding attempt is stale
/// and its result is discarded.
#[derive(Debug)]
pub struct IngestTicket {
    generation: u64,
}

/// What became of a completed ingestion attempt.
#[derive(Debug)]
pub enum IngestOutcome {
    /// Headers were loaded into the pool; the wizard advanced to mapping.
    Loaded { columns: usize },
    /// The attempt failed; the wizard is back at the upload step and the
    /// pool is untouched.
    Failed(IngestError),
    /// The ticket was stale (the attempt was abandoned); nothing changed.
    Discarded,
}

/// State holder for one guided migration.
pub struct MigrationSession<S: NotificationSink> {
    schema: TargetSchema,
    wizard: Wizard,
    pool: HeaderPool,
    table: MappingTable,
    upload: Option<CsvUpload>,
    /// Monotonically increasing ingestion attempt counter.
    generation: u64,
    /// Generation of the outstanding attempt, if any.
    in_flight: Option<u64>,
    sink: S,
}

impl<S: NotificationSink> MigrationSession<S> {
    pub fn new(schema: TargetSchema, sink: S) -> Self {
        let table = MappingTable::for_schema(&schema);
        Self {
            schema,
            wizard: Wizard::new(),
            pool: HeaderPool::new(),
            table,
            upload: None,
            generation: 0,
            in_flight: None,
            sink,
        }
    }

    pub fn schema(&self) -> &TargetSchema {
        &self.schema
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn pool(&self) -> &HeaderPool {
        &self.pool
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // --- step 1: platform ---------------------------------------------------

    pub fn select_platform(&mut self, platform: Platform) -> Result<()> {
        self.wizard.select_platform(platform)
    }

    pub fn continue_to_upload(&mut self) -> Result<()> {
        self.wizard.advance_to_upload()
    }

    // --- step 2: upload / ingestion -----------------------------------------

    /// Record the selected CSV file.
    pub fn select_file(&mut self, upload: CsvUpload) -> Result<()> {
        self.wizard.select_file(upload.file_name().to_string())?;
        self.upload = Some(upload);
        Ok(())
    }

    /// Start an ingestion attempt.
    ///
    /// Rejects with [`WizardError::IngestionInProgress`] while another
    /// attempt is outstanding; the upload control stays disabled from the
    /// same check via [`MigrationSession::ingestion_in_flight`].
    pub fn begin_ingestion(&mut self) -> Result<IngestTicket> {
        if self.in_flight.is_some() {
            return Err(WizardError::IngestionInProgress);
        }
        self.wizard.begin_upload()?;
        self.generation += 1;
        self.in_flight = Some(self.generation);
        debug!(generation = self.generation, "ingestion attempt started");
        Ok(IngestTicket {
            generation: self.generation,
        })
    }

    pub fn ingestion_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Deliver the result of an ingestion attempt.
    ///
    /// A stale ticket (the attempt was abandoned before the response came
    /// back) is discarded without touching pool, table or wizard. On
    /// success the pool is regenerated wholesale and all bindings from the
    /// previous import are dropped; on failure everything previously
    /// loaded stays as it was.
    pub fn complete_ingestion(
        &mut self,
        ticket: IngestTicket,
        result: std::result::Result<ParsedCsv, IngestError>,
    ) -> Result<IngestOutcome> {
        if self.in_flight != Some(ticket.generation) {
            debug!(
                generation = ticket.generation,
                "discarding stale ingestion result"
            );
            return Ok(IngestOutcome::Discarded);
        }
        self.in_flight = None;

        match result {
            Ok(parsed) => {
                let columns = parsed.headers.len();
                self.pool.load(parsed.headers)?;
                self.table = MappingTable::for_schema(&self.schema);
                self.wizard.finish_upload(true)?;
                let message = if parsed.message.is_empty() {
                    format!("Found {columns} columns in the uploaded CSV")
                } else {
                    parsed.message
                };
                info!(columns, "ingestion succeeded");
                self.sink.notify(Notice::info(message));
                Ok(IngestOutcome::Loaded { columns })
            }
            Err(error) => {
                self.wizard.finish_upload(false)?;
                self.sink.notify(Notice::error(error.user_message()));
                Ok(IngestOutcome::Failed(error))
            }
        }
    }

    /// Run a full ingestion round trip against a backend.
    pub fn ingest(
        &mut self,
        backend: &dyn IngestBackend,
        auth: &AuthContext,
    ) -> Result<IngestOutcome> {
        let upload = self.upload.clone().ok_or(WizardError::FileRequired)?;
        let ticket = self.begin_ingestion()?;
        let result = backend.parse_csv(auth, &upload);
        self.complete_ingestion(ticket, result)
    }

    // --- navigation ---------------------------------------------------------

    /// Navigate one step back. Entered data is preserved; backing out of
    /// an in-flight upload abandons it so the late response is discarded.
    pub fn back(&mut self) {
        if self.step() == WizardStep::Uploading {
            self.in_flight = None;
            debug!("in-flight ingestion abandoned");
        }
        self.wizard.back();
    }

    // --- step 3: mapping ----------------------------------------------------

    /// Consume a pool header and bind it to a target field. If the field
    /// was already mapped, the previous header returns to the pool.
    ///
    /// The field id is checked against the schema before the header leaves
    /// the pool, so a refused bind never strands a header.
    pub fn map_header(&mut self, field_id: &FieldId, header_id: &HeaderId) -> Result<()> {
        self.require_mapping_step()?;
        if !self.schema.contains(field_id) {
            return Err(MapError::UnknownTargetField(field_id.clone()).into());
        }
        let header = self.pool.take(header_id)?;
        if let Some(evicted) = self.table.bind(field_id, header)? {
            self.pool.restore(evicted)?;
        }
        Ok(())
    }

    /// Unbind a field and return its header to the pool.
    pub fn unmap(&mut self, field_id: &FieldId) -> Result<()> {
        self.require_mapping_step()?;
        let header = self.table.unbind(field_id)?;
        self.pool.restore(header)?;
        Ok(())
    }

    /// Drop every binding and return all headers to the pool. The wizard
    /// stays at its current step.
    pub fn reset_mapping(&mut self) -> Result<()> {
        let restored = self.table.clear();
        let count = restored.len();
        for header in restored {
            self.pool.restore(header)?;
        }
        info!(restored = count, "mapping reset");
        self.sink.notify(Notice::info("Mapping reset"));
        Ok(())
    }

    // --- progress -----------------------------------------------------------

    pub fn mapped_count(&self) -> usize {
        self.table.bound_count()
    }

    pub fn total_field_count(&self) -> usize {
        self.schema.total_field_count()
    }

    /// Fraction of target fields mapped, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.total_field_count();
        if total == 0 {
            return 0.0;
        }
        self.mapped_count() as f64 / total as f64
    }

    /// Required fields that are still unmapped.
    pub fn missing_required_fields(&self) -> Vec<FieldId> {
        self.schema
            .required_field_ids()
            .into_iter()
            .filter(|id| !self.table.is_bound(id))
            .collect()
    }

    /// Whether the "continue" action is enabled at the current step. At
    /// the mapping step this requires every required field to be bound.
    pub fn can_continue(&self) -> bool {
        match self.step() {
            WizardStep::Mapping => self.missing_required_fields().is_empty(),
            _ => self.wizard.can_continue(),
        }
    }

    fn require_mapping_step(&self) -> Result<()> {
        if self.step() == WizardStep::Mapping {
            Ok(())
        } else {
            Err(WizardError::StepMismatch {
                expected: WizardStep::Mapping,
                actual: self.step(),
            })
        }
    }
}
