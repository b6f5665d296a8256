//! The resumable translation session state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use readmate_dom::page::set_text_content;
use readmate_dom::{FlowMetrics, Page, UnitBox};
use readmate_protocols::{BlockTranslator, ContentError};
use tracing::{debug, info, warn};

use crate::extract::{TranslatableUnit, extract_units};
use crate::locator::locate_best_container;
use crate::presenter::Presenter;

/// Units per remote exchange.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Synchronous answer to `start`, before any batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartReport {
    pub total: usize,
    pub translated: usize,
}

/// Outcome of one `translate_next_batch` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Guard no-op: a batch was in flight or the session is not enabled.
    Skipped,
    /// Cursor was already past the end; the session completed.
    Completed,
    /// One batch landed and its units were written to the page.
    Translated { units: usize },
    /// The batch failed; the session disabled itself. No rollback.
    Failed { error: String },
    /// The result arrived after a stop/restore and was thrown away.
    Discarded,
}

/// Cancels a session from outside the current call chain, e.g. while a
/// batch round-trip is still in flight. The in-flight call re-checks the
/// flag when the result arrives and discards it instead of touching the
/// page; full teardown still goes through [`TranslationSession::stop`].
#[derive(Clone)]
pub struct CancelHandle {
    enabled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn stop(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

/// One translation run over a page, from `start` to stop/restore/completion.
///
/// At most one batch is ever in flight: `in_flight` is checked synchronously
/// before the single suspension point, and every trigger runs on the same
/// cooperative thread as the page.
pub struct TranslationSession {
    enabled: Arc<AtomicBool>,
    in_flight: bool,
    target_language: String,
    /// Completed batch count; batch `cursor` covers units
    /// `[cursor * batch_size, (cursor + 1) * batch_size)`.
    cursor: usize,
    translated_count: usize,
    batch_size: usize,
    units: Vec<TranslatableUnit>,
    boxes: Vec<UnitBox>,
    scroll_watch: bool,
    completion_shown: bool,
}

impl TranslationSession {
    /// Locate the content container, extract the work list, and initialize
    /// session state. Returns before any remote call; the caller triggers
    /// the first batch.
    pub fn start(
        page: &Page,
        target_language: impl Into<String>,
        metrics: &FlowMetrics,
    ) -> Result<Self, ContentError> {
        let container = locate_best_container(page)?;
        let units = extract_units(&container)?;
        let boxes = metrics.estimate_boxes(units.iter().map(|unit| unit.original_text.as_str()));
        let target_language = target_language.into();

        info!(units = units.len(), %target_language, "translation session started");

        Ok(Self {
            enabled: Arc::new(AtomicBool::new(true)),
            in_flight: false,
            target_language,
            cursor: 0,
            translated_count: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            units,
            boxes,
            scroll_watch: true,
            completion_shown: false,
        })
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn report(&self) -> StartReport {
        StartReport {
            total: self.units.len(),
            translated: self.translated_count,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            enabled: self.enabled.clone(),
        }
    }

    pub fn total_units(&self) -> usize {
        self.units.len()
    }

    pub fn translated_count(&self) -> usize {
        self.translated_count
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn watches_scroll(&self) -> bool {
        self.scroll_watch
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    /// Index of the last unit covered by the most recently completed batch.
    /// `None` until the first batch succeeds, which keeps the scroll
    /// scheduler from firing prematurely.
    pub fn last_completed_unit(&self) -> Option<usize> {
        let covered = (self.cursor * self.batch_size).min(self.units.len());
        covered.checked_sub(1)
    }

    /// Estimated geometry for a unit.
    pub fn unit_box(&self, index: usize) -> Option<UnitBox> {
        self.boxes.get(index).copied()
    }

    /// Estimated bottom edge of the last unit, i.e. how far a viewport
    /// sweep has to scroll to cover the whole work list.
    pub fn content_height(&self) -> f32 {
        self.boxes.last().map(|unit| unit.bottom).unwrap_or(0.0)
    }

    /// Submit the next contiguous batch.
    ///
    /// Silently returns when a batch is already in flight or the session is
    /// disabled; completes the session when the cursor is past the end.
    /// `enabled` is re-checked after the round-trip resolves, so a result
    /// arriving after `stop`/`restore_original` is discarded instead of
    /// mutating the page.
    pub async fn translate_next_batch(
        &mut self,
        page: &Page,
        translator: &dyn BlockTranslator,
        presenter: &dyn Presenter,
    ) -> BatchOutcome {
        if self.in_flight || !self.is_enabled() {
            return BatchOutcome::Skipped;
        }

        let start = self.cursor * self.batch_size;
        let total = self.units.len();
        if start >= total {
            self.complete(presenter);
            return BatchOutcome::Completed;
        }
        let end = (start + self.batch_size).min(total);

        self.in_flight = true;
        presenter.show_progress(end, total);

        let paragraphs: Vec<String> = self.units[start..end]
            .iter()
            .map(|unit| unit.current_text.clone())
            .collect();

        debug!(start, end, total, "submitting batch");
        let result = translator
            .translate_block(&paragraphs, &self.target_language)
            .await;

        self.in_flight = false;

        if !self.is_enabled() {
            // Cancelled while the batch was in flight.
            debug!(start, end, "discarding late batch result");
            presenter.hide_progress();
            return BatchOutcome::Discarded;
        }

        match result {
            Ok(translations) => {
                for (offset, translation) in translations.iter().take(end - start).enumerate() {
                    self.apply_translation(page, start + offset, translation);
                }
                self.cursor += 1;
                presenter.hide_progress();
                debug!(
                    translated = self.translated_count,
                    cursor = self.cursor,
                    "batch applied"
                );
                BatchOutcome::Translated { units: end - start }
            }
            Err(err) => {
                warn!(error = %err, "batch translation failed, disabling session");
                presenter.hide_progress();
                presenter.show_error(&format!("Translation error: {err}"));
                self.disable();
                BatchOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }

    fn apply_translation(&mut self, page: &Page, index: usize, translation: &str) {
        let unit = &mut self.units[index];
        match unit.element.upgrade() {
            Some(element) if page.is_attached(&element) => {
                set_text_content(&element, translation);
            }
            _ => {
                // The element went away under us; keep the unit's record
                // consistent but leave the page alone.
                debug!(index, "unit element detached, skipping DOM write");
            }
        }
        unit.current_text = translation.to_string();
        unit.translated = true;
        self.translated_count += 1;
    }

    fn complete(&mut self, presenter: &dyn Presenter) {
        self.disable();
        self.scroll_watch = false;
        if !self.completion_shown {
            info!(translated = self.translated_count, "translation complete");
            presenter.show_completion();
            self.completion_shown = true;
        }
    }

    /// Disable the session, keeping translated text in place. Idempotent.
    pub fn stop(&mut self, presenter: &dyn Presenter) {
        self.disable();
        self.in_flight = false;
        self.scroll_watch = false;
        presenter.hide_progress();
    }

    /// Write every translated unit's original text back, then stop and
    /// reset the counters. Idempotent; safe with zero translated units.
    pub fn restore_original(&mut self, page: &Page, presenter: &dyn Presenter) {
        for unit in &mut self.units {
            if !unit.translated {
                continue;
            }
            if let Some(element) = unit.element.upgrade() {
                if page.is_attached(&element) {
                    set_text_content(&element, &unit.original_text);
                }
            }
            unit.current_text = unit.original_text.clone();
            unit.translated = false;
        }
        self.stop(presenter);
        self.translated_count = 0;
        self.cursor = 0;
        info!("original text restored");
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
