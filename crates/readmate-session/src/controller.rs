//! Per-page controller: owns the document, the active session, and the
//! content-side half of the action contract.

use std::sync::Arc;

use readmate_dom::{FlowMetrics, Page, Viewport};
use readmate_protocols::types::overlay;
use readmate_protocols::{BlockTranslator, Request, Response, SessionError, TextSettings, Theme};
use readmate_style::{text_settings_css, theme_css};
use tracing::{debug, info};

use crate::locator::locate_best_container;
use crate::presenter::{OverlayPresenter, Presenter};
use crate::scheduler::ScrollScheduler;
use crate::session::{BatchOutcome, DEFAULT_BATCH_SIZE, StartReport, TranslationSession};

/// Owns one page and everything that happens to it. One controller per
/// document context; a navigation tears the whole thing down.
pub struct PageController {
    page: Page,
    translator: Arc<dyn BlockTranslator>,
    presenter: Box<dyn Presenter>,
    session: Option<TranslationSession>,
    scheduler: ScrollScheduler,
    metrics: FlowMetrics,
    batch_size: usize,
}

impl PageController {
    pub fn new(page: Page, translator: Arc<dyn BlockTranslator>) -> Self {
        let presenter = Box::new(OverlayPresenter::new(&page));
        Self::with_presenter(page, translator, presenter)
    }

    pub fn with_presenter(
        page: Page,
        translator: Arc<dyn BlockTranslator>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            page,
            translator,
            presenter,
            session: None,
            scheduler: ScrollScheduler::default(),
            metrics: FlowMetrics::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Current progress, if a session exists.
    pub fn progress(&self) -> Option<StartReport> {
        self.session.as_ref().map(|session| session.report())
    }

    /// Handle for cancelling the active session from outside this
    /// controller's call chain (e.g. while a batch is in flight).
    pub fn cancel_handle(&self) -> Option<crate::session::CancelHandle> {
        self.session.as_ref().map(|session| session.cancel_handle())
    }

    /// Estimated document height of the session's work list.
    pub fn content_height(&self) -> Option<f32> {
        self.session.as_ref().map(|session| session.content_height())
    }

    fn session_active(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.is_enabled() || session.is_in_flight())
    }

    /// Start a translation session and trigger its first batch.
    ///
    /// The returned report is captured before the first batch lands, so it
    /// always reads `translated: 0`; translation proceeds as the host keeps
    /// polling [`Self::poll_scroll`].
    pub async fn start_translation(
        &mut self,
        target_language: &str,
    ) -> Result<StartReport, SessionError> {
        if self.session_active() {
            return Err(SessionError::AlreadyActive);
        }

        let mut session = TranslationSession::start(&self.page, target_language, &self.metrics)?
            .with_batch_size(self.batch_size);
        let report = session.report();

        session
            .translate_next_batch(&self.page, self.translator.as_ref(), self.presenter.as_ref())
            .await;

        self.session = Some(session);
        Ok(report)
    }

    /// One scheduler tick: fetch the next batch when the viewport warrants
    /// it. Returns `None` when the condition does not hold.
    pub async fn poll_scroll(&mut self, viewport: &Viewport) -> Option<BatchOutcome> {
        let session = self.session.as_mut()?;
        if !self.scheduler.should_fetch(session, viewport) {
            return None;
        }
        Some(
            session
                .translate_next_batch(&self.page, self.translator.as_ref(), self.presenter.as_ref())
                .await,
        )
    }

    /// Disable the active session, keeping translated text. Idempotent.
    pub fn stop_translation(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop(self.presenter.as_ref());
        }
    }

    /// Restore original text and tear the session state down. Idempotent.
    pub fn restore_original(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.restore_original(&self.page, self.presenter.as_ref());
        }
    }

    /// Apply (or clear, for `default`) a page theme.
    pub fn apply_theme(&self, theme: &Theme, theme_name: &str) {
        self.page.remove_element_by_id(overlay::THEME_STYLE);
        if theme_name == "default" {
            debug!("theme cleared");
            return;
        }
        self.page
            .ensure_style(overlay::THEME_STYLE, &theme_css(theme));
        info!(theme = theme_name, "theme applied");
    }

    /// Apply text formatting to the best content container.
    pub fn apply_text_settings(&self, settings: &TextSettings) {
        self.page.remove_element_by_id(overlay::TEXT_STYLE);
        for element in readmate_dom::page::elements(&self.page.document()) {
            readmate_dom::page::remove_class(&element, overlay::ENHANCED_CLASS);
        }
        if !settings.enabled {
            return;
        }
        // Same deterministic container choice as translation.
        let Ok(container) = locate_best_container(&self.page) else {
            return;
        };
        readmate_dom::page::add_class(&container, overlay::ENHANCED_CLASS);
        self.page
            .ensure_style(overlay::TEXT_STYLE, &text_settings_css(settings));
    }

    /// Dispatch one content-side action.
    pub async fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::StartPageTranslation { target_language } => {
                match self.start_translation(&target_language).await {
                    Ok(report) => Response::start_report(report.total, report.translated),
                    Err(err) => Response::failure(err.to_string()),
                }
            }
            Request::StopTranslation => {
                self.stop_translation();
                Response::ok()
            }
            Request::RestoreOriginal => {
                self.restore_original();
                Response::ok()
            }
            Request::ApplyTheme { theme, theme_name } => {
                self.apply_theme(&theme, &theme_name);
                Response::ok()
            }
            Request::ApplyTextSettings { settings } => {
                self.apply_text_settings(&settings);
                Response::ok()
            }
            _ => Response::failure("Unknown action"),
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
