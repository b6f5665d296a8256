//! Presentation adapter: progress, completion and error overlays.

use std::cell::RefCell;
use std::time::Duration;

use readmate_dom::page::{append_child, create_element, set_attr, set_text_content};
use readmate_dom::{Handle, Page};
use readmate_protocols::types::overlay;
use tracing::debug;

/// Auto-dismiss delay for the completion toast.
pub const TOAST_DISMISS: Duration = Duration::from_secs(3);

/// Auto-dismiss delay for the error popup.
pub const ERROR_DISMISS: Duration = Duration::from_secs(5);

/// Sink for user-visible session feedback.
///
/// Implementations are fire-and-forget; the session never reads back.
pub trait Presenter {
    /// Progress through the work list: `done_through` units covered once the
    /// submitted batch lands, out of `total`.
    fn show_progress(&self, done_through: usize, total: usize);

    fn hide_progress(&self);

    fn show_completion(&self);

    fn show_error(&self, message: &str);
}

/// Presenter rendering overlays into the page document under fixed element
/// ids. Inserting an overlay removes any prior instance with the same id, so
/// at most one of each exists. Overlays that auto-dismiss carry their delay
/// in a `data-dismiss-ms` attribute for the host loop to enforce; the engine
/// owns no timer.
pub struct OverlayPresenter {
    document: Handle,
    body: Handle,
}

impl OverlayPresenter {
    pub fn new(page: &Page) -> Self {
        Self {
            document: page.document(),
            body: page.body(),
        }
    }

    fn remove_by_id(&self, id: &str) {
        if let Some(element) = readmate_dom::page::elements(&self.document)
            .into_iter()
            .find(|el| readmate_dom::page::attr(el, "id").as_deref() == Some(id))
        {
            readmate_dom::page::detach(&element);
        }
    }

    fn insert_overlay(&self, id: &str, text: &str, dismiss: Option<Duration>) {
        self.remove_by_id(id);
        let element = create_element("div", Some(id));
        set_text_content(&element, text);
        if let Some(delay) = dismiss {
            set_attr(&element, "data-dismiss-ms", &delay.as_millis().to_string());
        }
        append_child(&self.body, &element);
    }
}

impl Presenter for OverlayPresenter {
    fn show_progress(&self, done_through: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            (done_through * 100) / total
        };
        self.insert_overlay(
            overlay::PROGRESS,
            &format!("Translating: {percent}% ({done_through}/{total})"),
            None,
        );
    }

    fn hide_progress(&self) {
        self.remove_by_id(overlay::PROGRESS);
    }

    fn show_completion(&self) {
        self.insert_overlay(overlay::COMPLETE_TOAST, "Translation complete", Some(TOAST_DISMISS));
    }

    fn show_error(&self, message: &str) {
        debug!(message, "showing error popup");
        self.insert_overlay(overlay::AI_POPUP, message, Some(ERROR_DISMISS));
        self.insert_overlay(overlay::AI_OVERLAY, "", Some(ERROR_DISMISS));
    }
}

impl<P: Presenter + ?Sized> Presenter for std::rc::Rc<P> {
    fn show_progress(&self, done_through: usize, total: usize) {
        (**self).show_progress(done_through, total);
    }

    fn hide_progress(&self) {
        (**self).hide_progress();
    }

    fn show_completion(&self) {
        (**self).show_completion();
    }

    fn show_error(&self, message: &str) {
        (**self).show_error(message);
    }
}

/// Feedback event recorded by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Progress { done_through: usize, total: usize },
    HideProgress,
    Completion,
    Error(String),
}

/// In-memory presenter for tests.
#[derive(Default)]
pub struct RecordingPresenter {
    events: RefCell<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.borrow().clone()
    }

    pub fn completion_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, PresenterEvent::Completion))
            .count()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn show_progress(&self, done_through: usize, total: usize) {
        self.events
            .borrow_mut()
            .push(PresenterEvent::Progress { done_through, total });
    }

    fn hide_progress(&self) {
        self.events.borrow_mut().push(PresenterEvent::HideProgress);
    }

    fn show_completion(&self) {
        self.events.borrow_mut().push(PresenterEvent::Completion);
    }

    fn show_error(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(PresenterEvent::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readmate_dom::page::{attr, text_content};

    #[test]
    fn test_progress_overlay_replaces_prior_instance() {
        let page = Page::parse("<body><p>content</p></body>");
        let presenter = OverlayPresenter::new(&page);

        presenter.show_progress(25, 60);
        presenter.show_progress(50, 60);

        let indicator = page
            .element_by_id(overlay::PROGRESS)
            .expect("indicator present");
        assert_eq!(text_content(&indicator), "Translating: 83% (50/60)");

        let count = readmate_dom::page::elements(&page.document())
            .iter()
            .filter(|el| attr(el, "id").as_deref() == Some(overlay::PROGRESS))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_hide_progress_removes_indicator() {
        let page = Page::parse("<body></body>");
        let presenter = OverlayPresenter::new(&page);
        presenter.show_progress(25, 60);
        presenter.hide_progress();
        assert!(page.element_by_id(overlay::PROGRESS).is_none());
        // Hiding again is a no-op.
        presenter.hide_progress();
    }

    #[test]
    fn test_toast_and_error_carry_dismiss_delay() {
        let page = Page::parse("<body></body>");
        let presenter = OverlayPresenter::new(&page);

        presenter.show_completion();
        let toast = page.element_by_id(overlay::COMPLETE_TOAST).unwrap();
        assert_eq!(attr(&toast, "data-dismiss-ms").as_deref(), Some("3000"));

        presenter.show_error("Translation failed");
        let popup = page.element_by_id(overlay::AI_POPUP).unwrap();
        assert_eq!(text_content(&popup), "Translation failed");
        assert_eq!(attr(&popup, "data-dismiss-ms").as_deref(), Some("5000"));
        assert!(page.element_by_id(overlay::AI_OVERLAY).is_some());
    }

    #[test]
    fn test_recording_presenter_counts_completions() {
        let presenter = RecordingPresenter::new();
        presenter.show_progress(25, 60);
        presenter.show_completion();
        presenter.show_error("boom");
        assert_eq!(presenter.completion_count(), 1);
        assert_eq!(presenter.errors(), vec!["boom".to_string()]);
        assert_eq!(presenter.events().len(), 3);
    }
}
