//! # readmate Session
//!
//! The scroll-driven page-translation core: content location, paragraph
//! extraction, the resumable batch-by-batch session state machine, the
//! level-triggered scroll scheduler, and the overlay presenter.
//!
//! Everything here runs on one thread with the page document; the only
//! suspension point is the batch round-trip behind [`BlockTranslator`].
//!
//! [`BlockTranslator`]: readmate_protocols::BlockTranslator

pub mod controller;
pub mod extract;
pub mod locator;
pub mod presenter;
pub mod scheduler;
pub mod session;

pub use controller::PageController;
pub use extract::{TranslatableUnit, extract_units};
pub use locator::locate_best_container;
pub use presenter::{OverlayPresenter, Presenter, RecordingPresenter};
pub use scheduler::ScrollScheduler;
pub use session::{BatchOutcome, CancelHandle, StartReport, TranslationSession};
