//! # readmate DOM
//!
//! The page document arena: a mutable HTML document tree with non-owning
//! element handles, attachment re-validation, and a flow-layout estimator
//! supplying the geometry the scroll scheduler consumes.
//!
//! The live tree is reference-counted; features hold [`ElementRef`] weak
//! handles and must re-validate attachment before writing, since another
//! feature (or a page teardown) may have detached the element in between.

pub mod geom;
pub mod page;

pub use geom::{FlowMetrics, UnitBox, Viewport};
pub use page::{ElementRef, Page};

// Re-export the underlying handle type for callers that traverse directly.
pub use markup5ever_rcdom::Handle;
