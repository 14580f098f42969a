//! Evseq: Event Sequence Recording and Validation for UI Input
//!
//! Evseq records the notifications an interactive target raises during a
//! single user gesture (hover, press, move, release, tap, click) and checks
//! the recorded order against a compact grammar of quantified event kinds.
//! Which grammar applies depends on the pointing device, the kind of target
//! and the platform's suppression quirks, so the expectations live in a data
//! table rather than in branching code.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     EVSEQ Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Target     │    │ Recorder   │    │ Sequence   │            │
//! │   │ (channels) │───►│ (mask,     │───►│ Buffer     │            │
//! │   │            │    │  normalize)│    │            │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │                   │
//! │   ┌────────────┐    ┌────────────┐          ▼                   │
//! │   │ Grammar    │───►│ Validator  │◄─── records, one pass        │
//! │   │ Table      │    │ (greedy)   │                              │
//! │   └────────────┘    └────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use evseq::prelude::*;
//! use std::rc::Rc;
//!
//! let target = Rc::new(SimulatedTarget::new("tap", TargetShape::Element));
//! let buffer = SequenceBuffer::new("tap");
//! let _subscription = EventRecorder::new().attach(
//!     &target,
//!     CategoryMask::POINTER | CategoryMask::GESTURE,
//!     &buffer,
//! );
//!
//! for kind in [
//!     EventKind::Entered,
//!     EventKind::Pressed,
//!     EventKind::Released,
//!     EventKind::Tapped,
//!     EventKind::Exited,
//! ] {
//!     target.raise(kind, PointerDeviceType::Touch);
//! }
//!
//! let table = GrammarTable::for_platform(Platform::Android);
//! let grammar = table.lookup(PointerDeviceType::Touch, TargetShape::Element).unwrap();
//! assert!(validate(&buffer, grammar));
//! ```

#![warn(missing_docs)]

mod buffer;
mod category;
mod config;
mod event;
mod grammar;
mod recorder;
mod result;
mod scenario;
mod table;
mod target;
mod trace;
mod validator;

pub use buffer::SequenceBuffer;
pub use category::CategoryMask;
pub use config::{EvseqConfig, GrammarOverride};
pub use event::{
    ActivationSource, DeviceClass, EventFamily, EventKind, EventPayload, EventRecord,
    GesturePayload, InputProfile, Point, PointerDeviceType, PointerPayload,
};
pub use grammar::{Ambiguity, Grammar, Quantifier, Term};
pub use recorder::{EventRecorder, Subscription};
pub use result::{EvseqError, EvseqResult};
pub use scenario::{EventsSequencesPage, Scenario, TrialOutcome, NO_RESULT};
pub use table::{GrammarTable, Platform};
pub use target::{InteractiveTarget, Listener, ListenerId, SimulatedTarget, TargetShape};
pub use trace::Trace;
pub use validator::{check, check_records, validate, Failure, SequenceValidator, ValidationReport};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::buffer::*;
    pub use super::category::*;
    pub use super::config::*;
    pub use super::event::*;
    pub use super::grammar::*;
    pub use super::recorder::*;
    pub use super::result::*;
    pub use super::scenario::*;
    pub use super::table::*;
    pub use super::target::*;
    pub use super::trace::*;
    pub use super::validator::*;
}
