//! Frequency Spec Commands and Events
//!
//! Defines the messages exchanged between the presentation layer and the
//! frequency spec core. Commands replace widget event plumbing; events tell
//! the presentation layer what to refresh or highlight.

use crate::error::ParseError;
use crate::specs::{FreqSpecName, FreqUnit, ValidationWarning};

use super::freq_specs::FieldStatus;

/// Commands sent from the presentation layer to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum FreqSpecCommand {
    /// Replace the active parameter set after a filter topology change.
    UpdateActiveSet {
        /// Parameter names in slot order.
        names: Vec<String>,
        /// Status tag applied to every active field.
        status: FieldStatus,
    },

    /// Store the text entered into a field.
    CommitEdit {
        /// Parameter being edited.
        name: String,
        /// Text as entered, in the active display unit.
        raw_text: String,
        /// Text to redisplay if `raw_text` can't be evaluated.
        previous_raw_text: String,
    },

    /// The sampling frequency changed (Hz).
    SamplingFrequencyChanged(f64),

    /// The display unit changed.
    UnitChanged(FreqUnit),

    /// Toggle ascending ordering of the active specs.
    SetSortEnabled(bool),

    /// Toggle keeping absolute frequencies across sampling frequency changes.
    SetFreqLocked(bool),
}

/// Events sent from the core to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FreqSpecEvent {
    /// Stored frequency specs changed (edit committed or locked rescale).
    SpecsChanged,

    /// A committed edit couldn't be evaluated; the store is unchanged.
    EditRejected {
        /// The field that was edited.
        name: FreqSpecName,
        /// Why evaluation failed.
        error: ParseError,
        /// Text the field should show again.
        restore_text: String,
    },

    /// Non-fatal validation finding, used to highlight fields.
    Warning(ValidationWarning),
}
