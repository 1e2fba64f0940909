//! The frequency spec core.
//!
//! [`FreqSpecs`] owns the store, the sampling context and the active set. Each
//! public operation is one transaction: write, sort, validate, then queue the
//! events the presentation layer needs to refresh its fields.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::commands::{FreqSpecCommand, FreqSpecEvent};
use crate::error::{FreqSpecError, Result};
use crate::persistence::{FreqSpecsConfig, PersistenceResult, SpecSnapshot};
use crate::specs::{
    change_sampling_frequency, check_range, check_separation, evaluate, from_display, sort,
    to_display, ActiveSpecSet, DisplayFormat, FreqSpecName, FreqUnit, RangeState,
    SamplingContext, SeparationReport, SpecStore, ValidationWarning,
};

/// Events kept before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Status tag the presentation layer assigns to the active fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    #[default]
    Normal,
    /// Specs differ from the current design.
    Changed,
    /// Field is shown but not used by the design method.
    Unused,
    /// Value is invalid.
    Failed,
}

/// One active field, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayRow {
    pub name: FreqSpecName,
    pub label: String,
    pub text: String,
    pub status: FieldStatus,
}

/// A field that currently has input focus.
#[derive(Clone, Debug, PartialEq)]
struct EditSession {
    name: FreqSpecName,
    edited: bool,
}

/// Frequency spec state for one design session.
///
/// Operations queue [`FreqSpecEvent`]s for the presentation layer, which is
/// expected to call [`FreqSpecs::drain_events`] after each one. At most
/// [`MAX_PENDING_EVENTS`] are kept; when a caller falls behind the oldest
/// events are discarded.
#[derive(Debug)]
pub struct FreqSpecs {
    config: FreqSpecsConfig,
    context: SamplingContext,
    store: SpecStore,
    active: ActiveSpecSet,
    status: FieldStatus,
    separation: SeparationReport,
    edit: Option<EditSession>,
    events: VecDeque<FreqSpecEvent>,
}

impl FreqSpecs {
    /// Creates an empty session with the given sampling context.
    pub fn new(config: FreqSpecsConfig, context: SamplingContext) -> Self {
        Self {
            config,
            context,
            store: SpecStore::new(),
            active: ActiveSpecSet::default(),
            status: FieldStatus::Normal,
            separation: SeparationReport::default(),
            edit: None,
            events: VecDeque::new(),
        }
    }

    /// Creates a session with default config at sampling frequency `f_s` (Hz).
    pub fn with_sampling_frequency(f_s: f64) -> Result<Self> {
        Ok(Self::new(FreqSpecsConfig::default(), SamplingContext::new(f_s)?))
    }

    pub fn config(&self) -> &FreqSpecsConfig {
        &self.config
    }

    pub fn context(&self) -> &SamplingContext {
        &self.context
    }

    pub fn store(&self) -> &SpecStore {
        &self.store
    }

    pub fn active(&self) -> &ActiveSpecSet {
        &self.active
    }

    /// Collision groups found by the last validation pass.
    pub fn separation(&self) -> &SeparationReport {
        &self.separation
    }

    /// Takes all queued events.
    pub fn drain_events(&mut self) -> Vec<FreqSpecEvent> {
        self.events.drain(..).collect()
    }

    /// Dispatches a command to the matching operation.
    pub fn apply(&mut self, command: FreqSpecCommand) -> Result<()> {
        match command {
            FreqSpecCommand::UpdateActiveSet { names, status } => {
                self.update_active_set(names.as_slice(), status)
            }
            FreqSpecCommand::CommitEdit {
                name,
                raw_text,
                previous_raw_text,
            } => self
                .commit_edit(&name, &raw_text, &previous_raw_text)
                .map(|_| ()),
            FreqSpecCommand::SamplingFrequencyChanged(f_s) => self.on_sampling_frequency_changed(f_s),
            FreqSpecCommand::UnitChanged(unit) => {
                self.on_unit_changed(unit);
                Ok(())
            }
            FreqSpecCommand::SetSortEnabled(enabled) => self.set_sort_enabled(enabled),
            FreqSpecCommand::SetFreqLocked(locked) => {
                self.set_freq_locked(locked);
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Replaces the active set.
    ///
    /// Names seen for the first time are created with their preset value.
    /// Existing parameters keep their stored value. The new set is sorted (if
    /// enabled) and validated.
    pub fn update_active_set<S: AsRef<str>>(&mut self, names: &[S], status: FieldStatus) -> Result<()> {
        let active = ActiveSpecSet::parse(names)?;
        for name in active.iter() {
            let initial = self.config.initial_value(name);
            self.store.get_or_insert(name, initial);
        }

        log::debug!(
            "update_active_set: [{}] ({:?})",
            active.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(", "),
            status
        );

        if self.edit.as_ref().is_some_and(|e| !active.contains(&e.name)) {
            self.edit = None;
        }
        self.active = active;
        self.status = status;
        self.sort_and_validate()
    }

    /// Evaluates `raw_text` in the display unit and stores it under `name`.
    ///
    /// Returns the normalized value that was entered. Sorting may move it to
    /// another slot afterwards. If the text can't be evaluated the store is
    /// left untouched and an [`FreqSpecEvent::EditRejected`] carrying
    /// `previous_raw_text` is queued.
    pub fn commit_edit(&mut self, name: &str, raw_text: &str, previous_raw_text: &str) -> Result<f64> {
        let name = self.active_name(name)?;

        let value = match evaluate(raw_text, self.config.sign_policy) {
            Ok(value) => value,
            Err(error) => {
                log::warn!("commit_edit: {}: {}", name, error);
                self.push_event(FreqSpecEvent::EditRejected {
                    name,
                    error: error.clone(),
                    restore_text: previous_raw_text.to_string(),
                });
                return Err(error.into());
            }
        };

        let normalized = from_display(value, self.context.f_s, self.context.unit);
        log::debug!("commit_edit: {} = {} ({})", name, normalized, raw_text.trim());
        self.store.set(name, normalized);
        self.sort_and_validate()?;
        self.push_event(FreqSpecEvent::SpecsChanged);
        Ok(normalized)
    }

    /// Applies a new sampling frequency (Hz).
    ///
    /// With `freq_locked` set, normalized values are recalculated so absolute
    /// frequencies stay the same. Fails atomically for non-positive values.
    pub fn on_sampling_frequency_changed(&mut self, new_f_s: f64) -> Result<()> {
        let rescaled =
            change_sampling_frequency(&mut self.context, new_f_s, &self.active, &mut self.store)?;
        if !rescaled.is_empty() {
            self.push_event(FreqSpecEvent::SpecsChanged);
        }
        self.validate()
    }

    /// Switches the display unit. Stored values are not touched.
    pub fn on_unit_changed(&mut self, unit: FreqUnit) {
        log::debug!("on_unit_changed: {} -> {}", self.context.unit, unit);
        self.context.unit = unit;
    }

    /// Enables or disables ascending ordering; enabling sorts immediately.
    pub fn set_sort_enabled(&mut self, enabled: bool) -> Result<()> {
        self.context.freq_specs_sort = enabled;
        self.sort_and_validate()
    }

    /// Sets whether absolute frequencies survive sampling frequency changes.
    pub fn set_freq_locked(&mut self, locked: bool) {
        self.context.freq_locked = locked;
    }

    // ------------------------------------------------------------------
    // Edit sessions
    // ------------------------------------------------------------------

    /// Gives focus to `name` and returns its full precision text.
    pub fn begin_edit(&mut self, name: &str) -> Result<String> {
        let name = self.active_name(name)?;
        let text = self.display_text(&name, true)?;
        self.edit = Some(EditSession {
            name,
            edited: false,
        });
        Ok(text)
    }

    /// Records that the focused field's text was modified.
    pub fn mark_edited(&mut self) {
        if let Some(edit) = &mut self.edit {
            edit.edited = true;
        }
    }

    /// Name of the focused field, if any.
    pub fn editing(&self) -> Option<&FreqSpecName> {
        self.edit.as_ref().map(|e| &e.name)
    }

    /// Reverts pending changes of the focused field.
    ///
    /// The field keeps focus; returns the text it should show, rendered from
    /// the stored value in the current unit.
    pub fn cancel_edit(&mut self) -> Result<Option<String>> {
        let Some(name) = self.editing().cloned() else {
            return Ok(None);
        };
        let text = self.display_text(&name, true)?;
        if let Some(edit) = &mut self.edit {
            edit.edited = false;
        }
        Ok(Some(text))
    }

    /// Ends the edit session, committing `raw_text` if the field was modified.
    ///
    /// Returns the stored normalized value, or `None` if nothing was edited.
    pub fn finish_edit(&mut self, raw_text: &str) -> Result<Option<f64>> {
        let Some(edit) = self.edit.take() else {
            return Ok(None);
        };
        if !edit.edited {
            return Ok(None);
        }
        let restore_text = self.display_text(&edit.name, true)?;
        self.commit_edit(edit.name.as_str(), raw_text, &restore_text)
            .map(Some)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Text for `name` in the current unit.
    ///
    /// Full precision while the field has focus, rounded otherwise.
    pub fn query_display_value(&self, name: &str, has_focus: bool) -> Result<String> {
        self.display_text(&FreqSpecName::new(name)?, has_focus)
    }

    /// Range check of the stored value of `name`.
    pub fn query_validation_state(&self, name: &str) -> Result<RangeState> {
        let name = FreqSpecName::new(name)?;
        Ok(check_range(self.store.get(&name)?))
    }

    /// Status to style the field of `name` with.
    ///
    /// Inactive parameters report `Unused`; a value outside `(0, 0.5)` or in a
    /// collision group reports `Failed`.
    pub fn query_field_status(&self, name: &str) -> Result<FieldStatus> {
        let name = FreqSpecName::new(name)?;
        let value = self.store.get(&name)?;
        let Some(slot) = self.active.position(&name) else {
            return Ok(FieldStatus::Unused);
        };
        if !check_range(value).is_valid() || self.separation.contains(slot) {
            Ok(FieldStatus::Failed)
        } else {
            Ok(self.status)
        }
    }

    /// Label for the field of `name` in the current unit.
    pub fn query_label(&self, name: &str) -> Result<String> {
        Ok(FreqSpecName::new(name)?.label(self.context.unit))
    }

    /// Caption for the current unit (`in kHz`).
    pub fn unit_caption(&self) -> String {
        self.context.unit.caption()
    }

    /// All active fields in slot order.
    pub fn display_rows(&self) -> Result<Vec<DisplayRow>> {
        let focused = self.editing();
        self.active
            .iter()
            .map(|name| {
                Ok(DisplayRow {
                    name: name.clone(),
                    label: name.label(self.context.unit),
                    text: self.display_text(name, focused == Some(name))?,
                    status: self.query_field_status(name.as_str())?,
                })
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Captures the store and sampling context.
    pub fn snapshot(&self) -> SpecSnapshot {
        SpecSnapshot::capture(&self.context, &self.store)
    }

    /// Replaces store and sampling context with a snapshot.
    ///
    /// The active set is kept; names missing from the snapshot get their
    /// preset value.
    pub fn restore(&mut self, snapshot: &SpecSnapshot) -> PersistenceResult<()> {
        let mut store = snapshot.to_store()?;
        for name in self.active.iter() {
            store.get_or_insert(name, self.config.initial_value(name));
        }

        self.store = store;
        self.context = snapshot.context;
        self.context.f_s_prev = self.context.f_s;
        self.edit = None;
        log::debug!("restore: {} specs at f_S = {}", self.store.len(), self.context.f_s);

        // Every active name was inserted above, so validation can't miss one
        if let Err(e) = self.validate() {
            log::warn!("restore: validation failed: {}", e);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn active_name(&self, name: &str) -> Result<FreqSpecName> {
        let name = FreqSpecName::new(name)?;
        if self.active.contains(&name) {
            Ok(name)
        } else {
            Err(FreqSpecError::NotFound(name.to_string()))
        }
    }

    fn display_text(&self, name: &FreqSpecName, has_focus: bool) -> Result<String> {
        let value = to_display(self.store.get(name)?, self.context.f_s, self.context.unit);
        Ok(DisplayFormat::for_focus(has_focus, self.config.significant_digits).format(value))
    }

    /// Sorts the active slots if enabled, then validates.
    fn sort_and_validate(&mut self) -> Result<()> {
        let values = self.store.get_active(&self.active)?;
        let sorted = sort(&self.active, &values, self.context.freq_specs_sort);
        if sorted != values {
            log::debug!("sort_and_validate: {:?} -> {:?}", values, sorted);
            self.store.set_active(&self.active, &sorted);
        }
        self.validate()
    }

    /// Checks range and separation of the active slots and queues warnings.
    fn validate(&mut self) -> Result<()> {
        let values = self.store.get_active(&self.active)?;

        let mut warnings = Vec::new();
        for (name, &value) in self.active.iter().zip(&values) {
            let state = check_range(value);
            if !state.is_valid() {
                let warning = ValidationWarning::OutOfRange {
                    name: name.clone(),
                    state,
                };
                log::warn!("{}", warning.message());
                warnings.push(warning);
            }
        }
        for warning in warnings {
            self.push_event(FreqSpecEvent::Warning(warning));
        }

        self.separation = check_separation(&values, self.config.min_freq_step);
        let mut warnings = Vec::new();
        for group in &self.separation.groups {
            let warning = ValidationWarning::NearDuplicate {
                names: group
                    .iter()
                    .map(|&slot| self.active.names()[slot].clone())
                    .collect(),
                min_step_abs: self.context.to_absolute(self.config.min_freq_step),
            };
            log::warn!("{}", warning.message());
            warnings.push(warning);
        }
        for warning in warnings {
            self.push_event(FreqSpecEvent::Warning(warning));
        }
        Ok(())
    }

    fn push_event(&mut self, event: FreqSpecEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            log::debug!("push_event: queue full, dropping {:?}", self.events.front());
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use approx::assert_relative_eq;

    fn session(f_s: f64, names: &[&str], values: &[f64]) -> FreqSpecs {
        let mut specs = FreqSpecs::with_sampling_frequency(f_s).unwrap();
        specs.update_active_set(names, FieldStatus::Normal).unwrap();
        let active = specs.active().clone();
        specs.store.set_active(&active, values);
        specs.drain_events();
        specs
    }

    fn value(specs: &FreqSpecs, name: &str) -> f64 {
        specs.store().get(&FreqSpecName::new(name).unwrap()).unwrap()
    }

    #[test]
    fn test_update_active_set_creates_presets() {
        let mut specs = FreqSpecs::with_sampling_frequency(1.0).unwrap();
        specs
            .update_active_set(&["F_PB", "F_SB", "F_X1"], FieldStatus::Changed)
            .unwrap();

        assert_eq!(value(&specs, "F_PB"), 0.1);
        assert_eq!(value(&specs, "F_SB"), 0.2);
        assert_eq!(value(&specs, "F_X1"), 0.25);
        assert_eq!(specs.query_field_status("F_SB").unwrap(), FieldStatus::Changed);
    }

    #[test]
    fn test_inactive_values_persist() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.05, 0.3]);
        specs.update_active_set(&["F_C"], FieldStatus::Normal).unwrap();
        assert_eq!(value(&specs, "F_SB"), 0.05);
        assert_eq!(specs.query_field_status("F_SB").unwrap(), FieldStatus::Unused);

        specs.update_active_set(&["F_SB", "F_PB"], FieldStatus::Normal).unwrap();
        assert_eq!(specs.store().get_active(specs.active()).unwrap(), vec![0.05, 0.3]);
    }

    #[test]
    fn test_commit_edit_sorts_slots() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        assert_eq!(specs.commit_edit("F_PB", "0.1", "0.3"), Ok(0.1));

        assert_eq!(value(&specs, "F_SB"), 0.1);
        assert_eq!(value(&specs, "F_PB"), 0.2);
        assert_eq!(specs.query_validation_state("F_SB"), Ok(RangeState::Valid));
        assert_eq!(specs.query_validation_state("F_PB"), Ok(RangeState::Valid));
        assert_eq!(specs.drain_events(), vec![FreqSpecEvent::SpecsChanged]);
    }

    #[test]
    fn test_commit_edit_without_sort_keeps_slots() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        specs.set_sort_enabled(false).unwrap();
        specs.commit_edit("F_PB", "0.1", "0.3").unwrap();
        assert_eq!(value(&specs, "F_SB"), 0.2);
        assert_eq!(value(&specs, "F_PB"), 0.1);
    }

    #[test]
    fn test_commit_edit_in_absolute_unit() {
        let mut specs = session(48000.0, &["F_PB"], &[0.1]);
        specs.on_unit_changed(FreqUnit::KHz);
        let normalized = specs.commit_edit("F_PB", "12", "4.8").unwrap();
        assert_relative_eq!(normalized, 0.25);
        assert_eq!(specs.query_display_value("F_PB", false).unwrap(), "12");
    }

    #[test]
    fn test_commit_edit_parse_error() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        let result = specs.commit_edit("F_PB", "abc", "0.3");

        assert!(matches!(result, Err(FreqSpecError::Parse(ParseError::Invalid { .. }))));
        assert_eq!(value(&specs, "F_PB"), 0.3);
        assert!(matches!(
            specs.drain_events().as_slice(),
            [FreqSpecEvent::EditRejected { restore_text, .. }] if restore_text == "0.3"
        ));
    }

    #[test]
    fn test_commit_edit_unknown_name() {
        let mut specs = session(1.0, &["F_SB"], &[0.2]);
        assert_eq!(
            specs.commit_edit("F_PB2", "0.1", ""),
            Err(FreqSpecError::NotFound("F_PB2".to_string()))
        );
        assert!(matches!(
            specs.commit_edit("bogus", "0.1", ""),
            Err(FreqSpecError::InvalidName(_))
        ));
    }

    #[test]
    fn test_out_of_range_is_kept_and_flagged() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        specs.commit_edit("F_PB", "0.7", "0.3").unwrap();

        assert_eq!(value(&specs, "F_PB"), 0.7);
        assert_eq!(specs.query_validation_state("F_PB"), Ok(RangeState::AtOrAboveHalf));
        assert_eq!(specs.query_field_status("F_PB").unwrap(), FieldStatus::Failed);
        assert!(specs.drain_events().iter().any(|e| matches!(
            e,
            FreqSpecEvent::Warning(ValidationWarning::OutOfRange { .. })
        )));
    }

    #[test]
    fn test_near_duplicates_flagged() {
        let mut specs = session(1000.0, &["F_PB", "F_SB", "F_SB2"], &[0.1, 0.2, 0.3]);
        specs.on_unit_changed(FreqUnit::Hz);
        specs.commit_edit("F_SB2", "100.05", "300").unwrap();

        assert_eq!(specs.separation().groups, vec![vec![0, 1]]);
        assert_eq!(specs.query_field_status("F_PB").unwrap(), FieldStatus::Failed);
        assert_eq!(specs.query_field_status("F_SB2").unwrap(), FieldStatus::Normal);
        assert!(specs.drain_events().iter().any(|e| matches!(
            e,
            FreqSpecEvent::Warning(ValidationWarning::NearDuplicate { min_step_abs, .. })
                if (*min_step_abs - 0.1).abs() < 1e-12
        )));
    }

    #[test]
    fn test_display_focus_and_units() {
        let mut specs = session(48000.0, &["F_PB"], &[0.123456]);
        assert_eq!(specs.query_display_value("F_PB", true).unwrap(), "0.123456");
        assert_eq!(specs.query_display_value("F_PB", false).unwrap(), "0.123");

        specs.on_unit_changed(FreqUnit::Hz);
        assert_eq!(specs.query_display_value("F_PB", false).unwrap(), "5.93e+03");
        assert_eq!(specs.query_label("F_PB").unwrap(), "f_PB");
        assert_eq!(specs.unit_caption(), "in Hz");
        // Unit change never touches the store
        assert_eq!(value(&specs, "F_PB"), 0.123456);
    }

    #[test]
    fn test_locked_rescale_emits_change() {
        let mut specs = session(1000.0, &["F_PB"], &[0.25]);
        specs.set_freq_locked(true);
        specs.on_sampling_frequency_changed(2000.0).unwrap();

        assert_relative_eq!(value(&specs, "F_PB"), 0.125);
        assert_eq!(specs.drain_events(), vec![FreqSpecEvent::SpecsChanged]);
    }

    #[test]
    fn test_unlocked_rescale_is_silent() {
        let mut specs = session(1000.0, &["F_PB"], &[0.25]);
        specs.on_sampling_frequency_changed(2000.0).unwrap();
        assert_eq!(value(&specs, "F_PB"), 0.25);
        assert!(specs.drain_events().is_empty());
        assert_eq!(specs.context().f_s, 2000.0);
    }

    #[test]
    fn test_invalid_sampling_frequency() {
        let mut specs = session(1000.0, &["F_PB"], &[0.25]);
        specs.set_freq_locked(true);
        assert_eq!(
            specs.on_sampling_frequency_changed(-1.0),
            Err(FreqSpecError::InvalidSamplingFrequency(-1.0))
        );
        assert_eq!(value(&specs, "F_PB"), 0.25);
        assert_eq!(specs.context().f_s, 1000.0);
    }

    #[test]
    fn test_edit_session_commit() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        assert_eq!(specs.begin_edit("F_PB").unwrap(), "0.3");
        specs.mark_edited();
        assert_eq!(specs.finish_edit("0.35"), Ok(Some(0.35)));
        assert_eq!(specs.editing(), None);
        assert_eq!(value(&specs, "F_PB"), 0.35);
    }

    #[test]
    fn test_edit_session_unedited_and_cancelled() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.2, 0.3]);

        specs.begin_edit("F_SB").unwrap();
        assert_eq!(specs.finish_edit("0.01"), Ok(None));
        assert_eq!(value(&specs, "F_SB"), 0.2);

        specs.begin_edit("F_SB").unwrap();
        specs.mark_edited();
        assert_eq!(specs.cancel_edit(), Ok(Some("0.2".to_string())));
        assert_eq!(specs.editing().map(|n| n.as_str()), Some("F_SB"));
        assert_eq!(specs.finish_edit("0.01"), Ok(None));
        assert_eq!(value(&specs, "F_SB"), 0.2);
    }

    #[test]
    fn test_cancel_edit_renders_current_unit() {
        let mut specs = session(1000.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        assert_eq!(specs.begin_edit("F_SB").unwrap(), "0.2");
        specs.mark_edited();

        specs.on_unit_changed(FreqUnit::Hz);
        assert_eq!(specs.cancel_edit(), Ok(Some("200".to_string())));
        assert_eq!(
            specs.cancel_edit().unwrap(),
            Some(specs.query_display_value("F_SB", true).unwrap())
        );

        specs.on_unit_changed(FreqUnit::Fs);
        specs.set_freq_locked(true);
        specs.on_sampling_frequency_changed(2000.0).unwrap();
        assert_eq!(specs.cancel_edit(), Ok(Some("0.1".to_string())));
    }

    #[test]
    fn test_rejected_finish_restores_current_text() {
        let mut specs = session(1000.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        specs.begin_edit("F_SB").unwrap();
        specs.mark_edited();
        specs.on_unit_changed(FreqUnit::Hz);

        assert!(specs.finish_edit("abc").is_err());
        assert!(specs.drain_events().iter().any(|e| matches!(
            e,
            FreqSpecEvent::EditRejected { restore_text, .. } if restore_text == "200"
        )));
        assert_eq!(value(&specs, "F_SB"), 0.2);
    }

    #[test]
    fn test_cancel_without_focus() {
        let mut specs = session(1.0, &["F_SB"], &[0.2]);
        assert_eq!(specs.cancel_edit(), Ok(None));
    }

    #[test]
    fn test_event_queue_is_bounded() {
        let mut specs = session(1.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        for _ in 0..MAX_PENDING_EVENTS + 10 {
            assert!(specs.commit_edit("F_SB", "abc", "0.2").is_err());
        }
        specs.commit_edit("F_SB", "0.25", "0.2").unwrap();

        let events = specs.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events.last(), Some(&FreqSpecEvent::SpecsChanged));
        assert!(specs.drain_events().is_empty());
    }

    #[test]
    fn test_apply_commands() {
        let mut specs = FreqSpecs::with_sampling_frequency(1000.0).unwrap();
        specs
            .apply(FreqSpecCommand::UpdateActiveSet {
                names: vec!["F_PB".into(), "F_SB".into()],
                status: FieldStatus::Normal,
            })
            .unwrap();
        specs.apply(FreqSpecCommand::SetFreqLocked(true)).unwrap();
        specs.apply(FreqSpecCommand::UnitChanged(FreqUnit::Hz)).unwrap();
        specs
            .apply(FreqSpecCommand::CommitEdit {
                name: "F_SB".into(),
                raw_text: "150".into(),
                previous_raw_text: "200".into(),
            })
            .unwrap();
        specs.apply(FreqSpecCommand::SamplingFrequencyChanged(500.0)).unwrap();

        let rows = specs.display_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "100");
        assert_eq!(rows[1].text, "150");
        assert_eq!(rows[1].label, "f_SB");
    }

    #[test]
    fn test_snapshot_restore() {
        let mut specs = session(1000.0, &["F_SB", "F_PB"], &[0.2, 0.3]);
        let snapshot = specs.snapshot();

        specs.commit_edit("F_PB", "0.45", "0.3").unwrap();
        specs.on_sampling_frequency_changed(8000.0).unwrap();
        specs.restore(&snapshot).unwrap();

        assert_eq!(value(&specs, "F_PB"), 0.3);
        assert_eq!(specs.context().f_s, 1000.0);
    }
}
