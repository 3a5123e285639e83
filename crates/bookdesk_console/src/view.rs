// --- File: crates/bookdesk_console/src/view.rs ---
//! Console view-model.
//!
//! Everything the admin page shows lives here; the renderers in
//! [`crate::render`] are pure functions of this state.

use bookdesk_common::models::{DateEntry, ServiceRequest, SlotUpdate};

/// One card in the dates grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DateCard {
    pub entry: DateEntry,
    pub selected: bool,
}

/// Inputs of the "add a specific date" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDateForm {
    /// `YYYY-MM-DD`, empty when nothing is picked
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    /// Minutes; the page offers 60, 30, 45 and 90
    pub interval: i64,
}

impl Default for CustomDateForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            interval: 60,
        }
    }
}

/// A slot checkbox in the edit modal. Checked means booked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCheckbox {
    pub time: String,
    pub checked: bool,
}

/// Contents of the slot edit modal for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEditor {
    pub date_id: String,
    pub entry: DateEntry,
    /// Same order as `entry.time_slots`; position is the slot index sent on save
    pub checkboxes: Vec<SlotCheckbox>,
}

impl SlotEditor {
    pub fn for_entry(entry: &DateEntry) -> Self {
        Self {
            date_id: entry.id.clone(),
            entry: entry.clone(),
            checkboxes: entry
                .time_slots
                .iter()
                .map(|slot| SlotCheckbox {
                    time: slot.time.clone(),
                    checked: slot.is_booked,
                })
                .collect(),
        }
    }

    /// One update per checkbox, in order.
    pub fn slot_updates(&self) -> Vec<SlotUpdate> {
        self.checkboxes
            .iter()
            .enumerate()
            .map(|(index, checkbox)| SlotUpdate {
                index,
                is_booked: checkbox.checked,
            })
            .collect()
    }
}

/// Status line shown above the page sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    /// `None` until the first successful load
    pub dates: Option<Vec<DateCard>>,
    pub select_all: bool,
    pub form: CustomDateForm,
    pub editor: Option<SlotEditor>,
    pub modal_visible: bool,
    /// `None` until the first successful load
    pub requests: Option<Vec<ServiceRequest>>,
    pub notice: Option<Notice>,
}

impl ViewModel {
    /// Rebuilds the grid from the server's list. Selections do not survive.
    pub fn replace_dates(&mut self, entries: Vec<DateEntry>) {
        self.dates = Some(
            entries
                .into_iter()
                .map(|entry| DateCard {
                    entry,
                    selected: false,
                })
                .collect(),
        );
    }

    pub fn cards(&self) -> &[DateCard] {
        self.dates.as_deref().unwrap_or(&[])
    }

    /// Returns `false` when no card carries `id`.
    pub fn set_selected(&mut self, id: &str, selected: bool) -> bool {
        match self
            .dates
            .iter_mut()
            .flatten()
            .find(|card| card.entry.id == id)
        {
            Some(card) => {
                card.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn set_all_selected(&mut self, selected: bool) {
        self.select_all = selected;
        for card in self.dates.iter_mut().flatten() {
            card.selected = selected;
        }
    }

    /// Ids of selected cards in grid order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.cards()
            .iter()
            .filter(|card| card.selected)
            .map(|card| card.entry.id.clone())
            .collect()
    }

    pub fn open_editor(&mut self, entry: &DateEntry) {
        self.editor = Some(SlotEditor::for_entry(entry));
        self.modal_visible = true;
    }

    /// Returns `false` when no editor is open or `index` is out of range.
    pub fn set_slot_checked(&mut self, index: usize, checked: bool) -> bool {
        match self
            .editor
            .as_mut()
            .and_then(|editor| editor.checkboxes.get_mut(index))
        {
            Some(checkbox) => {
                checkbox.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal_visible = false;
    }
}
