// --- File: crates/bookdesk_console/src/console.rs ---
//! The admin console controller.
//!
//! [`AdminConsole`] owns the [`ViewModel`] and drives the admin API. Each
//! action runs validate, request, reload, then clears inputs, awaiting every
//! step in order.

use bookdesk_common::log_error;
use bookdesk_common::models::AddDateRequest;
use bookdesk_common::services::AdminApiService;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::dialogs::Dialogs;
use crate::error::ConsoleError;
use crate::locale::RuLocale;
use crate::render::{render_regions, RenderedRegions};
use crate::view::{CustomDateForm, Notice, ViewModel};

pub const ALERT_PICK_DATE: &str = "Выберите дату!";
pub const ALERT_PICK_TIMES: &str = "Укажите время начала и окончания!";
pub const ALERT_NOTHING_SELECTED: &str = "Выберите даты для удаления!";
pub const ALERT_DATE_NOT_FOUND: &str = "Дата не найдена!";
pub const CONFIRM_DELETE_ONE: &str = "Удалить эту дату?";

fn confirm_delete_many(count: usize) -> String {
    format!("Удалить {} выбранных дат?", count)
}

/// Result of an action that asks the operator first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
}

pub struct AdminConsole<A, D> {
    api: A,
    dialogs: D,
    locale: RuLocale,
    view: ViewModel,
}

impl<A, D> AdminConsole<A, D>
where
    A: AdminApiService,
    D: Dialogs,
{
    pub fn new(api: A, dialogs: D, locale: RuLocale) -> Self {
        Self {
            api,
            dialogs,
            locale,
            view: ViewModel::default(),
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// The custom-date inputs, as the operator edits them.
    pub fn form_mut(&mut self) -> &mut CustomDateForm {
        &mut self.view.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn locale(&self) -> &RuLocale {
        &self.locale
    }

    pub fn render(&self) -> RenderedRegions {
        render_regions(&self.view, &self.locale)
    }

    /// Logs an API failure, shows it as the current notice, and wraps it.
    fn api_failure(&mut self, context: &str, error: A::Error) -> ConsoleError {
        log_error(&error, context);
        self.view.notice = Some(Notice::Error(format!("{}: {}", context, error)));
        ConsoleError::api(error)
    }

    fn reject(&self, error: ConsoleError) -> ConsoleError {
        self.dialogs.alert(&error.to_string());
        error
    }

    /// Page load: dates first, then requests. Both are attempted; the first
    /// failure is returned.
    pub async fn init(&mut self) -> Result<(), ConsoleError> {
        self.view.notice = None;
        let dates = self.load_dates().await;
        let requests = self.load_requests().await;
        dates.and(requests)
    }

    /// Replaces the dates grid with the server's current list.
    pub async fn load_dates(&mut self) -> Result<(), ConsoleError> {
        match self.api.list_dates().await {
            Ok(entries) => {
                debug!("Loaded {} dates", entries.len());
                self.view.replace_dates(entries);
                Ok(())
            }
            Err(e) => Err(self.api_failure("Не удалось загрузить даты", e)),
        }
    }

    pub async fn add_next_week(&mut self) -> Result<(), ConsoleError> {
        self.add_dates(AddDateRequest::Week).await
    }

    pub async fn add_next_month(&mut self) -> Result<(), ConsoleError> {
        self.add_dates(AddDateRequest::Month).await
    }

    async fn add_dates(&mut self, request: AddDateRequest) -> Result<(), ConsoleError> {
        self.view.notice = None;
        info!("Adding dates: {:?}", request);
        if let Err(e) = self.api.add_date(request).await {
            return Err(self.api_failure("Не удалось добавить даты", e));
        }
        self.load_dates().await
    }

    /// Adds the date in the custom form, then clears the form's date.
    pub async fn add_custom_date(&mut self) -> Result<(), ConsoleError> {
        self.view.notice = None;
        let form = self.view.form.clone();

        if form.date.trim().is_empty() {
            return Err(self.reject(ConsoleError::Validation(ALERT_PICK_DATE.to_string())));
        }
        if form.start_time.trim().is_empty() || form.end_time.trim().is_empty() {
            return Err(self.reject(ConsoleError::Validation(ALERT_PICK_TIMES.to_string())));
        }

        let request = AddDateRequest::Custom {
            date: form.date,
            start_time: form.start_time,
            end_time: form.end_time,
            interval: form.interval,
        };
        info!("Adding custom date: {:?}", request);
        if let Err(e) = self.api.add_date(request).await {
            return Err(self.api_failure("Не удалось добавить дату", e));
        }

        let reloaded = self.load_dates().await;
        self.view.form.date.clear();
        reloaded
    }

    pub async fn delete_date(&mut self, id: &str) -> Result<ActionOutcome, ConsoleError> {
        self.view.notice = None;
        if !self.dialogs.confirm(CONFIRM_DELETE_ONE) {
            return Ok(ActionOutcome::Cancelled);
        }

        info!("Deleting date {}", id);
        if let Err(e) = self.api.delete_date(id).await {
            return Err(self.api_failure("Не удалось удалить дату", e));
        }
        self.load_dates().await?;
        Ok(ActionOutcome::Completed)
    }

    /// Marks one card selected or not. Unknown ids are ignored.
    pub fn toggle_date_selection(&mut self, id: &str, checked: bool) {
        if !self.view.set_selected(id, checked) {
            warn!("Selection change for unknown date {}", id);
        }
    }

    pub fn toggle_select_all(&mut self, checked: bool) {
        self.view.set_all_selected(checked);
    }

    /// Deletes every selected date concurrently and waits for all of them.
    ///
    /// The grid is reloaded whatever the individual outcomes; failed ids are
    /// reported as [`ConsoleError::PartialDelete`].
    pub async fn delete_selected(&mut self) -> Result<ActionOutcome, ConsoleError> {
        self.view.notice = None;
        let ids = self.view.selected_ids();
        if ids.is_empty() {
            return Err(self.reject(ConsoleError::Validation(ALERT_NOTHING_SELECTED.to_string())));
        }
        if !self.dialogs.confirm(&confirm_delete_many(ids.len())) {
            return Ok(ActionOutcome::Cancelled);
        }

        info!("Deleting {} selected dates", ids.len());
        let api = &self.api;
        let outcomes = join_all(ids.iter().map(|id| async move {
            let outcome = api.delete_date(id).await;
            (id, outcome)
        }))
        .await;

        let mut failed = Vec::new();
        for (id, outcome) in outcomes {
            if let Err(e) = outcome {
                log_error(&e, &format!("Failed to delete date {}", id));
                failed.push(id.clone());
            }
        }

        let reloaded = self.load_dates().await;
        self.view.select_all = false;

        if !failed.is_empty() {
            self.view.notice = Some(Notice::Error(format!(
                "Не удалось удалить {} из {} дат",
                failed.len(),
                ids.len()
            )));
            return Err(ConsoleError::PartialDelete {
                attempted: ids.len(),
                failed,
            });
        }
        reloaded?;
        Ok(ActionOutcome::Completed)
    }

    /// Fetches the current list and opens the slot editor for `date_id`.
    pub async fn edit_slots(&mut self, date_id: &str) -> Result<(), ConsoleError> {
        self.view.notice = None;
        let dates = match self.api.list_dates().await {
            Ok(dates) => dates,
            Err(e) => return Err(self.api_failure("Не удалось загрузить даты", e)),
        };

        match dates.iter().find(|entry| entry.id == date_id) {
            Some(entry) => {
                self.view.open_editor(entry);
                Ok(())
            }
            None => Err(self.reject(ConsoleError::NotFound(ALERT_DATE_NOT_FOUND.to_string()))),
        }
    }

    /// Checks or unchecks slot `index` in the open editor.
    pub fn set_slot_checked(&mut self, index: usize, checked: bool) {
        if !self.view.set_slot_checked(index, checked) {
            warn!("Slot {} is not in the open editor", index);
        }
    }

    /// Sends the editor's checkbox states for `date_id`, closes the modal and
    /// reloads. On failure the modal stays open.
    ///
    /// `date_id` must be the date the visible editor was opened for; anything
    /// else is rejected before a request is made.
    pub async fn save_slots(&mut self, date_id: &str) -> Result<(), ConsoleError> {
        self.view.notice = None;
        let slots = match self.view.editor.as_ref() {
            Some(editor) if self.view.modal_visible && editor.date_id == date_id => {
                editor.slot_updates()
            }
            _ => {
                warn!("No open slot editor for date {}", date_id);
                return Err(self.reject(ConsoleError::NotFound(ALERT_DATE_NOT_FOUND.to_string())));
            }
        };

        info!("Saving {} slots for date {}", slots.len(), date_id);
        if let Err(e) = self.api.update_slots(date_id, slots).await {
            return Err(self.api_failure("Не удалось сохранить слоты", e));
        }
        self.close_modal();
        self.load_dates().await
    }

    pub fn close_modal(&mut self) {
        self.view.close_modal();
    }

    pub async fn load_requests(&mut self) -> Result<(), ConsoleError> {
        match self.api.list_requests().await {
            Ok(requests) => {
                debug!("Loaded {} requests", requests.len());
                self.view.requests = Some(requests);
                Ok(())
            }
            Err(e) => Err(self.api_failure("Не удалось загрузить заявки", e)),
        }
    }
}
