// --- File: crates/bookdesk_console/src/render.rs ---
//! Pure HTML renderers for the console regions.
//!
//! Every function here takes view state and returns markup for one region
//! (`datesGrid`, `modalContent`, `requestsList`, `notice`). All interpolated
//! text is escaped.

use bookdesk_common::models::ServiceRequest;

use crate::locale::RuLocale;
use crate::view::{DateCard, Notice, SlotEditor, ViewModel};

pub const NO_REQUESTS: &str = "<p>Заявок пока нет</p>";
pub const NOT_SPECIFIED: &str = "Не указано";

const REQUEST_COLUMNS: [&str; 7] = [
    "Дата создания",
    "Имя",
    "Контакт",
    "Модель",
    "Проблема",
    "Время записи",
    "Статус",
];

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes text for a single-quoted JavaScript string literal.
///
/// Handler attributes are HTML-decoded before the script runs, so quotes and
/// markup characters are emitted as `\xNN` escapes rather than entities.
pub fn escape_js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' | '"' | '<' | '>' | '&' => escaped.push_str(&format!("\\x{:02x}", c as u32)),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A quoted JS string argument, safe inside a double-quoted HTML attribute.
fn js_arg(text: &str) -> String {
    format!("'{}'", escape_html(&escape_js_string(text)))
}

/// Renders one card of the dates grid.
pub fn render_date_card(card: &DateCard, locale: &RuLocale) -> String {
    let entry = &card.entry;
    let id = escape_html(&entry.id);
    let id_arg = js_arg(&entry.id);

    let mut class = String::from("date-card");
    if entry.is_active {
        class.push_str(" active");
    }
    if card.selected {
        class.push_str(" selected");
    }

    let slots: String = entry
        .time_slots
        .iter()
        .map(|slot| {
            let state = if slot.is_booked { "booked" } else { "available" };
            format!(
                "<span class=\"time-slot {}\">{}</span>",
                state,
                escape_html(&slot.time)
            )
        })
        .collect();

    format!(
        concat!(
            "<div class=\"{class}\" data-id=\"{id}\">",
            "<input type=\"checkbox\" class=\"checkbox\" onchange=\"toggleDateSelection(this)\"{checked}>",
            "<div><strong>{date} ({weekday})</strong></div>",
            "<div class=\"time-slots\">Свободных слотов: {free} из {total}</div>",
            "<div class=\"edit-slots\">{slots}</div>",
            "<button class=\"btn btn-primary\" onclick=\"editSlots({id_arg})\">Редактировать слоты</button>",
            "<button class=\"btn btn-danger\" onclick=\"deleteDate({id_arg})\">Удалить</button>",
            "</div>"
        ),
        class = class,
        id = id,
        id_arg = id_arg,
        checked = if card.selected { " checked" } else { "" },
        date = locale.format_date(&entry.date),
        weekday = locale.weekday(&entry.date),
        free = entry.free_slots(),
        total = entry.total_slots(),
        slots = slots,
    )
}

/// Contents of `datesGrid`: the cards in server order.
pub fn render_date_grid(cards: &[DateCard], locale: &RuLocale) -> String {
    cards
        .iter()
        .map(|card| render_date_card(card, locale))
        .collect()
}

/// Contents of `modalContent` for the slot editor.
pub fn render_slot_editor(editor: &SlotEditor, locale: &RuLocale) -> String {
    let mut html = format!(
        "<div><strong>{}</strong></div><div style=\"margin: 15px 0;\">",
        locale.format_date(&editor.entry.date)
    );
    for (index, checkbox) in editor.checkboxes.iter().enumerate() {
        html.push_str(&format!(
            "<div style=\"margin: 5px 0;\"><input type=\"checkbox\" id=\"slot_{index}\"{checked}><label for=\"slot_{index}\">{time}</label></div>",
            index = index,
            checked = if checkbox.checked { " checked" } else { "" },
            time = escape_html(&checkbox.time),
        ));
    }
    html.push_str("</div>");
    html.push_str(&format!(
        "<button class=\"btn btn-primary\" onclick=\"saveSlots({})\">Сохранить</button>",
        js_arg(&editor.date_id)
    ));
    html.push_str("<button class=\"btn btn-danger\" onclick=\"closeModal()\">Отмена</button>");
    html
}

fn render_request_row(request: &ServiceRequest, locale: &RuLocale) -> String {
    let appointment = request
        .appointment_date
        .as_ref()
        .map(|ts| locale.format_date_time(ts))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let cells = [
        locale.format_date(&request.created_at),
        escape_html(&request.name),
        escape_html(&request.contact),
        format!(
            "{} {}",
            escape_html(&request.volvo_model),
            escape_html(&request.year)
        ),
        escape_html(&request.problem),
        appointment,
        escape_html(&request.status),
    ];

    let mut row = String::from("<tr>");
    for cell in cells {
        row.push_str("<td>");
        row.push_str(&cell);
        row.push_str("</td>");
    }
    row.push_str("</tr>");
    row
}

/// Contents of `requestsList`.
pub fn render_requests(requests: &[ServiceRequest], locale: &RuLocale) -> String {
    if requests.is_empty() {
        return NO_REQUESTS.to_string();
    }

    let mut html = String::from("<table class=\"requests-table\"><tr>");
    for column in REQUEST_COLUMNS {
        html.push_str("<th>");
        html.push_str(column);
        html.push_str("</th>");
    }
    html.push_str("</tr>");
    for request in requests {
        html.push_str(&render_request_row(request, locale));
    }
    html.push_str("</table>");
    html
}

/// Contents of the `notice` region; empty when there is nothing to say.
pub fn render_notice(notice: Option<&Notice>) -> String {
    match notice {
        Some(Notice::Info(text)) => {
            format!("<div class=\"notice info\">{}</div>", escape_html(text))
        }
        Some(Notice::Error(text)) => {
            format!("<div class=\"notice error\">{}</div>", escape_html(text))
        }
        None => String::new(),
    }
}

/// All regions of the page rendered from one view-model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedRegions {
    pub dates_grid: String,
    pub requests_list: String,
    pub modal_content: String,
    /// `display` of `editModal`: `block` or `none`
    pub modal_display: &'static str,
    pub notice: String,
}

pub fn render_regions(view: &ViewModel, locale: &RuLocale) -> RenderedRegions {
    RenderedRegions {
        dates_grid: render_date_grid(view.cards(), locale),
        requests_list: view
            .requests
            .as_deref()
            .map(|requests| render_requests(requests, locale))
            .unwrap_or_default(),
        modal_content: view
            .editor
            .as_ref()
            .map(|editor| render_slot_editor(editor, locale))
            .unwrap_or_default(),
        modal_display: if view.modal_visible { "block" } else { "none" },
        notice: render_notice(view.notice.as_ref()),
    }
}
