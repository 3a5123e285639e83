// --- File: crates/bookdesk_schedule/src/page.rs ---
//! Host page for the admin console.
//!
//! The page carries the element ids the console renders into (`datesGrid`,
//! `requestsList`, `editModal`, `modalContent`, `customDate`, `startTime`,
//! `endTime`, `interval`, `selectAll`). Region contents are passed in already
//! rendered.

use chrono::NaiveDate;

/// Pre-rendered contents of the page regions.
#[derive(Debug, Default, Clone)]
pub struct PageRegions {
    pub dates_grid: String,
    pub requests_list: String,
    pub notice: String,
    pub script_src: Option<String>,
    /// IANA zone the page script formats timestamps in
    pub time_zone: Option<String>,
}

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; }
        .container { max-width: 1200px; margin: 0 auto; }
        .section { margin-bottom: 30px; padding: 20px; border: 1px solid #ddd; border-radius: 5px; }
        .date-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 10px; margin: 20px 0; }
        .date-card { padding: 15px; border: 1px solid #ccc; border-radius: 5px; background: #f9f9f9; }
        .date-card.active { background: #e8f5e8; border-color: #4caf50; }
        .date-card.selected { background: #ffeb3b !important; border-color: #f57f17; }
        .time-slots { margin-top: 10px; font-size: 12px; }
        .time-slot { display: inline-block; margin: 2px; padding: 4px 8px; border: 1px solid #ddd; border-radius: 3px; font-size: 12px; }
        .time-slot.booked { background: #ffcdd2; color: #c62828; }
        .time-slot.available { background: #c8e6c9; color: #2e7d32; }
        .btn { padding: 8px 16px; margin: 5px; border: none; border-radius: 3px; cursor: pointer; }
        .btn-primary { background: #007bff; color: white; }
        .btn-danger { background: #dc3545; color: white; }
        .btn-success { background: #28a745; color: white; }
        .form-group { margin: 10px 0; }
        .requests-table { width: 100%; border-collapse: collapse; margin-top: 10px; }
        .requests-table th, .requests-table td { padding: 8px; border: 1px solid #ddd; text-align: left; }
        .bulk-actions { margin: 20px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }
        .notice { padding: 10px; border-radius: 3px; margin-bottom: 10px; }
        .notice.error { background: #f8d7da; color: #721c24; }
        .notice.info { background: #d1ecf1; color: #0c5460; }
        .modal { display: none; position: fixed; z-index: 1000; left: 0; top: 0; width: 100%; height: 100%; background-color: rgba(0,0,0,0.4); }
        .modal-content { background-color: #fefefe; margin: 15% auto; padding: 20px; border: 1px solid #888; width: 80%; max-width: 500px; border-radius: 5px; }
"#;

/// Renders the full admin page. `today` bounds the custom date picker.
pub fn render_admin_page(today: NaiveDate, regions: &PageRegions) -> String {
    let script = regions
        .script_src
        .as_deref()
        .map(|src| format!("<script src=\"{}\"></script>", src))
        .unwrap_or_default();
    let body_attrs = regions
        .time_zone
        .as_deref()
        .map(|zone| format!(" data-time-zone=\"{}\"", zone.replace(['"', '<', '>', '&'], "")))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Volvo Service - Админ панель</title>
    <meta charset="utf-8">
    <style>{style}</style>
</head>
<body{body_attrs}>
    <div class="container">
        <h1>Volvo Service - Админ панель</h1>
        <div id="notice">{notice}</div>
        <div class="section">
            <h2>Управление датами</h2>
            <div class="form-group">
                <label>Быстрое добавление дат:</label>
                <button class="btn btn-success" onclick="addNextWeek()">Добавить неделю (следующие 7 дней)</button>
                <button class="btn btn-success" onclick="addNextMonth()">Добавить месяц (следующие 30 дней)</button>
            </div>
            <div class="form-group">
                <label>Добавить конкретную дату:</label>
                <input type="date" id="customDate" min="{today}">
                <label>Время начала:</label>
                <input type="time" id="startTime" value="09:00">
                <label>Время окончания:</label>
                <input type="time" id="endTime" value="17:00">
                <label>Интервал (минуты):</label>
                <select id="interval">
                    <option value="60">1 час</option>
                    <option value="30">30 минут</option>
                    <option value="45">45 минут</option>
                    <option value="90">1.5 часа</option>
                </select>
                <button class="btn btn-primary" onclick="addCustomDate()">Добавить дату</button>
            </div>
            <div id="datesList">
                <h3>Доступные даты:</h3>
                <div class="bulk-actions">
                    <label><input type="checkbox" id="selectAll" onchange="toggleSelectAll()"> Выбрать все</label>
                    <button class="btn btn-danger" onclick="deleteSelected()">Удалить выбранные</button>
                    <button class="btn btn-primary" onclick="loadDates()">Обновить список</button>
                </div>
                <div id="datesGrid" class="date-grid">{dates_grid}</div>
            </div>
        </div>
        <div class="section">
            <h2>Заявки</h2>
            <button class="btn btn-primary" onclick="loadRequests()">Обновить список заявок</button>
            <div id="requestsList">{requests_list}</div>
        </div>
    </div>
    <div id="editModal" class="modal">
        <div class="modal-content">
            <span class="close" onclick="closeModal()">&times;</span>
            <h3>Редактирование временных слотов</h3>
            <div id="modalContent"></div>
        </div>
    </div>
    {script}
</body>
</html>"#,
        style = STYLE,
        notice = regions.notice,
        today = today.format("%Y-%m-%d"),
        dates_grid = regions.dates_grid,
        requests_list = regions.requests_list,
        script = script,
        body_attrs = body_attrs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_carries_region_ids_and_min_date() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 26).unwrap();
        let html = render_admin_page(
            today,
            &PageRegions {
                dates_grid: "<div class=\"date-card\"></div>".to_string(),
                requests_list: "<p>Заявок пока нет</p>".to_string(),
                ..PageRegions::default()
            },
        );

        for id in [
            "datesGrid", "requestsList", "editModal", "modalContent", "customDate",
            "startTime", "endTime", "interval", "selectAll",
        ] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }
        assert!(html.contains("min=\"2025-02-26\""));
        assert!(html.contains("<p>Заявок пока нет</p>"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_script_tag_when_configured() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 26).unwrap();
        let html = render_admin_page(
            today,
            &PageRegions {
                script_src: Some("/admin.js".to_string()),
                time_zone: Some("Europe/Moscow".to_string()),
                ..PageRegions::default()
            },
        );
        assert!(html.contains("<script src=\"/admin.js\"></script>"));
        assert!(html.contains("<body data-time-zone=\"Europe/Moscow\">"));
    }
}
