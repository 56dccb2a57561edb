//! Pure rendering of the client view.
//!
//! Every function maps state to an HTML fragment. The full view is rebuilt
//! after each mutation or filter change; there is no incremental diffing.
//!
//! Everything taken from data (text, ids, notices) is escaped here. Text
//! the server already escaped is escaped once more, so entities show up
//! literally rather than as markup.

use super::state::{ClientState, Filter, Notice, TodoStats};
use crate::domain::{Todo, escape_html};

/// Shown in place of the list when the filtered view is empty.
pub const EMPTY_STATE: &str = "No todos yet. Add one above!";

/// Renders the whole view: notice, filter bar, list, and stats.
#[must_use]
pub fn render(state: &ClientState) -> String {
    let notice = state.notice.as_ref().map(render_notice).unwrap_or_default();
    format!(
        "<section class=\"todo-app\">{notice}{filters}{list}{stats}</section>",
        filters = render_filters(state.filter),
        list = render_list(&state.visible()),
        stats = render_stats(state.stats()),
    )
}

/// Renders the filter buttons, marking the active one.
#[must_use]
pub fn render_filters(active: Filter) -> String {
    let buttons: String = Filter::ALL
        .iter()
        .map(|filter| {
            let class = if *filter == active {
                "filter-btn active"
            } else {
                "filter-btn"
            };
            format!("<button class=\"{class}\" data-filter=\"{filter}\">{filter}</button>")
        })
        .collect();
    format!("<nav class=\"filters\">{buttons}</nav>")
}

/// Renders the list of visible todos.
#[must_use]
pub fn render_list(todos: &[&Todo]) -> String {
    if todos.is_empty() {
        return format!("<ul id=\"todoList\"><li class=\"empty-state\">{EMPTY_STATE}</li></ul>");
    }
    let items: String = todos.iter().map(|todo| render_item(todo)).collect();
    format!("<ul id=\"todoList\">{items}</ul>")
}

/// Renders a single todo row.
#[must_use]
pub fn render_item(todo: &Todo) -> String {
    let (class, checked) = if todo.completed {
        ("todo-item completed", " checked")
    } else {
        ("todo-item", "")
    };
    format!(
        "<li class=\"{class}\" data-id=\"{id}\">\
         <input type=\"checkbox\" class=\"todo-checkbox\"{checked}>\
         <span class=\"todo-text\">{text}</span>\
         <button class=\"delete-btn\">Delete</button>\
         </li>",
        id = escape_html(todo.id.as_str()),
        text = escape_html(&todo.text),
    )
}

/// Renders the counts line.
#[must_use]
pub fn render_stats(stats: TodoStats) -> String {
    format!("<p id=\"todoCount\">{stats}</p>")
}

/// Renders a user-visible message.
#[must_use]
pub fn render_notice(notice: &Notice) -> String {
    format!(
        "<div class=\"error-message {kind}\">{message}</div>",
        kind = notice.kind.as_str(),
        message = escape_html(&notice.message),
    )
}
