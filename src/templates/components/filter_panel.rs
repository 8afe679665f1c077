use maud::{html, Markup};

use crate::domain::filter::{FilterCondition, FilterOp, LeadField, SortKey};
use crate::domain::lead::Status;
use crate::prefs::SavedFilterSet;

/// Search box, status filter, sort selector, and the advanced condition
/// rows. Submits as GET so the whole view state lives in the URL.
pub fn filter_panel(
    search: &str,
    status: Option<Status>,
    sort: Option<SortKey>,
    conditions: &[FilterCondition],
    saved: &[SavedFilterSet],
) -> Markup {
    html! {
        form action="/leads" method="get" class="filter-panel" {
            input type="text" name="q" value=(search) placeholder="Search owner, address, tax ID, email";

            select name="status" {
                option value="all" selected[status.is_none()] { "All statuses" }
                @for s in Status::all() {
                    option value=(s.as_str()) selected[status == Some(s)] { (s.as_str().to_uppercase()) }
                }
            }

            select name="sort" {
                option value="" selected[sort.is_none()] { "No sort" }
                @for key in SortKey::all() {
                    option value=(key.as_str()) selected[sort == Some(key)] { (key.as_str()) }
                }
            }

            fieldset class="conditions" {
                legend { "Advanced filters" }
                // Three editable rows: existing conditions first, blanks after.
                @for i in 0..3usize {
                    @let existing = conditions.get(i);
                    div class="condition-row" {
                        select name=(format!("cf{i}")) {
                            option value="" selected[existing.is_none()] { "—" }
                            @for field in LeadField::all() {
                                option value=(field.as_str())
                                    selected[existing.map(|c| c.field) == Some(field)] {
                                    (field.label())
                                }
                            }
                        }
                        select name=(format!("co{i}")) {
                            @for op in FilterOp::all() {
                                option value=(op.as_str())
                                    selected[existing.map(|c| c.op) == Some(op)] {
                                    (op.label())
                                }
                            }
                        }
                        input type="text" name=(format!("cv{i}"))
                            value=(existing.map(|c| c.value.as_str()).unwrap_or(""));
                    }
                }
            }

            button type="submit" { "Apply" }
        }

        @if !saved.is_empty() {
            section class="saved-filters" {
                h4 { "Saved filters" }
                ul {
                    @for set in saved {
                        li {
                            a href=(format!("/leads?saved={}", set.id)) { (set.name) }
                            " (" (set.filters.len()) " conditions)"
                        }
                    }
                }
            }
        }
    }
}
