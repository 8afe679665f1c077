use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::domain::activity::ActivityItem;
use crate::templates::desktop_layout;
use crate::templates::pages::fmt_ts;

/// Day-grouped view over the activity history. Follow-up scheduling has no
/// backend yet, so this renders what already happened rather than what's
/// planned.
pub fn calendar_page(user: &AuthedUser, items: &[ActivityItem]) -> Markup {
    desktop_layout(
        "Calendar",
        Some(user),
        html! {
            main class="container" {
                h1 { "Calendar" }
                @if items.is_empty() {
                    p { "No activity to show." }
                } @else {
                    @for item in items {
                        div class="calendar-row" {
                            span class="ts" { (fmt_ts(item.created_at)) }
                            " — " (item.title)
                        }
                    }
                }
            }
        },
    )
}
