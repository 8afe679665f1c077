use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::domain::activity::ActivityItem;
use crate::templates::desktop_layout;
use crate::templates::pages::fmt_ts;

pub fn notifications_page(user: &AuthedUser, items: &[ActivityItem]) -> Markup {
    desktop_layout(
        "Notifications",
        Some(user),
        html! {
            main class="container" {
                h1 { "Notifications" }
                @if items.is_empty() {
                    p { "Nothing has happened yet." }
                } @else {
                    ul class="timeline" {
                        @for item in items {
                            li {
                                span class="ts" { (fmt_ts(item.created_at)) }
                                " " span class="kind" { (item.kind.as_str()) }
                                " — " strong { (item.title) }
                                @if !item.description.is_empty() {
                                    p class="desc" { (item.description) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
