use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::domain::activity::ActivityItem;
use crate::domain::lead::Status;
use crate::templates::components::status_badge;
use crate::templates::desktop_layout;
use crate::templates::pages::fmt_ts;

pub struct DashboardVm {
    pub user: AuthedUser,
    pub status_counts: Vec<(Status, i64)>,
    pub campaign_count: i64,
    pub recent: Vec<ActivityItem>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    let total: i64 = vm.status_counts.iter().map(|(_, n)| n).sum();

    desktop_layout(
        "Dashboard",
        Some(&vm.user),
        html! {
            main class="container" {
                h1 { "Dashboard" }
                p { "Signed in as " strong { (vm.user.email) } }

                section class="card" {
                    h3 { "Pipeline" }
                    p { strong { (total) } " leads tracked" }
                    ul class="status-counts" {
                        @for (status, n) in &vm.status_counts {
                            li { (status_badge(*status)) " " (n) }
                        }
                    }
                    p { a href="/leads" { "Go to leads" } }
                }

                @if vm.user.role.may_access("/campaigns") {
                    section class="card" {
                        h3 { "Campaigns" }
                        p { strong { (vm.campaign_count) } " active campaigns" }
                        p { a href="/campaigns" { "Browse campaigns" } }
                    }
                }

                section class="card" {
                    h3 { "Recent activity" }
                    @if vm.recent.is_empty() {
                        p { "Nothing yet." }
                    } @else {
                        ul class="timeline" {
                            @for item in &vm.recent {
                                li {
                                    span class="ts" { (fmt_ts(item.created_at)) }
                                    " — " (item.title)
                                }
                            }
                        }
                    }
                    p { a href="/notifications" { "Full feed" } }
                }
            }
        },
    )
}
