use maud::{html, Markup};

use crate::auth::guard::{AuthedUser, Role};
use crate::config::AppConfig;
use crate::db::users::UserProfile;
use crate::domain::lead::Status;
use crate::templates::components::status_badge;
use crate::templates::desktop_layout;
use crate::templates::pages::fmt_ts;

pub fn admin_users_page(user: &AuthedUser, users: &[UserProfile]) -> Markup {
    desktop_layout(
        "Admin · Users",
        Some(user),
        html! {
            main class="container" {
                h1 { "Users" }
                table {
                    thead {
                        tr { th { "Email" } th { "Role" } th { "Last login" } th { "Change role" } }
                    }
                    tbody {
                        @for row in users {
                            tr {
                                td { (row.email) }
                                td { (row.role.label()) }
                                td {
                                    @match row.last_login_at {
                                        Some(ts) => { (fmt_ts(ts)) }
                                        None => { "never" }
                                    }
                                }
                                td {
                                    @if row.id == user.id {
                                        em { "that's you" }
                                    } @else {
                                        form action=(format!("/admin/users/{}/role", row.id)) method="post" class="inline" {
                                            select name="role" {
                                                @for role in Role::all() {
                                                    option value=(role.as_str()) selected[row.role == role] {
                                                        (role.label())
                                                    }
                                                }
                                            }
                                            button type="submit" { "Set" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn admin_settings_page(user: &AuthedUser, cfg: &AppConfig) -> Markup {
    desktop_layout(
        "Admin · Settings",
        Some(user),
        html! {
            main class="container narrow" {
                h1 { "Settings" }
                section class="card" {
                    h3 { "Runtime configuration" }
                    ul {
                        li { "Bind address: " code { (cfg.addr) } }
                        li { "Database: " code { (cfg.db_path) } }
                        li { "Base URL: " code { (cfg.base_url) } }
                        li {
                            "Mailer: "
                            @if cfg.mailer.is_some() { "configured" } @else { "not configured (links are logged)" }
                        }
                    }
                }
                section class="card" {
                    h3 { "Maintenance" }
                    form action="/admin/reset-activity" method="post" {
                        button type="submit" class="danger" { "Clear activity log" }
                    }
                }
            }
        },
    )
}

pub struct AnalyticsVm {
    pub status_counts: Vec<(Status, i64)>,
    pub users_total: i64,
    pub activities_7d: i64,
    pub activities_30d: i64,
}

pub fn admin_analytics_page(user: &AuthedUser, vm: &AnalyticsVm) -> Markup {
    let total: i64 = vm.status_counts.iter().map(|(_, n)| n).sum();

    desktop_layout(
        "Admin · Analytics",
        Some(user),
        html! {
            main class="container" {
                h1 { "Analytics" }
                section class="card" {
                    h3 { "Leads by status" }
                    p { strong { (total) } " total" }
                    ul class="status-counts" {
                        @for (status, n) in &vm.status_counts {
                            li { (status_badge(*status)) " " (n) }
                        }
                    }
                }
                section class="card" {
                    h3 { "Team" }
                    p { (vm.users_total) " user accounts" }
                }
                section class="card" {
                    h3 { "Activity volume" }
                    p { (vm.activities_7d) " actions in the last 7 days" }
                    p { (vm.activities_30d) " actions in the last 30 days" }
                }
            }
        },
    )
}
