use maud::{html, Markup, DOCTYPE};

use crate::auth::guard::{AuthedUser, Role};

/// Shared page chrome. Navigation entries are gated by the same route
/// policy the guard enforces, so the user never sees a link the guard
/// would bounce.
pub fn desktop_layout(title: &str, user: Option<&AuthedUser>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · LeadLedger" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    h3 { a href="/" { "LeadLedger" } }
                    @if let Some(user) = user {
                        nav {
                            ul {
                                li { a href="/dashboard" { "Dashboard" } }
                                @if user.role.may_access("/leads") {
                                    li { a href="/leads" { "Leads" } }
                                }
                                @if user.role.may_access("/campaigns") {
                                    li { a href="/campaigns" { "Campaigns" } }
                                }
                                li { a href="/calendar" { "Calendar" } }
                                li { a href="/notifications" { "Notifications" } }
                                @if user.role == Role::Admin {
                                    li { a href="/admin/users" { "Admin" } }
                                }
                                li { a href="/settings" { "Settings" } }
                            }
                        }
                        span class="user-chip" {
                            (user.email) " (" (user.role.label()) ")"
                            form action="/logout" method="post" class="inline" {
                                button type="submit" { "Sign out" }
                            }
                        }
                    } @else {
                        a href="/login" class="text-base font-medium" { "Login" }
                    }
                }
                (content)
            }
        }
    }
}
