use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::prefs::{SavedFilterSet, ViewMode};
use crate::templates::desktop_layout;
use crate::templates::pages::fmt_ts;

pub struct SettingsVm {
    pub user: AuthedUser,
    pub view_mode: ViewMode,
    pub saved: Vec<SavedFilterSet>,
    pub notice: Option<String>,
}

pub fn settings_page(vm: &SettingsVm) -> Markup {
    desktop_layout(
        "Settings",
        Some(&vm.user),
        html! {
            main class="container narrow" {
                h1 { "Settings" }
                @if let Some(msg) = &vm.notice {
                    p class="notice" { (msg) }
                }

                section class="card" {
                    h3 { "Display" }
                    p { "Lead list view: " strong { (vm.view_mode.label()) } }
                    form action="/prefs/view-mode" method="post" {
                        @for mode in ViewMode::all() {
                            button type="submit" name="mode" value=(mode.as_str())
                                disabled[vm.view_mode == mode] {
                                (mode.label())
                            }
                        }
                    }
                    p class="hint" { "Stored on this device only." }
                }

                section class="card" {
                    h3 { "Saved filters" }
                    @if vm.saved.is_empty() {
                        p { "None saved. Apply filters on the leads page, then save them from there." }
                    } @else {
                        ul {
                            @for set in &vm.saved {
                                li {
                                    strong { (set.name) }
                                    " — " (set.filters.len()) " conditions, saved " (fmt_ts(set.created_at))
                                    form action="/settings/filters/delete" method="post" class="inline" {
                                        input type="hidden" name="id" value=(set.id);
                                        button type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }

                section class="card" {
                    h3 { "Password" }
                    form action="/password" method="post" {
                        label { "Current password" }
                        input type="password" name="current_password" required;
                        label { "New password" }
                        input type="password" name="new_password" required;
                        button type="submit" { "Change password" }
                    }
                }
            }
        },
    )
}
