use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::domain::filter::{FilterCondition, SortKey};
use crate::domain::lead::{Lead, Status};
use crate::prefs::{SavedFilterSet, ViewMode};
use crate::templates::components::{filter_panel, status_badge};
use crate::templates::desktop_layout;

pub struct LeadsVm {
    pub user: AuthedUser,
    pub leads: Vec<Lead>,
    pub total: usize,
    pub search: String,
    pub status: Option<Status>,
    pub sort: Option<SortKey>,
    pub conditions: Vec<FilterCondition>,
    pub saved: Vec<SavedFilterSet>,
    pub view_mode: ViewMode,
}

fn arrears_cell(lead: &Lead) -> String {
    lead.arrears.map(|a| format!("${a:.2}")).unwrap_or_default()
}

fn table_view(leads: &[Lead]) -> Markup {
    html! {
        table class="lead-table" {
            thead {
                tr {
                    th { "Owner" }
                    th { "Property" }
                    th { "Tax ID" }
                    th { "Arrears" }
                    th { "Status" }
                }
            }
            tbody {
                @for lead in leads {
                    tr {
                        td { a href=(format!("/leads/{}", lead.id)) { (lead.owner_name) } }
                        td { (lead.property_address) }
                        td { (lead.tax_id.as_deref().unwrap_or("")) }
                        td { (arrears_cell(lead)) }
                        td { (status_badge(lead.status)) }
                    }
                }
            }
        }
    }
}

fn cards_view(leads: &[Lead]) -> Markup {
    html! {
        div class="lead-cards" {
            @for lead in leads {
                div class="card" {
                    h4 { a href=(format!("/leads/{}", lead.id)) { (lead.owner_name) } }
                    p { (lead.property_address) }
                    p { (arrears_cell(lead)) " " (status_badge(lead.status)) }
                }
            }
        }
    }
}

fn kanban_view(leads: &[Lead]) -> Markup {
    html! {
        div class="kanban" {
            @for status in Status::all() {
                div class="kanban-column" {
                    h4 { (status_badge(status)) }
                    @for lead in leads.iter().filter(|l| l.status == status) {
                        div class="card" {
                            a href=(format!("/leads/{}", lead.id)) { (lead.owner_name) }
                            p { (lead.property_address) }
                        }
                    }
                }
            }
        }
    }
}

pub fn leads_page(vm: &LeadsVm) -> Markup {
    desktop_layout(
        "Leads",
        Some(&vm.user),
        html! {
            main class="container" {
                header class="page-header" {
                    h1 { "Leads" }
                    div class="actions" {
                        a href="/leads/new" { "New lead" }
                        a href="/leads/import" { "Import CSV" }
                        a href="/leads/template.csv" { "Download template" }
                        a href=(export_href(vm, "csv")) { "Export CSV" }
                        a href=(export_href(vm, "xlsx")) { "Export XLSX" }
                    }
                }

                // View-mode switcher persists per device.
                form action="/prefs/view-mode" method="post" class="view-switch" {
                    @for mode in ViewMode::all() {
                        button type="submit" name="mode" value=(mode.as_str())
                            disabled[vm.view_mode == mode] {
                            (mode.label())
                        }
                    }
                }

                (filter_panel(&vm.search, vm.status, vm.sort, &vm.conditions, &vm.saved))

                @if !vm.conditions.is_empty() {
                    form action="/settings/filters/save" method="post" class="save-filter" {
                        @for (i, c) in vm.conditions.iter().enumerate() {
                            input type="hidden" name=(format!("cf{i}")) value=(c.field.as_str());
                            input type="hidden" name=(format!("co{i}")) value=(c.op.as_str());
                            input type="hidden" name=(format!("cv{i}")) value=(c.value);
                        }
                        input type="text" name="name" placeholder="Save these filters as…" required;
                        button type="submit" { "Save" }
                    }
                }

                p class="result-count" {
                    "Showing " (vm.leads.len()) " of " (vm.total) " leads"
                }

                @match vm.view_mode {
                    ViewMode::Table => { (table_view(&vm.leads)) }
                    ViewMode::Cards => { (cards_view(&vm.leads)) }
                    ViewMode::Kanban => { (kanban_view(&vm.leads)) }
                }
            }
        },
    )
}

/// Exports reuse the current query string so what downloads is what's on
/// screen.
fn export_href(vm: &LeadsVm, ext: &str) -> String {
    let mut query = vec![format!("q={}", urlencode(&vm.search))];
    if let Some(status) = vm.status {
        query.push(format!("status={}", status.as_str()));
    }
    if let Some(sort) = vm.sort {
        query.push(format!("sort={}", sort.as_str()));
    }
    for (i, c) in vm.conditions.iter().enumerate() {
        query.push(format!("cf{i}={}", c.field.as_str()));
        query.push(format!("co{i}={}", c.op.as_str()));
        query.push(format!("cv{i}={}", urlencode(&c.value)));
    }
    format!("/leads/export.{ext}?{}", query.join("&"))
}

fn urlencode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
