use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::domain::lead::{Heir, Lead, LeadFile};
use crate::templates::components::{disposition_badge, status_badge, temperature_badge};
use crate::templates::desktop_layout;
use crate::templates::pages::fmt_ts;

pub struct LeadDetailVm {
    pub user: AuthedUser,
    pub lead: Lead,
    pub heirs: Vec<Heir>,
    pub files: Vec<LeadFile>,
    pub tags: Vec<String>,
    /// One-shot feedback from a comms action ("call logged").
    pub notice: Option<String>,
}

pub fn lead_detail_page(vm: &LeadDetailVm) -> Markup {
    let lead = &vm.lead;

    desktop_layout(
        &lead.owner_name,
        Some(&vm.user),
        html! {
            main class="container" {
                header class="page-header" {
                    h1 { (lead.owner_name) }
                    div class="actions" {
                        a href=(format!("/leads/{}/edit", lead.id)) { "Edit" }
                        form action=(format!("/leads/{}/delete", lead.id)) method="post" class="inline" {
                            button type="submit" class="danger" { "Delete" }
                        }
                    }
                }

                @if let Some(msg) = &vm.notice {
                    p class="notice" { (msg) }
                }

                section class="card" {
                    h3 { "Property" }
                    p { (lead.property_address) }
                    p {
                        "Tax ID: " (lead.tax_id.as_deref().unwrap_or("—"))
                        " · Lawsuit: " (lead.lawsuit_no.as_deref().unwrap_or("—"))
                    }
                    @match lead.arrears {
                        Some(a) => { p { "Arrears: " strong { "$" (format!("{a:.2}")) } } }
                        None => { p { "Arrears: unknown" } }
                    }
                    p {
                        (status_badge(lead.status)) " "
                        (temperature_badge(lead.temperature)) " "
                        (disposition_badge(lead.disposition)) " "
                        span class="badge badge-muted" { (lead.occupancy.as_str()) }
                    }
                    @if !vm.tags.is_empty() {
                        p class="tags" {
                            @for tag in &vm.tags {
                                span class="tag" {
                                    (tag)
                                    form action=(format!("/leads/{}/tags/remove", lead.id)) method="post" class="inline" {
                                        input type="hidden" name="tag" value=(tag);
                                        button type="submit" { "×" }
                                    }
                                }
                            }
                        }
                    }
                    form action=(format!("/leads/{}/tags", lead.id)) method="post" class="inline" {
                        input type="text" name="tag" placeholder="Add tag";
                        button type="submit" { "Add" }
                    }
                }

                section class="card" {
                    h3 { "Contact" }
                    p {
                        "Phone: " (lead.phone.as_deref().unwrap_or("—"))
                        " · Email: " (lead.email.as_deref().unwrap_or("—"))
                    }
                    // Click-to-call / SMS panel; backed by the telephony stub.
                    div class="comms-panel" {
                        form action=(format!("/leads/{}/call", lead.id)) method="post" class="inline" {
                            button type="submit" disabled[lead.phone.is_none()] { "Call" }
                        }
                        form action=(format!("/leads/{}/sms", lead.id)) method="post" class="inline" {
                            input type="text" name="body" placeholder="Text message";
                            button type="submit" disabled[lead.phone.is_none()] { "Send SMS" }
                        }
                    }
                }

                @if !lead.notes.is_empty() {
                    section class="card" {
                        h3 { "Notes" }
                        p { (lead.notes) }
                    }
                }

                section class="card" {
                    h3 { "Heirs" }
                    @if vm.heirs.is_empty() {
                        p { "No heirs recorded." }
                    } @else {
                        table {
                            thead { tr { th { "Name" } th { "Relationship" } th { "%" } th { "Contact" } th {} } }
                            tbody {
                                @for heir in &vm.heirs {
                                    tr {
                                        td { (heir.name) }
                                        td { (heir.relationship) }
                                        td { (heir.percentage) }
                                        td { (heir.contact.as_deref().unwrap_or("—")) }
                                        td {
                                            form action=(format!("/leads/{}/heirs/{}/delete", lead.id, heir.id)) method="post" {
                                                button type="submit" { "Remove" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    form action=(format!("/leads/{}/heirs", lead.id)) method="post" class="heir-form" {
                        input type="text" name="name" placeholder="Name" required;
                        input type="text" name="relationship" placeholder="Relationship";
                        input type="text" name="percentage" placeholder="%";
                        input type="text" name="contact" placeholder="Contact";
                        button type="submit" { "Add heir" }
                    }
                }

                section class="card" {
                    h3 { "Files" }
                    @if vm.files.is_empty() {
                        p { "No files attached." }
                    } @else {
                        ul {
                            @for file in &vm.files {
                                li {
                                    a href=(file.url) { (file.name) }
                                    " (" (file.file_type.as_deref().unwrap_or("file"))
                                    ", " (fmt_ts(file.uploaded_at)) ")"
                                    form action=(format!("/leads/{}/files/{}/delete", lead.id, file.id)) method="post" class="inline" {
                                        button type="submit" { "Remove" }
                                    }
                                }
                            }
                        }
                    }
                    form action=(format!("/leads/{}/files", lead.id)) method="post" class="file-form" {
                        input type="text" name="name" placeholder="File name" required;
                        input type="text" name="url" placeholder="URL" required;
                        input type="text" name="file_type" placeholder="Type";
                        button type="submit" { "Attach" }
                    }
                }
            }
        },
    )
}
