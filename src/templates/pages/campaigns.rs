use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::domain::lead::{Campaign, CampaignLead};
use crate::templates::desktop_layout;
use crate::templates::pages::fmt_ts;

pub fn campaigns_page(user: &AuthedUser, campaigns: &[(Campaign, i64)]) -> Markup {
    desktop_layout(
        "Campaigns",
        Some(user),
        html! {
            main class="container" {
                h1 { "Campaigns" }

                form action="/campaigns" method="post" class="card" {
                    label { "Name" }
                    input type="text" name="name" required;
                    label { "Description" }
                    input type="text" name="description";
                    button type="submit" { "Create campaign" }
                }

                @if campaigns.is_empty() {
                    p { "No campaigns yet." }
                } @else {
                    table {
                        thead { tr { th { "Name" } th { "Leads" } th { "Created" } } }
                        tbody {
                            @for (campaign, count) in campaigns {
                                tr {
                                    td { a href=(format!("/campaigns/{}", campaign.id)) { (campaign.name) } }
                                    td { (count) }
                                    td { (fmt_ts(campaign.created_at)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn campaign_detail_page(
    user: &AuthedUser,
    campaign: &Campaign,
    leads: &[CampaignLead],
) -> Markup {
    desktop_layout(
        &campaign.name,
        Some(user),
        html! {
            main class="container" {
                header class="page-header" {
                    h1 { (campaign.name) }
                    div class="actions" {
                        a href=(format!("/campaigns/{}/import", campaign.id)) { "Import CSV" }
                    }
                }
                @if let Some(desc) = &campaign.description {
                    p class="lead" { (desc) }
                }

                p { (leads.len()) " leads in this campaign." }

                @if !leads.is_empty() {
                    table class="lead-table" {
                        thead {
                            tr { th { "Owner" } th { "Property" } th { "Tax ID" } th { "Arrears" } th { "Phone" } }
                        }
                        tbody {
                            @for lead in leads {
                                tr {
                                    td { (lead.owner_name) }
                                    td { (lead.property_address) }
                                    td { (lead.tax_id.as_deref().unwrap_or("")) }
                                    td { (lead.arrears.map(|a| format!("${a:.2}")).unwrap_or_default()) }
                                    td { (lead.phone.as_deref().unwrap_or("")) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
