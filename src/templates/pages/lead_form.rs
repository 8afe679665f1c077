use maud::{html, Markup};

use crate::auth::guard::AuthedUser;
use crate::domain::lead::{Disposition, Lead, Occupancy, Status, Temperature};
use crate::templates::desktop_layout;

/// Shared form body for create and edit. `lead` is None on create.
fn lead_fields(lead: Option<&Lead>) -> Markup {
    let text = |f: fn(&Lead) -> String| lead.map(f).unwrap_or_default();

    html! {
        label { "Owner name" }
        input type="text" name="owner_name" required
            value=(text(|l| l.owner_name.clone()));

        label { "Property address" }
        input type="text" name="property_address" required
            value=(text(|l| l.property_address.clone()));

        label { "Tax ID" }
        input type="text" name="tax_id" value=(text(|l| l.tax_id.clone().unwrap_or_default()));

        label { "Lawsuit number" }
        input type="text" name="lawsuit_no" value=(text(|l| l.lawsuit_no.clone().unwrap_or_default()));

        label { "Current arrears" }
        input type="text" name="arrears"
            value=(text(|l| l.arrears.map(|a| format!("{a:.2}")).unwrap_or_default()));

        label { "Status" }
        select name="status" {
            @for s in Status::all() {
                option value=(s.as_str()) selected[lead.map(|l| l.status) == Some(s)] {
                    (s.as_str().to_uppercase())
                }
            }
        }

        label { "Temperature" }
        select name="temperature" {
            @for t in [Temperature::Hot, Temperature::Warm, Temperature::Cold] {
                option value=(t.as_str()) selected[lead.map(|l| l.temperature) == Some(t)] {
                    (t.as_str().to_uppercase())
                }
            }
        }

        label { "Occupancy" }
        select name="occupancy" {
            @for o in [
                Occupancy::OwnerOccupied,
                Occupancy::TenantOccupied,
                Occupancy::Vacant,
                Occupancy::Occupied,
                Occupancy::Unknown,
            ] {
                option value=(o.as_str()) selected[lead.map(|l| l.occupancy) == Some(o)] {
                    (o.as_str())
                }
            }
        }

        label { "Disposition" }
        select name="disposition" {
            @for d in [Disposition::Undecided, Disposition::Qualified, Disposition::Disqualified] {
                option value=(d.as_str()) selected[lead.map(|l| l.disposition) == Some(d)] {
                    (d.as_str())
                }
            }
        }

        label { "Phone" }
        input type="text" name="phone" value=(text(|l| l.phone.clone().unwrap_or_default()));

        label { "Email" }
        input type="text" name="email" value=(text(|l| l.email.clone().unwrap_or_default()));

        label { "Notes" }
        textarea name="notes" rows="4" { (text(|l| l.notes.clone())) }
    }
}

pub fn new_lead_page(user: &AuthedUser) -> Markup {
    desktop_layout(
        "New lead",
        Some(user),
        html! {
            main class="container narrow" {
                h1 { "New lead" }
                form action="/leads" method="post" class="card" {
                    (lead_fields(None))
                    button type="submit" { "Create lead" }
                }
            }
        },
    )
}

pub fn edit_lead_page(user: &AuthedUser, lead: &Lead) -> Markup {
    desktop_layout(
        "Edit lead",
        Some(user),
        html! {
            main class="container narrow" {
                h1 { "Edit " (lead.owner_name) }
                form action=(format!("/leads/{}/edit", lead.id)) method="post" class="card" {
                    (lead_fields(Some(lead)))
                    button type="submit" { "Save changes" }
                }
            }
        },
    )
}
