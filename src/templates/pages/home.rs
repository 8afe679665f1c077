use maud::{html, Markup};

use crate::templates::desktop_layout;

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        None,
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Turn tax-delinquent properties into closed deals" }
                    p class="lead" {
                        "LeadLedger tracks every delinquent-tax lead from first "
                        "courthouse pull to final disposition: import lists, work "
                        "the phones, and keep your whole team on the same page."
                    }
                    a href="/login" class="cta" { "Sign in" }
                }
                section class="features" {
                    div class="card" {
                        h3 { "CSV import" }
                        p { "Drop in county export files and map columns in one step." }
                    }
                    div class="card" {
                        h3 { "Pipeline filters" }
                        p { "Slice your list by status, arrears, occupancy, and more." }
                    }
                    div class="card" {
                        h3 { "Campaigns" }
                        p { "Group leads into mailing and outreach campaigns." }
                    }
                }
            }
        },
    )
}
