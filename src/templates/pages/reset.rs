use maud::{html, Markup};

use crate::templates::desktop_layout;

/// Shown after a reset link was redeemed; the fresh session cookie is
/// already set, so the form posts like any authenticated password change.
pub fn reset_password_page(email: &str) -> Markup {
    desktop_layout(
        "Choose a new password",
        None,
        html! {
            main class="container narrow" {
                h1 { "Choose a new password" }
                p { "Resetting the password for " strong { (email) } "." }

                form action="/password" method="post" class="card" {
                    label for="new" { "New password" }
                    input type="password" name="new_password" id="new" required;
                    p class="hint" { "At least 8 characters with a letter and a digit." }
                    button type="submit" { "Save password" }
                }
            }
        },
    )
}
