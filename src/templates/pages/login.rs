use maud::{html, Markup};

use crate::templates::desktop_layout;

/// Sign-in page with signup and reset-request alongside. `notice` carries
/// one-shot feedback (bad password, reset mail sent, …).
pub fn login_page(notice: Option<&str>) -> Markup {
    desktop_layout(
        "Sign in",
        None,
        html! {
            main class="container narrow" {
                h1 { "Sign in" }
                @if let Some(msg) = notice {
                    p class="notice" { (msg) }
                }

                form action="/login" method="post" class="card" {
                    label for="email" { "Email" }
                    input type="email" name="email" id="email" required;
                    label for="password" { "Password" }
                    input type="password" name="password" id="password" required;
                    button type="submit" { "Sign in" }
                }

                details {
                    summary { "Create an account" }
                    form action="/signup" method="post" class="card" {
                        label for="su-email" { "Email" }
                        input type="email" name="email" id="su-email" required;
                        label for="su-password" { "Password" }
                        input type="password" name="password" id="su-password" required;
                        p class="hint" { "At least 8 characters with a letter and a digit." }
                        button type="submit" { "Sign up" }
                    }
                }

                details {
                    summary { "Forgot your password?" }
                    form action="/auth/reset-request" method="post" class="card" {
                        label for="rr-email" { "Email" }
                        input type="email" name="email" id="rr-email" required;
                        button type="submit" { "Send reset link" }
                    }
                }
            }
        },
    )
}
