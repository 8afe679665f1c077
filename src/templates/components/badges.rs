use maud::{html, Markup};

use crate::domain::lead::{Disposition, Status, Temperature};

/// Exhaustive status -> badge class mapping. Parsing already funnels
/// unrecognized DB values to a concrete variant, so there is no stringly
/// fallback path here; `badge-muted` is the class for anything neutral.
fn status_class(status: Status) -> &'static str {
    match status {
        Status::Hot => "badge badge-hot",
        Status::Warm => "badge badge-warm",
        Status::Cold => "badge badge-cold",
        Status::Pass => "badge badge-muted",
        Status::Keep => "badge badge-keep",
    }
}

pub fn status_badge(status: Status) -> Markup {
    html! {
        span class=(status_class(status)) { (status.as_str().to_uppercase()) }
    }
}

pub fn temperature_badge(temp: Temperature) -> Markup {
    let class = match temp {
        Temperature::Hot => "badge badge-hot",
        Temperature::Warm => "badge badge-warm",
        Temperature::Cold => "badge badge-cold",
    };
    html! { span class=(class) { (temp.as_str().to_uppercase()) } }
}

pub fn disposition_badge(disposition: Disposition) -> Markup {
    let class = match disposition {
        Disposition::Undecided => "badge badge-muted",
        Disposition::Qualified => "badge badge-keep",
        Disposition::Disqualified => "badge badge-cold",
    };
    html! { span class=(class) { (disposition.as_str().to_uppercase()) } }
}
