pub mod mailer;
pub mod telephony;
