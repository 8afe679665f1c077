mod admin_tests;
mod auth_tests;
mod guard_tests;
mod import_tests;
mod leads_tests;
mod prefs_tests;
