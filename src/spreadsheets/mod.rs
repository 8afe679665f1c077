pub mod leads_xlsx;

pub use leads_xlsx::export_leads_xlsx;
