pub mod activities;
pub mod campaigns;
pub mod connection;
pub mod leads;
pub mod users;
