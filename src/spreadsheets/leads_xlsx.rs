use crate::domain::lead::Lead;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::Workbook;

/// Export the current (already filtered and sorted) lead view as XLSX.
pub fn export_leads_xlsx(leads: &[Lead]) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [
        "Tax ID",
        "Owner Name",
        "Property Address",
        "Tax Lawsuit Number",
        "Current Arrears",
        "Status",
        "Temperature",
        "Occupancy",
        "Disposition",
        "Phone",
        "Email",
        "Notes",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, lead.tax_id.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write tax id: {}", e)))?;

        worksheet
            .write_string(r, 1, &lead.owner_name)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write owner: {}", e)))?;

        worksheet
            .write_string(r, 2, &lead.property_address)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write address: {}", e)))?;

        worksheet
            .write_string(r, 3, lead.lawsuit_no.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write lawsuit no: {}", e)))?;

        worksheet
            .write_number(r, 4, lead.arrears.unwrap_or(0.0))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write arrears: {}", e)))?;

        worksheet
            .write_string(r, 5, lead.status.as_str())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write status: {}", e)))?;

        worksheet
            .write_string(r, 6, lead.temperature.as_str())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write temperature: {}", e)))?;

        worksheet
            .write_string(r, 7, lead.occupancy.as_str())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write occupancy: {}", e)))?;

        worksheet
            .write_string(r, 8, lead.disposition.as_str())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write disposition: {}", e)))?;

        worksheet
            .write_string(r, 9, lead.phone.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write phone: {}", e)))?;

        worksheet
            .write_string(r, 10, lead.email.as_deref().unwrap_or(""))
            .map_err(|e| ServerError::XlsxError(format!("Failed to write email: {}", e)))?;

        worksheet
            .write_string(r, 11, &lead.notes)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write notes: {}", e)))?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    xlsx_response(buffer, "leads.xlsx")
}
