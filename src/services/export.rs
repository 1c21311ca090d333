//! XLSX export of the admin sales listing.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::model::AdminSaleRow;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("workbook write failed: {0}")]
    Xlsx(#[from] XlsxError),
}

const HEADERS: [&str; 8] = [
    "Date", "Customer", "Phone", "Barcode", "Qty", "Amount", "Salesman", "Outlet",
];

/// Render sale rows into a single-sheet workbook, returned as the raw
/// file bytes. An empty slice still yields a workbook with the header
/// row so the download is never a zero-byte file.
pub fn sales_workbook(rows: &[AdminSaleRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Sales")?;

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_string(r, 0, row.timestamp.format("%Y-%m-%d").to_string())?;
            worksheet.write_string(r, 1, &row.customer_name)?;
            worksheet.write_string(r, 2, &row.customer_number)?;
            worksheet.write_string(r, 3, &row.barcode)?;
            worksheet.write_number(r, 4, row.qty as f64)?;
            worksheet.write_number(r, 5, row.amount)?;
            worksheet.write_string(r, 6, row.salesman_label())?;
            worksheet.write_string(r, 7, row.outlet_label())?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
