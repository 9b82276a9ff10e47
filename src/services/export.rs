use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::models::{ResultKind, TableRow};

/// Content type browsers associate with spreadsheet downloads
pub const EXCEL_MIME: &str = "application/vnd.ms-excel";

/// A rendered workbook ready to be downloaded
#[derive(Debug, Clone)]
pub struct Export {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Export {
    /// Renders `rows` into a single-sheet workbook named after `kind`
    pub fn render<R, S>(kind: ResultKind, ids: &[S], rows: &[R]) -> Result<Self, XlsxError>
    where
        R: TableRow,
        S: AsRef<str>,
    {
        let bytes = workbook(kind.sheet_name(), rows)?;
        let file_name = kind.file_name(ids);
        tracing::debug!(
            file_name = %file_name,
            rows = rows.len(),
            bytes = bytes.len(),
            "Rendered export"
        );
        Ok(Self { file_name, bytes })
    }
}

impl IntoResponse for Export {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, EXCEL_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Writes a header row and one line per row, with an autofilter so the
/// columns stay sortable in the spreadsheet
fn workbook<R: TableRow>(sheet: &str, rows: &[R]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    for (col, header) in R::HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, cell) in row.cells().into_iter().enumerate() {
            worksheet.write_string(i as u32 + 1, col as u16, cell)?;
        }
    }

    let last_col = R::HEADERS.len().saturating_sub(1) as u16;
    worksheet.autofilter(0, 0, rows.len() as u32, last_col)?;
    worksheet.autofit();

    workbook.save_to_buffer()
}
