use crate::backend::domain::commands::export::{ExportToPathResult, RenderedExport};
use shared::{ExportDataResponse, ExportToPathResponse};

pub struct ExportMapper;

impl ExportMapper {
    pub fn to_data_dto(rendered: RenderedExport) -> ExportDataResponse {
        ExportDataResponse {
            title: rendered.title,
            filename: rendered.filename,
            content: rendered.content,
            row_count: rendered.row_count,
        }
    }

    pub fn to_path_dto(result: ExportToPathResult) -> ExportToPathResponse {
        ExportToPathResponse {
            success: true,
            message: format!("Exported {} rows to {}", result.row_count, result.file_path),
            file_path: result.file_path,
            row_count: result.row_count,
        }
    }

    pub fn to_failed_path_dto(message: String) -> ExportToPathResponse {
        ExportToPathResponse {
            success: false,
            message,
            file_path: String::new(),
            row_count: 0,
        }
    }
}
