pub mod nager_date;
pub mod open_holidays;

pub use nager_date::NagerDateSource;
pub use open_holidays::OpenHolidaysSource;

use crate::domain::errors::SourceError;

fn request_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Http(format!("timed out: {}", err))
    } else if err.is_connect() {
        SourceError::Http(format!("connection failed: {}", err))
    } else {
        SourceError::Http(err.to_string())
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SourceError::Status(status.as_u16()))
    }
}
