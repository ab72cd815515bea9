mod errors;
mod scan_payload;

pub use scan_payload::ScanPayload;

#[cfg(test)]
use errors::PayloadError;

pub type UserId = String;
