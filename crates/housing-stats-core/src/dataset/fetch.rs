//! Download of the California Housing archive

use std::path::{Path, PathBuf};

use crate::errors::StatsResult;

/// Location of `cal_housing.tgz`
#[cfg(feature = "network")]
pub const ARCHIVE_URL: &str = "https://ndownloader.figshare.com/files/5976036";

#[cfg(feature = "network")]
const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Download the archive and extract the raw data file into `data_home`.
///
/// Returns the path of the extracted file.
#[cfg(feature = "network")]
pub fn fetch_raw_data(data_home: &Path) -> StatsResult<PathBuf> {
    use std::io::Cursor;

    use crate::errors::StatsError;

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()
        .map_err(|e| StatsError::Download(e.to_string()))?;
    let response = client
        .get(ARCHIVE_URL)
        .send()
        .map_err(|e| StatsError::Download(e.to_string()))?;
    if !response.status().is_success() {
        return Err(StatsError::Download(format!(
            "{ARCHIVE_URL} returned {}",
            response.status()
        )));
    }
    let bytes = response
        .bytes()
        .map_err(|e| StatsError::Download(e.to_string()))?;
    log::debug!("downloaded {} bytes from {ARCHIVE_URL}", bytes.len());

    extract_raw_data(Cursor::new(bytes), data_home)
}

#[cfg(not(feature = "network"))]
pub fn fetch_raw_data(data_home: &Path) -> StatsResult<PathBuf> {
    Err(crate::errors::StatsError::DatasetUnavailable(format!(
        "{} is missing and downloads need the `network` feature",
        data_home.join(super::california::RAW_DATA_FILE).display()
    )))
}

/// Extract `cal_housing.data` from a gzip-compressed tarball into `data_home`.
///
/// The file is written under a temporary name and renamed into place, so an
/// interrupted extraction never leaves a truncated data file behind.
#[cfg(feature = "network")]
pub fn extract_raw_data<R: std::io::Read>(archive: R, data_home: &Path) -> StatsResult<PathBuf> {
    use super::california::RAW_DATA_FILE;
    use crate::errors::StatsError;

    std::fs::create_dir_all(data_home)?;
    let target = data_home.join(RAW_DATA_FILE);
    let partial = data_home.join(format!("{RAW_DATA_FILE}.part"));

    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(archive));
    for entry in archive.entries()? {
        let mut entry = entry?;
        let is_data_file = entry
            .path()?
            .file_name()
            .is_some_and(|name| name == RAW_DATA_FILE);
        if is_data_file {
            entry.unpack(&partial)?;
            std::fs::rename(&partial, &target)?;
            log::info!("extracted {}", target.display());
            return Ok(target);
        }
    }

    Err(StatsError::Download(format!(
        "archive does not contain {RAW_DATA_FILE}"
    )))
}
