pub mod error;
pub mod profile;
pub mod refine;
pub mod report;
pub mod scans;

pub use error::ImportError;
pub use profile::RefineProfile;
pub use refine::{refine_batch, refine_row, refine_rows, RefinedRow};
pub use report::{write_csv, write_json, BatchSummary};
pub use scans::{read_scans, ScanRow};

/// Read, refine and write a whole scan table in one call.
pub mod import {
    use crate::*;

    pub async fn refine_csv<R: std::io::Read, W: std::io::Write>(
        input: R,
        output: W,
        profile: &RefineProfile,
    ) -> Result<BatchSummary, ImportError> {
        let rows = read_scans(input, profile)?;
        let refined = refine_batch(rows, profile.use_existing, profile.workers).await?;
        write_csv(output, &refined)?;
        Ok(BatchSummary::from_rows(&refined))
    }

}
