use crate::models::Drone;
use crate::Result;
use log::info;
use std::path::Path;

/// Write the extracted records to a CSV file, one row per record.
///
/// Columns are id, brand, title, price, reviews, stars; no header row.
pub fn write_csv(path: &Path, drones: &[Drone]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for drone in drones {
        writer.write_record(drone.csv_record())?;
    }
    writer.flush().map_err(csv::Error::from)?;
    info!("wrote {} records to {}", drones.len(), path.display());
    Ok(())
}
