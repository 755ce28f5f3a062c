use std::io::Write;
use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::importer::ImportSummary;

/// Serializes an object to a JSON file.
pub fn object_to_json<T: Serialize>(output_path: &Path, object: &T) -> Result<()> {
    let j = serde_json::to_string_pretty(object)?;
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(j.as_bytes())?;
    Ok(())
}

/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(file_path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn report_text(summary: &ImportSummary) -> String {
    let mut s = String::new();
    s += format!("Imported cameras: {}\n", summary.imported).as_str();
    s += format!("Skipped features: {}\n", summary.skipped).as_str();
    s += format!("Matched images:   {}\n\n", summary.matched_images).as_str();
    s += format!(
        "Offset: X:{:.2} Y:{:.2} Z:{:.2} (label {})\n",
        summary.offset.x,
        summary.offset.y,
        summary.offset.z,
        if summary.label_emitted { "created" } else { "skipped" }
    )
    .as_str();
    if !summary.skip_reasons.is_empty() {
        s += "\nSkipped:\n";
        for reason in &summary.skip_reasons {
            s += format!("    {}\n", reason).as_str();
        }
    }
    s
}

/// Writes the import summary to a text file.
pub fn write_report(output_path: &Path, summary: &ImportSummary) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(report_text(summary).as_bytes())?;
    Ok(())
}
