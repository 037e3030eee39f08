use crate::domain::model::LabelBatch;
use crate::domain::ports::Storage;
use crate::utils::error::{LabelError, Result};
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::DateTime;

pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    file_stem: &'a str,
    description: &'a str,
    label_count: usize,
}

pub fn render_csv<R: Serialize>(records: &[R]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| LabelError::IoError(e.into_error()))
}

pub fn render_json<R: Serialize>(batch: &LabelBatch<R>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(batch)?)
}

fn render_manifest<R>(batches: &[LabelBatch<R>]) -> Result<Vec<u8>> {
    let entries: Vec<ManifestEntry<'_>> = batches
        .iter()
        .map(|batch| ManifestEntry {
            file_stem: &batch.file_stem,
            description: &batch.description,
            label_count: batch.records.len(),
        })
        .collect();
    Ok(serde_json::to_vec_pretty(&entries)?)
}

/// All files for a set of batches as `(file name, bytes)`, manifest last.
pub fn render_files<R: Serialize>(
    batches: &[LabelBatch<R>],
    formats: &[String],
) -> Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::new();

    for batch in batches {
        for format in formats {
            let data = match format.as_str() {
                "csv" => render_csv(&batch.records)?,
                "json" => render_json(batch)?,
                other => {
                    return Err(LabelError::InvalidConfigValueError {
                        field: "output.formats".to_string(),
                        value: other.to_string(),
                        reason: format!("Supported formats: {}", SUPPORTED_FORMATS.join(", ")),
                    })
                }
            };
            files.push((format!("{}.{}", batch.file_stem, format), data));
        }
    }

    files.push(("manifest.json".to_string(), render_manifest(batches)?));
    Ok(files)
}

/// Entries carry a fixed timestamp so the same batches always zip to the same bytes.
pub fn zip_files(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().last_modified_time(DateTime::default());

    for (name, data) in files {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Writes every batch to storage, either as loose files or as one archive.
/// Returns the relative paths written.
pub async fn write_batches<S: Storage, R: Serialize>(
    storage: &S,
    batches: &[LabelBatch<R>],
    formats: &[String],
    archive_name: Option<&str>,
) -> Result<Vec<String>> {
    let files = render_files(batches, formats)?;

    if let Some(archive_name) = archive_name {
        let data = zip_files(&files)?;
        tracing::debug!(
            "Writing archive {} with {} file(s), {} bytes",
            archive_name,
            files.len(),
            data.len()
        );
        storage.write_file(archive_name, &data).await?;
        return Ok(vec![archive_name.to_string()]);
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, data) in &files {
        tracing::debug!("Writing {} ({} bytes)", name, data.len());
        storage.write_file(name, data).await?;
        written.push(name.clone());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[derive(Serialize)]
    struct Row {
        name: String,
        weight: u32,
        code: Option<String>,
    }

    fn batch() -> LabelBatch<Row> {
        LabelBatch {
            file_stem: "horeca_lote_001".to_string(),
            description: "Etiquetas HORECA: Lote 1/1 (2 etiqueta(s))".to_string(),
            records: vec![
                Row { name: "MZC - CONSOME".to_string(), weight: 1000, code: Some("MZC".to_string()) },
                Row { name: "ARROZ".to_string(), weight: 500, code: None },
            ],
        }
    }

    #[test]
    fn test_render_csv_has_header_and_rows() {
        let csv = String::from_utf8(render_csv(&batch().records).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["name,weight,code", "MZC - CONSOME,1000,MZC", "ARROZ,500,"]);
    }

    #[test]
    fn test_render_files_per_format_plus_manifest() {
        let formats = vec!["csv".to_string(), "json".to_string()];
        let files = render_files(&[batch()], &formats).unwrap();
        let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["horeca_lote_001.csv", "horeca_lote_001.json", "manifest.json"]);

        let manifest: serde_json::Value = serde_json::from_slice(&files[2].1).unwrap();
        assert_eq!(manifest[0]["label_count"], 2);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let formats = vec!["pdf".to_string()];
        assert!(render_files(&[batch()], &formats).is_err());
    }

    #[test]
    fn test_zip_contains_all_files() {
        let files = render_files(&[batch()], &["csv".to_string()]).unwrap();
        let data = zip_files(&files).unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("horeca_lote_001.csv")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert!(content.starts_with("name,weight,code"));
    }
}
