use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// One entry of the static subject catalog (id -> display name). Reference
/// data only; the store never persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub subjects_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<AppConfig> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let port = env::var("PORT")
            .map(|x| x.parse::<u16>())
            .unwrap_or(Ok(8080))
            .context("PORT")?;
        let data_dir = env::var("ATTENDANCE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));
        let subjects_path = env::var("ATTENDANCE_SUBJECTS_PATH").ok().map(PathBuf::from);
        Ok(AppConfig {
            host,
            port,
            data_dir,
            subjects_path,
        })
    }
}

/// Load the subject catalog from a JSON file (`[{"id": .., "name": ..}, ..]`),
/// or fall back to the built-in list.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<Vec<Subject>> {
    let Some(path) = path else {
        return Ok(default_catalog());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read subject catalog {}", path.display()))?;
    let subjects: Vec<Subject> = serde_json::from_str(&raw)
        .with_context(|| format!("parse subject catalog {}", path.display()))?;
    Ok(subjects)
}

fn subject(id: &str, name: &str) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn default_catalog() -> Vec<Subject> {
    vec![
        subject("path_theory", "PATHOLOGY/THEORY"),
        subject("comm_clinic", "COMMUNITY MEDICINE/CLINICAL PRACTICE"),
        subject("pharm_theory", "PHARMACOLOGY/THEORY"),
        subject("pharm_prac", "PHARMACOLOGY/PRACTICAL"),
        subject("micro_theory", "MICROBIOLOGY/THEORY"),
        subject("path_prac", "PATHOLOGY/PRACTICAL"),
        subject("micro_prac", "MICROBIOLOGY/PRACTICAL"),
        subject("pedi_clin", "PAEDIATRIC/CLINICAL"),
        subject("dent_clinic", "DENTAL/CLINIC"),
        subject("obg_clinic", "OBG/CLINIC"),
        subject("gen_surg", "GENERAL SURGERY/CLINIC"),
        subject("comm_theory", "COMMUNITY MEDICINE/THEORY"),
        subject("gen_med", "GENERAL MEDICINE/CLINIC"),
        subject("forens_prac", "FORENSIC MEDICINE/PRACTICAL"),
    ]
}
