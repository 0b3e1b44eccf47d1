use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Document, DocumentHeader, DocumentKind};
use crate::config::{drafts_dir, write_toml};
use crate::error::{GinumError, Result};
use crate::ledger::{Adjustments, EntryMode, LineItem, LineItems};

/// On-disk shape of a draft (drafts/<name>.toml)
#[derive(Debug, Serialize, Deserialize)]
struct DraftFile {
    kind: DocumentKind,
    #[serde(default)]
    mode: EntryMode,
    #[serde(default)]
    header: DocumentHeader,
    #[serde(default)]
    adjustments: Adjustments,
    #[serde(default)]
    lines: Vec<LineItem>,
}

impl From<&Document> for DraftFile {
    fn from(doc: &Document) -> Self {
        Self {
            kind: doc.kind,
            mode: doc.mode(),
            header: doc.header.clone(),
            adjustments: doc.adjustments,
            lines: doc.lines.rows().to_vec(),
        }
    }
}

impl From<DraftFile> for Document {
    fn from(file: DraftFile) -> Self {
        let mode = Document::new(file.kind, file.mode).mode();
        Document {
            kind: file.kind,
            header: file.header,
            adjustments: file.adjustments,
            lines: LineItems::from_rows(mode, file.lines),
        }
    }
}

pub fn validate_draft_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GinumError::InvalidDraftName(name.to_string()))
    }
}

fn draft_path(cfg_dir: &Path, name: &str) -> Result<PathBuf> {
    validate_draft_name(name)?;
    Ok(drafts_dir(cfg_dir).join(format!("{name}.toml")))
}

pub fn draft_exists(cfg_dir: &Path, name: &str) -> Result<bool> {
    Ok(draft_path(cfg_dir, name)?.exists())
}

pub fn load_draft(cfg_dir: &Path, name: &str) -> Result<Document> {
    let path = draft_path(cfg_dir, name)?;
    if !path.exists() {
        return Err(GinumError::DraftNotFound(name.to_string()));
    }
    let content = fs::read_to_string(&path)?;
    let file: DraftFile =
        toml::from_str(&content).map_err(|e| GinumError::ConfigParse { path, source: e })?;
    Ok(file.into())
}

pub fn save_draft(cfg_dir: &Path, name: &str, doc: &Document) -> Result<()> {
    let path = draft_path(cfg_dir, name)?;
    fs::create_dir_all(drafts_dir(cfg_dir))?;
    write_toml(&path, &DraftFile::from(doc))?;
    debug!(draft = name, rows = doc.lines.len(), "saved draft");
    Ok(())
}

pub fn delete_draft(cfg_dir: &Path, name: &str) -> Result<()> {
    let path = draft_path(cfg_dir, name)?;
    if !path.exists() {
        return Err(GinumError::DraftNotFound(name.to_string()));
    }
    fs::remove_file(path)?;
    Ok(())
}

/// Names and documents of all drafts, sorted by name
pub fn list_drafts(cfg_dir: &Path) -> Result<Vec<(String, Document)>> {
    let dir = drafts_dir(cfg_dir);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();
    names.sort();

    names
        .into_iter()
        .map(|name| load_draft(cfg_dir, &name).map(|doc| (name, doc)))
        .collect()
}
