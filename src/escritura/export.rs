//! Plain-text export of deed content

use std::path::{Path, PathBuf};
use tracing::info;

use crate::escritura::errors::EscrituraError;

/// Write the current deed text to `escritura_<protocolo>.txt` inside
/// `export_dir`, creating the directory when needed. Returns the written
/// path.
pub fn export_text(
    export_dir: &Path,
    numero_protocolo: &str,
    conteudo: &str,
) -> Result<PathBuf, EscrituraError> {
    let protocolo = if numero_protocolo.trim().is_empty() {
        "documento"
    } else {
        numero_protocolo
    };

    std::fs::create_dir_all(export_dir)?;
    let path = export_dir.join(format!("escritura_{}.txt", protocolo));
    std::fs::write(&path, conteudo)?;

    info!("Exported deed text to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_text(temp_dir.path(), "PROT-123456789", "texto da escritura").unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "escritura_PROT-123456789.txt"
        );
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "texto da escritura"
        );
    }

    #[test]
    fn test_export_falls_back_to_documento() {
        let temp_dir = TempDir::new().unwrap();
        let path = export_text(temp_dir.path(), "  ", "conteúdo").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "escritura_documento.txt"
        );
    }

    #[test]
    fn test_export_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("saida").join("escrituras");
        let path = export_text(&nested, "PROT-000000007", "x").unwrap();
        assert!(path.exists());
    }
}
