//! PDF attachment admission for submissions

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::escritura::errors::EscrituraError;

/// Advertised ceiling on attachments per submission.
pub const MAX_ATTACHMENTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfAttachment {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub pages: usize,
}

impl PdfAttachment {
    /// Admit a file into an attachment set. Only files carrying a `.pdf`
    /// extension that lopdf can actually parse are accepted.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EscrituraError> {
        let path = path.into();

        if !has_pdf_extension(&path) {
            return Err(EscrituraError::NotPdf(path));
        }

        let metadata = std::fs::metadata(&path)?;
        let document = lopdf::Document::load(&path).map_err(|e| EscrituraError::InvalidPdf {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let pages = document.get_pages().len();

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "documento.pdf".to_string());

        debug!(
            "Admitted attachment {} ({} bytes, {} pages)",
            file_name,
            metadata.len(),
            pages
        );

        Ok(Self {
            path,
            file_name,
            size_bytes: metadata.len(),
            pages,
        })
    }

    /// Size in megabytes, displayed next to the file name.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Collect every PDF under a directory, sorted by file name. Files without a
/// `.pdf` extension are skipped; an unparseable PDF aborts the collection.
pub fn collect_from_dir(dir: &Path) -> Result<Vec<PdfAttachment>, EscrituraError> {
    let mut attachments = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
            attachments.push(PdfAttachment::load(entry.path())?);
        }
    }
    Ok(attachments)
}

/// Write a single-page PDF, used to build fixtures in tests.
#[cfg(test)]
pub(crate) fn write_minimal_pdf(path: &Path) {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![100.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal("certidao")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).expect("save sample pdf");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("certidao.pdf");
        write_minimal_pdf(&path);

        let attachment = PdfAttachment::load(&path).unwrap();
        assert_eq!(attachment.file_name, "certidao.pdf");
        assert_eq!(attachment.pages, 1);
        assert!(attachment.size_bytes > 0);
        assert!(attachment.size_mb() > 0.0);
    }

    #[test]
    fn test_rejects_non_pdf_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("procuracao.txt");
        std::fs::write(&path, "not a pdf").unwrap();

        match PdfAttachment::load(&path) {
            Err(EscrituraError::NotPdf(p)) => assert_eq!(p, path),
            other => panic!("expected NotPdf, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_rejects_corrupt_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrompido.pdf");
        std::fs::write(&path, "definitely not pdf bytes").unwrap();

        assert!(matches!(
            PdfAttachment::load(&path),
            Err(EscrituraError::InvalidPdf { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            PdfAttachment::load("/nao/existe/arquivo.pdf"),
            Err(EscrituraError::Io(_))
        ));
    }

    #[test]
    fn test_collect_from_dir_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        write_minimal_pdf(&temp_dir.path().join("b_matricula.pdf"));
        write_minimal_pdf(&temp_dir.path().join("a_certidao.pdf"));
        std::fs::write(temp_dir.path().join("notas.txt"), "skip me").unwrap();

        let attachments = collect_from_dir(temp_dir.path()).unwrap();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].file_name, "a_certidao.pdf");
        assert_eq!(attachments[1].file_name, "b_matricula.pdf");
    }
}
