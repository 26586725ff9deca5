use mime_guess::mime;
use resume_ranker::candidates::{ExtractionFailure, SourceDocument};
use std::fs;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Largest single résumé accepted from an upload.
pub(crate) const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// One file received over HTTP, before any text extraction.
#[derive(Debug, Clone)]
pub(crate) struct UploadedFile {
    pub(crate) file_name: String,
    pub(crate) declared_pdf: bool,
    pub(crate) bytes: Vec<u8>,
}

impl UploadedFile {
    /// Only files sent as `application/pdf` reach text extraction; everything
    /// else is reported back as skipped.
    pub(crate) fn into_document(self) -> Result<SourceDocument, ExtractionFailure> {
        if !self.declared_pdf {
            return Err(ExtractionFailure::new(
                self.file_name,
                "Only PDF files are allowed",
            ));
        }
        if self.bytes.len() > MAX_RESUME_BYTES {
            return Err(ExtractionFailure::new(
                self.file_name,
                format!("file exceeds the {} MiB limit", MAX_RESUME_BYTES / (1024 * 1024)),
            ));
        }
        pdf_document(&self.file_name, &self.bytes)
    }
}

pub(crate) fn is_pdf_mime(essence: &str) -> bool {
    essence
        .split(';')
        .next()
        .map(|value| value.trim().eq_ignore_ascii_case(mime::APPLICATION_PDF.essence_str()))
        .unwrap_or(false)
}

/// Expand directories one level deep; plain files pass through untouched.
pub(crate) fn collect_paths(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries = fs::read_dir(input)?
                .map(|entry| entry.map(|entry| entry.path()))
                .collect::<io::Result<Vec<_>>>()?;
            entries.retain(|path| path.is_file());
            entries.sort();
            paths.extend(entries);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

/// Read a résumé from disk. The file type is guessed from the extension:
/// PDFs go through text extraction and `text/*` files are read as-is.
pub(crate) fn load_document(path: &Path) -> Result<SourceDocument, ExtractionFailure> {
    let file_name = display_name(path);
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    debug!(%file_name, %mime, "loading document");

    if mime == mime::APPLICATION_PDF {
        let bytes =
            fs::read(path).map_err(|err| ExtractionFailure::new(&file_name, err.to_string()))?;
        pdf_document(&file_name, &bytes)
    } else if mime.type_() == mime::TEXT {
        let text = fs::read_to_string(path)
            .map_err(|err| ExtractionFailure::new(&file_name, err.to_string()))?;
        Ok(SourceDocument::new(file_name, text))
    } else {
        Err(ExtractionFailure::new(
            file_name,
            format!("unsupported file type {mime}"),
        ))
    }
}

/// Extract the text layer of an in-memory PDF.
pub(crate) fn pdf_document(
    file_name: &str,
    bytes: &[u8],
) -> Result<SourceDocument, ExtractionFailure> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractionFailure::new(file_name, "not a PDF document"));
    }

    // pdf-extract panics on some malformed inputs.
    let extracted = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractionFailure::new(file_name, "PDF text extraction failed"))?;

    match extracted {
        Ok(text) => Ok(SourceDocument::new(file_name, text)),
        Err(err) => Err(ExtractionFailure::new(file_name, err.to_string())),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
