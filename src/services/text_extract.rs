pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Generic type sent by browsers and curl for unknown uploads; we fall back to the extension.
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {content_type}")]
    UnsupportedFileType { content_type: String },

    #[error("{0}")]
    Parse(String),

    #[error("Text extraction task panicked: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

/// Check if a file is supported by MIME type or, for generic uploads, extension.
pub fn is_supported(content_type: &str, filename: &str) -> bool {
    detect_kind(content_type, filename).is_ok()
}

/// Pick the extraction branch for an upload.
pub fn detect_kind(content_type: &str, filename: &str) -> Result<DocumentKind, ExtractError> {
    match content_type {
        PDF_MIME => Ok(DocumentKind::Pdf),
        DOCX_MIME => Ok(DocumentKind::Docx),
        OCTET_STREAM_MIME => match extension_from_filename(filename).as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            Some(ext) => Err(ExtractError::UnsupportedFileType {
                content_type: format!("{content_type} (ext: {ext})"),
            }),
            None => Err(ExtractError::UnsupportedFileType {
                content_type: content_type.to_string(),
            }),
        },
        other => Err(ExtractError::UnsupportedFileType {
            content_type: other.to_string(),
        }),
    }
}

/// Extract text from file bytes, routing to the correct extractor.
///
/// Both parsers are CPU-bound, so they run on the blocking thread pool via
/// `spawn_blocking` to keep the async runtime free. The buffer never touches disk.
pub async fn extract_text(
    bytes: Vec<u8>,
    content_type: &str,
    filename: &str,
) -> Result<String, ExtractError> {
    let kind = detect_kind(content_type, filename)?;
    let fname = filename.to_string();

    tracing::info!(
        "extract_text: starting {kind:?} extraction for '{fname}' ({content_type}, {} bytes)",
        bytes.len()
    );

    tokio::task::spawn_blocking(move || {
        let result = extract_text_sync(&bytes, kind);
        match &result {
            Ok(text) => tracing::info!("extract_text: '{fname}' extraction succeeded, {} chars", text.len()),
            Err(e) => tracing::error!("extract_text: '{fname}' extraction failed: {e}"),
        }
        result
    })
    .await?
}

fn extract_text_sync(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    match kind {
        DocumentKind::Pdf => extract_pdf(bytes),
        DocumentKind::Docx => extract_docx(bytes),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Parse(format!("Failed to extract text from PDF: {e}")))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractError::Parse(format!("Failed to read DOCX: {e}")))?;

    let mut text = String::new();
    for child in doc.document.children.iter() {
        collect_docx_text(child, &mut text);
    }
    Ok(text)
}

fn collect_docx_text(child: &docx_rs::DocumentChild, out: &mut String) {
    match child {
        docx_rs::DocumentChild::Paragraph(p) => {
            push_paragraph_text(&p.children, out);
            out.push('\n');
        }
        docx_rs::DocumentChild::Table(table) => {
            for row in &table.rows {
                let docx_rs::TableChild::TableRow(tr) = row;
                for cell in &tr.cells {
                    let docx_rs::TableRowChild::TableCell(tc) = cell;
                    for tc_child in &tc.children {
                        if let docx_rs::TableCellContent::Paragraph(p) = tc_child {
                            push_paragraph_text(&p.children, out);
                            out.push('\t');
                        }
                    }
                }
                out.push('\n');
            }
        }
        _ => {}
    }
}

fn push_paragraph_text(children: &[docx_rs::ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                for rc in &run.children {
                    if let docx_rs::RunChild::Text(t) = rc {
                        out.push_str(&t.text);
                    }
                }
            }
            // Links in resumes (portfolio, LinkedIn) carry their label as nested runs.
            docx_rs::ParagraphChild::Hyperlink(link) => push_paragraph_text(&link.children, out),
            _ => {}
        }
    }
}

fn extension_from_filename(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}
