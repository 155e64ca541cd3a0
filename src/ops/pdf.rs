//! PDF operations: streamed download, page-stream merge, fixed-size page
//! splitting, and per-page rasterization.
//!
//! Merge and split manipulate the documents directly with `lopdf`.
//! Rasterization shells out to poppler's `pdftoppm`; when that binary is not
//! installed the failure is reported as [`PdfError::RasterizerMissing`],
//! distinct from every runtime error kind.

use crate::error::PdfError;
use crate::utils::logging;
use futures::StreamExt;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

fn io_err(path: &Path, source: std::io::Error) -> PdfError {
    PdfError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Download a PDF over HTTP, writing the body to disk chunk by chunk as it
/// arrives so the whole document is never buffered in memory. Returns the
/// number of bytes written. Non-2xx responses are an error.
pub async fn download_pdf(url: &str, output: &Path, timeout: Duration) -> Result<u64, PdfError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PdfError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let mut file = File::create(output).map_err(|e| io_err(output, e))?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).map_err(|e| io_err(output, e))?;
        written += chunk.len() as u64;
    }
    Ok(written)
}

/// Merge the pages of several PDFs into one document, in list order.
/// Missing inputs are skipped with a warning; when nothing is readable the
/// merge fails with [`PdfError::NoInputs`].
pub fn merge_pdfs(inputs: &[PathBuf], output: &Path) -> Result<(), PdfError> {
    let mut documents = Vec::new();
    for input in inputs {
        if !input.exists() {
            logging::log_warning(&format!("{} not found, skipping", input.display()));
            continue;
        }
        documents.push(Document::load(input)?);
    }
    if documents.is_empty() {
        return Err(PdfError::NoInputs);
    }

    let mut merged = merge_documents(documents)?;
    merged.save(output).map_err(|e| io_err(output, e))?;
    Ok(())
}

/// Combine loaded documents by renumbering their objects into one id space
/// and rebuilding a single page tree and catalog over all pages.
fn merge_documents(documents: Vec<Document>) -> Result<Document, PdfError> {
    let mut max_id = 1;
    let mut pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_, object_id) in doc.get_pages() {
            let object = doc.get_object(object_id)?.to_owned();
            pages.insert(object_id, object);
        }
        objects.extend(doc.objects.clone());
    }

    let mut merged = Document::with_version("1.5");
    let mut catalog: Option<(ObjectId, Object)> = None;
    let mut page_tree: Option<(ObjectId, Object)> = None;

    for (object_id, object) in objects.iter() {
        match object.type_name().unwrap_or("") {
            "Catalog" => {
                let id = catalog.as_ref().map(|(id, _)| *id).unwrap_or(*object_id);
                catalog = Some((id, object.clone()));
            }
            "Pages" => {
                if let Ok(dict) = object.as_dict() {
                    let mut dict = dict.clone();
                    if let Some((_, ref existing)) = page_tree {
                        if let Ok(existing) = existing.as_dict() {
                            dict.extend(existing);
                        }
                    }
                    let id = page_tree.as_ref().map(|(id, _)| *id).unwrap_or(*object_id);
                    page_tree = Some((id, Object::Dictionary(dict)));
                }
            }
            // Page objects are re-attached below; outlines are dropped.
            "Page" | "Outlines" | "Outline" => {}
            _ => {
                merged.objects.insert(*object_id, object.clone());
            }
        }
    }

    let (pages_id, pages_object) = page_tree.ok_or(PdfError::NoPages)?;
    let (catalog_id, catalog_object) = catalog.ok_or(PdfError::NoPages)?;

    for (object_id, object) in pages.iter() {
        if let Ok(dict) = object.as_dict() {
            let mut dict = dict.clone();
            dict.set("Parent", pages_id);
            merged.objects.insert(*object_id, Object::Dictionary(dict));
        }
    }

    if let Ok(dict) = pages_object.as_dict() {
        let mut dict = dict.clone();
        dict.set("Count", Object::Integer(pages.len() as i64));
        dict.set(
            "Kids",
            pages
                .keys()
                .map(|id| Object::Reference(*id))
                .collect::<Vec<_>>(),
        );
        merged.objects.insert(pages_id, Object::Dictionary(dict));
    }

    if let Ok(dict) = catalog_object.as_dict() {
        let mut dict = dict.clone();
        dict.set("Pages", pages_id);
        dict.remove(b"Outlines");
        merged.objects.insert(catalog_id, Object::Dictionary(dict));
    }

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();
    Ok(merged)
}

/// Split a PDF into contiguous groups of `pages_per_file` pages (the last
/// group may be shorter), writing `split_1.pdf`, `split_2.pdf`, … in page
/// order. Returns the number of files written.
pub fn split_pdf(
    input: &Path,
    output_dir: &Path,
    pages_per_file: usize,
) -> Result<usize, PdfError> {
    let pages_per_file = pages_per_file.max(1);
    let source = Document::load(input)?;
    let page_numbers: Vec<u32> = source.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Err(PdfError::NoPages);
    }

    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| io_err(output_dir, e))?;
    }

    let mut file_count = 0;
    for chunk in page_numbers.chunks(pages_per_file) {
        // Keep the chunk by deleting everything else from a copy.
        let delete: Vec<u32> = page_numbers
            .iter()
            .filter(|n| !chunk.contains(n))
            .copied()
            .collect();
        let mut part = source.clone();
        if !delete.is_empty() {
            part.delete_pages(&delete);
        }
        part.prune_objects();

        file_count += 1;
        let path = output_dir.join(format!("split_{file_count}.pdf"));
        part.save(&path).map_err(|e| io_err(&path, e))?;
    }
    Ok(file_count)
}

/// Output formats supported by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    pub fn parse(value: &str) -> Result<Self, PdfError> {
        match value.to_lowercase().as_str() {
            "png" => Ok(RasterFormat::Png),
            "jpeg" | "jpg" => Ok(RasterFormat::Jpeg),
            other => Err(PdfError::UnsupportedImageFormat {
                format: other.to_string(),
            }),
        }
    }

    fn flag(self) -> &'static str {
        match self {
            RasterFormat::Png => "-png",
            RasterFormat::Jpeg => "-jpeg",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpg",
        }
    }
}

/// True when the external rasterizer binary is on PATH.
pub fn rasterizer_available() -> bool {
    Command::new("pdftoppm")
        .arg("-v")
        .output()
        .is_ok()
}

/// Rasterize every page at the given DPI via `pdftoppm`, writing
/// `page_1.<ext>`, `page_2.<ext>`, … in page order. Returns the number of
/// pages written.
pub fn pdf_to_images(
    input: &Path,
    output_dir: &Path,
    dpi: u32,
    format: RasterFormat,
) -> Result<usize, PdfError> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| io_err(output_dir, e))?;
    }

    let prefix = output_dir.join("page");
    let result = Command::new("pdftoppm")
        .arg(format.flag())
        .arg("-r")
        .arg(dpi.to_string())
        .arg(input)
        .arg(&prefix)
        .output();

    let output = match result {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PdfError::RasterizerMissing);
        }
        Err(e) => return Err(io_err(input, e)),
    };
    if !output.status.success() {
        return Err(PdfError::RasterizerFailed {
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    rename_rasterized_pages(output_dir, format)
}

/// pdftoppm writes `page-01.png`-style names with zero padding that depends
/// on the page count; normalize them to `page_1.png` numbering.
fn rename_rasterized_pages(output_dir: &Path, format: RasterFormat) -> Result<usize, PdfError> {
    let ext = format.extension();
    let mut produced: Vec<(u32, PathBuf)> = Vec::new();

    let entries = fs::read_dir(output_dir).map_err(|e| io_err(output_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(output_dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(rest) = name.strip_prefix("page-") else {
            continue;
        };
        let Some(number) = rest.strip_suffix(&format!(".{ext}")) else {
            continue;
        };
        if let Ok(number) = number.parse::<u32>() {
            produced.push((number, entry.path()));
        }
    }

    produced.sort_by_key(|(number, _)| *number);
    for (number, path) in &produced {
        let target = output_dir.join(format!("page_{number}.{ext}"));
        fs::rename(path, &target).map_err(|e| io_err(path, e))?;
    }
    Ok(produced.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};
    use tempfile::tempdir;

    /// Build a minimal valid PDF with the given number of pages.
    fn sample_pdf(pages: usize) -> Document {
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

        let mut kids: Vec<Object> = Vec::new();
        for i in 0..pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
                    Operation::new("Td", vec![Object::Integer(50), Object::Integer(700)]),
                    Operation::new("Tj", vec![Object::string_literal(format!("page {}", i + 1))]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().unwrap(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(pages as i64),
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    fn save_sample(dir: &Path, name: &str, pages: usize) -> PathBuf {
        let path = dir.join(name);
        sample_pdf(pages).save(&path).unwrap();
        path
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let dir = tempdir().unwrap();
        let a = save_sample(dir.path(), "a.pdf", 2);
        let b = save_sample(dir.path(), "b.pdf", 3);
        let out = dir.path().join("merged.pdf");

        merge_pdfs(&[a, b], &out).unwrap();
        let merged = Document::load(&out).unwrap();
        assert_eq!(merged.get_pages().len(), 5);
    }

    #[test]
    fn test_merge_skips_missing_inputs() {
        let dir = tempdir().unwrap();
        let a = save_sample(dir.path(), "a.pdf", 1);
        let out = dir.path().join("merged.pdf");

        merge_pdfs(&[dir.path().join("ghost.pdf"), a], &out).unwrap();
        assert_eq!(Document::load(&out).unwrap().get_pages().len(), 1);
    }

    #[test]
    fn test_merge_fails_with_no_usable_inputs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("merged.pdf");
        assert!(matches!(
            merge_pdfs(&[dir.path().join("ghost.pdf")], &out),
            Err(PdfError::NoInputs)
        ));
    }

    #[test]
    fn test_split_into_fixed_groups() {
        let dir = tempdir().unwrap();
        let input = save_sample(dir.path(), "big.pdf", 5);
        let out_dir = dir.path().join("parts");

        let files = split_pdf(&input, &out_dir, 2).unwrap();
        assert_eq!(files, 3);

        // Groups of 2, 2, 1.
        let counts: Vec<usize> = (1..=3)
            .map(|i| {
                Document::load(out_dir.join(format!("split_{i}.pdf")))
                    .unwrap()
                    .get_pages()
                    .len()
            })
            .collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn test_split_single_pages() {
        let dir = tempdir().unwrap();
        let input = save_sample(dir.path(), "doc.pdf", 3);
        let out_dir = dir.path().join("parts");

        let files = split_pdf(&input, &out_dir, 1).unwrap();
        assert_eq!(files, 3);
        assert!(out_dir.join("split_3.pdf").exists());
    }

    #[test]
    fn test_rasterizer_probe_agrees_with_conversion() {
        let dir = tempdir().unwrap();
        let input = save_sample(dir.path(), "doc.pdf", 1);
        let result = pdf_to_images(&input, &dir.path().join("imgs"), 72, RasterFormat::Png);

        // Whether poppler is installed varies by machine; the probe and the
        // conversion must agree either way.
        if rasterizer_available() {
            assert!(!matches!(result, Err(PdfError::RasterizerMissing)));
        } else {
            assert!(matches!(result, Err(PdfError::RasterizerMissing)));
        }
    }

    #[test]
    fn test_raster_format_parse() {
        assert_eq!(RasterFormat::parse("png").unwrap(), RasterFormat::Png);
        assert_eq!(RasterFormat::parse("JPEG").unwrap(), RasterFormat::Jpeg);
        assert!(matches!(
            RasterFormat::parse("webp"),
            Err(PdfError::UnsupportedImageFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_download_pdf_writes_body() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let body = b"%PDF-1.5 fake body".to_vec();
        Mock::given(method("GET"))
            .and(path("/doc.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let out = dir.path().join("doc.pdf");
        let url = format!("{}/doc.pdf", server.uri());
        let written = download_pdf(&url, &out, Duration::from_secs(5)).await.unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(fs::read(&out).unwrap(), body);
    }

    #[tokio::test]
    async fn test_download_pdf_rejects_error_status() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let out = dir.path().join("missing.pdf");
        let url = format!("{}/missing.pdf", server.uri());
        let err = download_pdf(&url, &out, Duration::from_secs(5)).await;

        assert!(matches!(err, Err(PdfError::HttpStatus { status: 404, .. })));
    }
}
