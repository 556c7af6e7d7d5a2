use std::sync::Arc;

use lopdf::Document;
use pagechat_core::{ExtractionError, PageOpener, PageSource};

/// Opens PDF bytes with `lopdf`.
///
/// Parsing runs on the `blocking` thread pool so the async caller is not stalled by large
/// documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfOpener;

impl PageOpener for LopdfOpener {
    type Document = LopdfDocument;

    async fn open(&self, bytes: &[u8]) -> Result<LopdfDocument, ExtractionError> {
        let bytes = bytes.to_vec();
        blocking::unblock(move || LopdfDocument::load(&bytes)).await
    }
}

/// A parsed PDF whose pages are read one at a time.
#[derive(Debug, Clone)]
pub struct LopdfDocument {
    doc: Arc<Document>,
    /// Page object numbers in ascending page order.
    pages: Vec<u32>,
}

impl LopdfDocument {
    /// Parses `bytes` synchronously.
    ///
    /// # Errors
    ///
    /// [`ExtractionError::Parse`] when the bytes are not a readable PDF,
    /// [`ExtractionError::Unavailable`] when it is encrypted with a password or scheme lopdf cannot
    /// open.
    pub fn load(bytes: &[u8]) -> Result<Self, ExtractionError> {
        let mut doc =
            Document::load_mem(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))?;
        unlock(&mut doc)?;
        let mut pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        pages.sort_unstable();
        Ok(Self {
            doc: Arc::new(doc),
            pages,
        })
    }

    fn page_number(&self, page: usize) -> Result<u32, ExtractionError> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .copied()
            .ok_or_else(|| ExtractionError::Page {
                page,
                reason: format!("document has {} pages", self.pages.len()),
            })
    }
}

impl PageSource for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn page_text(&self, page: usize) -> Result<String, ExtractionError> {
        let number = self.page_number(page)?;
        let doc = Arc::clone(&self.doc);
        let text = blocking::unblock(move || doc.extract_text(&[number]))
            .await
            .map_err(|e| ExtractionError::Page {
                page,
                reason: e.to_string(),
            })?;
        Ok(strip_text_object_break(text))
    }
}

/// Encrypted files are only readable when they open with the empty user password.
fn unlock(doc: &mut Document) -> Result<(), ExtractionError> {
    if !doc.is_encrypted() {
        return Ok(());
    }
    doc.decrypt("")
        .map_err(|e| ExtractionError::Unavailable(format!("encrypted document: {e}")))
}

/// lopdf ends every text object with `\n`; the extractor adds its own page break.
fn strip_text_object_break(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use lopdf::{
        Object, Stream,
        content::{Content, Operation},
        dictionary,
    };
    use pagechat_core::TextExtractor;

    use super::*;

    fn blank_pdf(pages: usize) -> Vec<u8> {
        pdf_with_pages(&vec![""; pages])
    }

    /// One page per entry, each drawing its text with a single `Tj`.
    fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let mut kids = Vec::new();
        for text in texts {
            let data = if text.is_empty() {
                Vec::new()
            } else {
                Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 12.into()]),
                        Operation::new("Td", vec![72.into(), 720.into()]),
                        Operation::new("Tj", vec![Object::string_literal(*text)]),
                        Operation::new("ET", vec![]),
                    ],
                }
                .encode()
                .unwrap()
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, data));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }
        let count = i64::try_from(kids.len()).unwrap();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn counts_pages() {
        let doc = LopdfDocument::load(&blank_pdf(2)).unwrap();
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn rejects_garbage() {
        let err = LopdfDocument::load(b"not-a-pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }

    #[test]
    fn page_numbers_are_one_based() {
        let doc = LopdfDocument::load(&blank_pdf(1)).unwrap();
        assert!(doc.page_number(1).is_ok());
        assert!(matches!(
            doc.page_number(0),
            Err(ExtractionError::Page { page: 0, .. })
        ));
        assert!(matches!(
            doc.page_number(2),
            Err(ExtractionError::Page { page: 2, .. })
        ));
    }

    #[test]
    fn only_one_trailing_break_is_removed() {
        assert_eq!(strip_text_object_break("a\nb\n".into()), "a\nb");
        assert_eq!(strip_text_object_break("a\n\n".into()), "a\n");
        assert_eq!(strip_text_object_break("a".into()), "a");
    }

    #[tokio::test]
    async fn reads_page_text_without_trailing_break() {
        let doc = LopdfDocument::load(&pdf_with_pages(&["Alpha", "Beta"])).unwrap();
        assert_eq!(doc.page_text(1).await.unwrap(), "Alpha");
        assert_eq!(doc.page_text(2).await.unwrap(), "Beta");
    }

    #[tokio::test]
    async fn pages_are_joined_in_order() {
        let text = crate::extractor()
            .extract(&pdf_with_pages(&["Alpha", "Beta"]))
            .await
            .unwrap();
        assert_eq!(text, "Alpha\nBeta\n");
    }

    #[test]
    fn undecryptable_document_is_unavailable() {
        let mut doc = Document::with_version("1.7");
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 5,
            "R" => 6,
        });
        doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
        assert!(matches!(
            unlock(&mut doc),
            Err(ExtractionError::Unavailable(_))
        ));

        let mut plain = Document::with_version("1.7");
        assert!(unlock(&mut plain).is_ok());
    }

    #[tokio::test]
    async fn opens_off_thread() {
        let doc = LopdfOpener.open(&blank_pdf(3)).await.unwrap();
        assert_eq!(doc.page_count(), 3);
        let err = LopdfOpener.open(b"broken").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Parse(_)));
    }
}
