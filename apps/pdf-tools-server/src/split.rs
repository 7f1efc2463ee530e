//! Page-range splitting
//!
//! Turns a split request into concrete page groups and builds one
//! sub-document per group. Ranges are half-open `[start, end)` over
//! zero-indexed pages. Indices outside the document are skipped, so an
//! inverted or out-of-bounds range produces a document with no pages
//! rather than an error. Output names are 1-indexed:
//! `split_{start+1}_to_{end}.pdf` for explicit ranges and
//! `page_{n}.pdf` for the one-page-per-file default.

use serde::{Deserialize, Serialize};

use crate::archive::ArchiveEntry;
use crate::pdf::{PdfDocument, PdfResult};

/// A half-open page range. `end` defaults to the page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRange {
    #[serde(default)]
    pub start: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// Split parameters as sent by clients: `{"pages": [{"start": 0, "end": 2}, ...]}`
///
/// `pages` absent means one output file per page. `pages: []` means no output files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    #[serde(default)]
    pub pages: Option<Vec<PageRange>>,
}

/// One planned output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroup {
    pub name: String,
    pub pages: Vec<usize>,
}

/// Compute the page groups to extract, without touching any PDF
pub fn plan(page_count: usize, ranges: Option<&[PageRange]>) -> Vec<PageGroup> {
    let Some(ranges) = ranges else {
        return (0..page_count)
            .map(|index| PageGroup {
                name: format!("page_{}.pdf", index + 1),
                pages: vec![index],
            })
            .collect();
    };

    ranges
        .iter()
        .map(|range| {
            let start = range.start as usize;
            let end = range.end.map(|end| end as usize).unwrap_or(page_count);
            PageGroup {
                name: format!("split_{}_to_{}.pdf", start + 1, end),
                pages: (start..end.min(page_count)).collect(),
            }
        })
        .collect()
}

/// Split a document into one archive entry per planned group
pub fn split(
    document: &dyn PdfDocument,
    ranges: Option<&[PageRange]>,
) -> PdfResult<Vec<ArchiveEntry>> {
    let groups = plan(document.page_count(), ranges);

    tracing::debug!(
        page_count = document.page_count(),
        groups = groups.len(),
        explicit_ranges = ranges.is_some(),
        "Splitting document"
    );

    groups
        .into_iter()
        .map(|group| {
            let content = document.extract_pages(&group.pages)?;
            Ok(ArchiveEntry::new(group.name, content))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive;
    use crate::pdf::{LopdfDocument, LopdfEngine, PdfEngine};
    use crate::testing::sample_pdf;

    #[test]
    fn test_plan_default_one_group_per_page() {
        let groups = plan(3, None);

        assert_eq!(
            groups,
            vec![
                PageGroup { name: "page_1.pdf".into(), pages: vec![0] },
                PageGroup { name: "page_2.pdf".into(), pages: vec![1] },
                PageGroup { name: "page_3.pdf".into(), pages: vec![2] },
            ]
        );
    }

    #[test]
    fn test_plan_default_empty_document() {
        assert!(plan(0, None).is_empty());
    }

    #[test]
    fn test_split_zero_page_document_yields_empty_archive() {
        let empty = LopdfEngine::new().merge(&[]).unwrap();
        let doc = LopdfDocument::load(&empty).unwrap();
        assert_eq!(doc.page_count(), 0);

        let entries = split(&doc, None).unwrap();
        assert!(entries.is_empty());

        let zip = archive::pack(&entries).unwrap();
        let reader = zip::ZipArchive::new(std::io::Cursor::new(zip)).unwrap();
        assert_eq!(reader.len(), 0);
    }

    #[test]
    fn test_plan_explicit_ranges_in_input_order() {
        let ranges = [PageRange::new(3, 5), PageRange::new(0, 2)];
        let groups = plan(5, Some(&ranges));

        assert_eq!(groups[0].name, "split_4_to_5.pdf");
        assert_eq!(groups[0].pages, vec![3, 4]);
        assert_eq!(groups[1].name, "split_1_to_2.pdf");
        assert_eq!(groups[1].pages, vec![0, 1]);
    }

    #[test]
    fn test_plan_end_defaults_to_page_count() {
        let ranges = [PageRange { start: 2, end: None }];
        let groups = plan(4, Some(&ranges));

        assert_eq!(groups[0].name, "split_3_to_4.pdf");
        assert_eq!(groups[0].pages, vec![2, 3]);
    }

    #[test]
    fn test_plan_clamps_past_the_end() {
        let ranges = [PageRange::new(1, 10)];
        let groups = plan(3, Some(&ranges));

        assert_eq!(groups[0].name, "split_2_to_10.pdf");
        assert_eq!(groups[0].pages, vec![1, 2]);
    }

    #[test]
    fn test_plan_inverted_out_of_bounds_range_is_empty() {
        let ranges = [PageRange::new(10, 5)];
        let groups = plan(5, Some(&ranges));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "split_11_to_5.pdf");
        assert!(groups[0].pages.is_empty());
    }

    #[test]
    fn test_plan_explicit_empty_list() {
        assert!(plan(5, Some(&[])).is_empty());
    }

    #[test]
    fn test_plan_overlapping_ranges_are_independent() {
        let ranges = [PageRange::new(0, 2), PageRange::new(1, 3)];
        let groups = plan(3, Some(&ranges));

        assert_eq!(groups[0].pages, vec![0, 1]);
        assert_eq!(groups[1].pages, vec![1, 2]);
    }

    #[test]
    fn test_split_request_wire_shape() {
        let request: SplitRequest =
            serde_json::from_str(r#"{"pages": [{"start": 0, "end": 2}, {"start": 3}]}"#).unwrap();

        assert_eq!(
            request.pages,
            Some(vec![PageRange::new(0, 2), PageRange { start: 3, end: None }])
        );

        let empty: SplitRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.pages, None);
    }

    #[test]
    fn test_split_request_rejects_negative_start() {
        let result = serde_json::from_str::<SplitRequest>(r#"{"pages": [{"start": -1}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_split_default_produces_single_page_documents() {
        let pdf = sample_pdf(&[&["one"], &["two"], &["three"]]);
        let doc = LopdfDocument::load(&pdf).unwrap();

        let entries = split(&doc, None).unwrap();

        assert_eq!(entries.len(), 3);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.name, format!("page_{}.pdf", i + 1));
            let part = LopdfDocument::load(&entry.content).unwrap();
            assert_eq!(part.page_count(), 1);
        }
        let last = LopdfDocument::load(&entries[2].content).unwrap();
        assert!(last.page_text(0).unwrap().contains("three"));
    }

    #[test]
    fn test_split_covering_ranges_reassemble_source_order() {
        let pdf = sample_pdf(&[&["p1"], &["p2"], &["p3"], &["p4"], &["p5"]]);
        let doc = LopdfDocument::load(&pdf).unwrap();
        let ranges = [PageRange::new(0, 2), PageRange::new(2, 3), PageRange::new(3, 5)];

        let entries = split(&doc, Some(&ranges)).unwrap();

        let mut texts = Vec::new();
        for entry in &entries {
            let part = LopdfDocument::load(&entry.content).unwrap();
            for i in 0..part.page_count() {
                texts.push(part.page_text(i).unwrap());
            }
        }
        assert_eq!(texts.len(), 5);
        for (text, expected) in texts.iter().zip(["p1", "p2", "p3", "p4", "p5"]) {
            assert!(text.contains(expected));
        }
    }

    #[test]
    fn test_split_out_of_bounds_range_yields_empty_document() {
        let pdf = sample_pdf(&[&["a"], &["b"], &["c"], &["d"], &["e"]]);
        let doc = LopdfDocument::load(&pdf).unwrap();

        let entries = split(&doc, Some(&[PageRange::new(10, 5)])).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "split_11_to_5.pdf");
        let part = LopdfDocument::load(&entries[0].content).unwrap();
        assert_eq!(part.page_count(), 0);
    }
}
