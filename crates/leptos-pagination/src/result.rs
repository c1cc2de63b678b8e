//! Page Result Types

use serde::Deserialize;

/// Wire form: `{ content: [...], page: { totalElements, totalPages } }`
#[derive(Debug, Clone, Deserialize)]
pub struct PageEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    pub page: PageInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_elements: u64,
    pub total_pages: u32,
}

/// One fetched page. Replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> From<PageEnvelope<T>> for PageResult<T> {
    fn from(envelope: PageEnvelope<T>) -> Self {
        Self {
            items: envelope.content,
            total_elements: envelope.page.total_elements,
            total_pages: envelope.page.total_pages,
        }
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_elements: 0,
            total_pages: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_envelope_to_result() {
        let json = r#"{
            "content": [{"id": 11}, {"id": 12}],
            "page": {"number": 2, "size": 10, "totalElements": 12, "totalPages": 2}
        }"#;
        let envelope: PageEnvelope<Row> = serde_json::from_str(json).unwrap();
        let result = PageResult::from(envelope);
        assert_eq!(result.items, vec![Row { id: 11 }, Row { id: 12 }]);
        assert_eq!(result.total_elements, 12);
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn test_envelope_missing_content() {
        let json = r#"{"page": {"totalElements": 0, "totalPages": 0}}"#;
        let envelope: PageEnvelope<Row> = serde_json::from_str(json).unwrap();
        assert!(PageResult::from(envelope).items.is_empty());
    }
}
