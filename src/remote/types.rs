//! Record and wire types for the collection API

use serde::Deserialize;

use crate::table::TableRecord;

/// One artwork record from the collection.
///
/// Only `id` participates in selection membership and row identity;
/// the remaining fields are display columns and may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artwork {
    pub id: u64,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub place_of_origin: Option<String>,

    #[serde(default)]
    pub artist_display: Option<String>,

    #[serde(default)]
    pub inscriptions: Option<String>,

    #[serde(default)]
    pub date_start: Option<i32>,

    #[serde(default)]
    pub date_end: Option<i32>,
}

impl TableRecord for Artwork {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Wire shape of one collection page. Only `data` and
/// `pagination.total_pages` are consumed.
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    pub data: Vec<Artwork>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Deserialize)]
pub struct PaginationInfo {
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_response() {
        // Shape of the artworks API, including pagination fields and
        // record fields this client does not consume.
        let body = r#"{
            "pagination": {
                "total": 129138,
                "limit": 12,
                "offset": 0,
                "total_pages": 10762,
                "current_page": 1
            },
            "data": [
                {
                    "id": 14556,
                    "title": "Auvers, Panoramic View",
                    "place_of_origin": "France",
                    "artist_display": "Paul Cezanne",
                    "inscriptions": null,
                    "date_start": 1873,
                    "date_end": 1875,
                    "is_boosted": false
                },
                {
                    "id": 14574,
                    "title": "The Bay of Marseille",
                    "place_of_origin": "France",
                    "artist_display": "Paul Cezanne",
                    "date_start": 1885,
                    "date_end": 1890
                }
            ]
        }"#;

        let response: PageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.pagination.total_pages, 10762);
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[0].id, 14556);
        assert_eq!(response.data[0].inscriptions, None);
        assert_eq!(response.data[1].title.as_deref(), Some("The Bay of Marseille"));
    }

    #[test]
    fn test_decode_record_with_missing_fields() {
        let record: Artwork = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(record.id(), 7);
        assert_eq!(record.title, None);
        assert_eq!(record.date_start, None);
    }
}
