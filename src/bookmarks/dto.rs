use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial bookmark update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct EditBookmarkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_link() {
        assert!(serde_json::from_str::<CreateBookmarkRequest>(r#"{"title":"t"}"#).is_err());
        assert!(serde_json::from_str::<CreateBookmarkRequest>(r#"{"link":"l"}"#).is_err());
    }

    #[test]
    fn create_description_defaults_to_none() {
        let dto: CreateBookmarkRequest =
            serde_json::from_str(r#"{"title":"t","link":"http://x.io"}"#).unwrap();
        assert!(dto.description.is_none());
    }

    #[test]
    fn edit_accepts_any_subset_of_fields() {
        let dto: EditBookmarkRequest =
            serde_json::from_str(r#"{"title":"edited Bookmark","description":"added description"}"#)
                .unwrap();
        assert_eq!(dto.title.as_deref(), Some("edited Bookmark"));
        assert_eq!(dto.description.as_deref(), Some("added description"));
        assert!(dto.link.is_none());

        let empty: EditBookmarkRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.title.is_none());
    }
}
