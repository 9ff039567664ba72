//! Media type parsing for the `mediaType` trait

/// A parsed `type/subtype[+suffix][; params]` media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub kind: String,
    pub subtype: String,
    pub suffix: Option<String>,
    pub parameters: Vec<(String, String)>,
}

impl MediaType {
    /// Parse a media type string. Returns `None` when it is not `type/subtype`.
    pub fn parse(value: &str) -> Option<MediaType> {
        let mut parts = value.split(';');
        let essence = parts.next()?.trim();
        let (kind, full_subtype) = essence.split_once('/')?;
        if kind.is_empty() || full_subtype.is_empty() || full_subtype.contains('/') {
            return None;
        }

        let (subtype, suffix) = match full_subtype.rsplit_once('+') {
            Some((subtype, suffix)) if !subtype.is_empty() && !suffix.is_empty() => {
                (subtype, Some(suffix.to_ascii_lowercase()))
            }
            Some(_) => return None,
            None => (full_subtype, None),
        };

        let parameters = parts
            .filter_map(|p| {
                let (key, value) = p.split_once('=')?;
                Some((
                    key.trim().to_ascii_lowercase(),
                    value.trim().trim_matches('"').to_string(),
                ))
            })
            .collect();

        Some(MediaType {
            kind: kind.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            suffix,
            parameters,
        })
    }

    /// Whether the value names a JSON media type (`*/json` or `*/*+json`).
    pub fn is_json(value: &str) -> bool {
        MediaType::parse(value).is_some_and(|m| m.is_json_type())
    }

    pub fn is_json_type(&self) -> bool {
        self.subtype == "json" || self.suffix.as_deref() == Some("json")
    }
}
