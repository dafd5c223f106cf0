use crate::error::ExtractError;
use crate::types::EmbedPayload;
use regex::Regex;
use std::sync::LazyLock;

const CLOSING_TAG: &str = "</script>";

static SCRIPT_PROPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#">\{\s*"props":.*?</script>"#).expect("script props pattern is valid")
});

/// Pulls the structured payload out of a raw embed page.
pub trait EmbeddedDataExtractor {
    fn extract(&self, html: &str) -> Result<EmbedPayload, ExtractError>;
}

/// Finds the `{"props":...}` object inlined in a `<script>` element.
///
/// The match spans from the tag's closing `>` to the next `</script>`, so both
/// ends are cut off before parsing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptPropsExtractor;

impl ScriptPropsExtractor {
    fn find_blob(html: &str) -> Option<&str> {
        let found = SCRIPT_PROPS.find(html)?.as_str();
        found.get(1..found.len() - CLOSING_TAG.len())
    }
}

impl EmbeddedDataExtractor for ScriptPropsExtractor {
    fn extract(&self, html: &str) -> Result<EmbedPayload, ExtractError> {
        let blob = Self::find_blob(html).ok_or(ExtractError::NotFound)?;
        Ok(serde_json::from_str(blob)?)
    }
}
